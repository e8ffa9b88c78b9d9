use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("generated code does not parse: {0}")]
    Syntax(#[from] syn::Error),
}
