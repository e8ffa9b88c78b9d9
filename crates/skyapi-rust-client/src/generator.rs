use skyapi_core::config::ClientOptions;
use skyapi_core::ir::IrSpec;
use skyapi_core::{CodeGenerator, GeneratedFile};

use crate::emitters;
use crate::error::RenderError;

/// File name of the rendered client module.
pub const CLIENT_FILE: &str = "client.rs";

/// Render the client module source for `ir`.
pub fn render(ir: &IrSpec, options: &ClientOptions) -> Result<String, RenderError> {
    emitters::client::emit_client(ir, options)
}

/// Rust client code generator.
pub struct RustClientGenerator;

impl CodeGenerator for RustClientGenerator {
    type Config = ClientOptions;
    type Error = RenderError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &ClientOptions,
    ) -> Result<Vec<GeneratedFile>, RenderError> {
        log::debug!("rendering {} operations", ir.operations.len());
        Ok(vec![GeneratedFile {
            path: CLIENT_FILE.to_string(),
            content: render(ir, config)?,
        }])
    }
}
