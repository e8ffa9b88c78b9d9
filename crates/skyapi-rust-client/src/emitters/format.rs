use crate::error::RenderError;

/// Check that `source` is a valid Rust file and optionally pretty-print it,
/// then prepend the generated-code banner.
pub fn finish(source: &str, banner: &str, pretty: bool) -> Result<String, RenderError> {
    let file = syn::parse_file(source)?;
    let body = if pretty {
        prettyplease::unparse(&file)
    } else {
        source.to_string()
    };
    Ok(format!("// {banner}\n\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_and_adds_banner() {
        let out = finish("pub fn a()->u8{1}", "generated", true).unwrap();
        assert_eq!(out, "// generated\n\npub fn a() -> u8 {\n    1\n}\n");
    }

    #[test]
    fn test_unformatted_keeps_source() {
        let out = finish("pub fn a()->u8{1}", "generated", false).unwrap();
        assert_eq!(out, "// generated\n\npub fn a()->u8{1}");
    }

    #[test]
    fn test_rejects_invalid_code() {
        let err = finish("pub fn a( {", "generated", true).unwrap_err();
        assert!(matches!(err, RenderError::Syntax(_)));
    }
}
