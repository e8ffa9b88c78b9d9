/// Strict and reserved keywords that need a raw identifier.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Methods every generated client already defines.
pub const RESERVED_METHODS: &[&str] = &["new", "client", "refresh", "request"];

/// Turn a snake_case operation name into a usable method identifier.
pub fn method_ident(snake: &str) -> String {
    let name = if snake.starts_with(|c: char| c.is_ascii_digit()) {
        format!("op_{snake}")
    } else {
        snake.to_string()
    };

    if KEYWORDS.contains(&name.as_str()) {
        format!("r#{name}")
    } else if PATH_KEYWORDS.contains(&name.as_str()) || RESERVED_METHODS.contains(&name.as_str()) {
        format!("{name}_operation")
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_pass_through() {
        assert_eq!(method_ident("create_dataset"), "create_dataset");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(method_ident("type"), "r#type");
        assert_eq!(method_ident("match"), "r#match");
        assert_eq!(method_ident("self"), "self_operation");
    }

    #[test]
    fn test_leading_digit() {
        assert_eq!(method_ident("3d_model"), "op_3d_model");
    }

    #[test]
    fn test_client_methods_are_not_shadowed() {
        assert_eq!(method_ident("refresh"), "refresh_operation");
        assert_eq!(method_ident("request"), "request_operation");
    }
}
