pub mod name_normalizer;
pub mod spec_to_ir;

pub use spec_to_ir::{DEFAULT_AUTH_SCHEME, TransformOptions, is_secured, transform, transform_with_options};
