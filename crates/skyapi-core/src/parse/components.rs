use indexmap::IndexMap;
use serde::Deserialize;

use super::security::SecurityScheme;

/// Components object. After dereferencing only the security schemes are
/// still read directly; everything else has been inlined at its use sites.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    #[serde(rename = "securitySchemes")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}
