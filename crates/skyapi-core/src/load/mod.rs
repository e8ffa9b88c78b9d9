pub mod deref;
pub mod normalize;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::LoadError;
use crate::parse::{self, SpecFormat, spec::SpecDocument};

pub use deref::Dereferencer;
pub use normalize::unwrap_method_nesting;
pub use validate::{ValidationIssue, validate};

/// A loaded specification: the typed document the transform reads, plus the
/// dereferenced and normalized tree in JSON and YAML form.
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    pub document: SpecDocument,
    pub json: Value,
    pub yaml: String,
    pub issues: Vec<ValidationIssue>,
}

impl LoadedSpec {
    /// True when structural validation reported nothing.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        serde_json::to_string_pretty(&self.json).map_err(LoadError::Malformed)
    }
}

/// Load a specification file. External `$ref`s resolve relative to it.
pub fn load(path: &Path) -> Result<LoadedSpec, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let location = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    log::debug!("loading spec from {}", location.display());
    load_from(&content, SpecFormat::from_path(path), location)
}

/// Load a specification held in memory. Relative external `$ref`s resolve
/// against `base_dir`.
pub fn load_str(
    input: &str,
    format: SpecFormat,
    base_dir: &Path,
) -> Result<LoadedSpec, LoadError> {
    load_from(input, format, base_dir.join("<inline>"))
}

fn load_from(input: &str, format: SpecFormat, location: PathBuf) -> Result<LoadedSpec, LoadError> {
    let raw = parse::parse_value(input, format)?;

    let mut dereferencer = Dereferencer::new();
    let mut json = dereferencer.dereference(raw, &location)?;
    log::debug!(
        "dereferenced spec using {} document(s)",
        dereferencer.documents().count()
    );

    let unwrapped = unwrap_method_nesting(&mut json);
    if unwrapped > 0 {
        log::debug!("unwrapped {unwrapped} redundantly nested operation(s)");
    }

    let issues = validate(&json);
    if !issues.is_empty() {
        log::warn!(
            "spec failed validation with {} issue(s):\n{}",
            issues.len(),
            issues
                .iter()
                .map(|issue| format!("  {issue}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let document = parse::from_value(json.clone()).map_err(LoadError::Malformed)?;
    let yaml = serde_yaml_ng::to_string(&json).map_err(LoadError::Serialize)?;

    Ok(LoadedSpec {
        document,
        json,
        yaml,
        issues,
    })
}
