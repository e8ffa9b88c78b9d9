use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::parse::{self, SpecFormat};

/// Resolves every `$ref` in a document tree, producing a tree with no
/// remaining references.
///
/// Internal pointers (`#/components/schemas/Foo`) resolve against the
/// document that contains them; external references (`common.yaml`,
/// `common.yaml#/Foo`) are read relative to the referencing document and
/// cached. Keys written next to a `$ref` are merged over the resolved target.
/// Cycles cannot be flattened and fail with [`ResolveError::CircularRef`].
#[derive(Debug, Default)]
pub struct Dereferencer {
    documents: HashMap<PathBuf, Value>,
    active: Vec<(PathBuf, String)>,
}

impl Dereferencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dereference `root`, treating `location` as the path it was read from.
    pub fn dereference(&mut self, root: Value, location: &Path) -> Result<Value, ResolveError> {
        self.documents.insert(location.to_path_buf(), root.clone());
        self.resolve_value(&root, location)
    }

    /// Documents read while resolving, keyed by path. Includes the root.
    pub fn documents(&self) -> impl Iterator<Item = &Path> {
        self.documents.keys().map(PathBuf::as_path)
    }

    fn resolve_value(&mut self, value: &Value, doc: &Path) -> Result<Value, ResolveError> {
        match value {
            Value::Object(map) => match map.get("$ref") {
                Some(Value::String(reference)) => self.resolve_ref(reference, map, doc),
                _ => {
                    let mut out = Map::with_capacity(map.len());
                    for (key, child) in map {
                        out.insert(key.clone(), self.resolve_value(child, doc)?);
                    }
                    Ok(Value::Object(out))
                }
            },
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, doc))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn resolve_ref(
        &mut self,
        reference: &str,
        siblings: &Map<String, Value>,
        doc: &Path,
    ) -> Result<Value, ResolveError> {
        let (file, pointer) = split_reference(reference)?;
        let target_doc = if file.is_empty() {
            doc.to_path_buf()
        } else {
            relative_to(doc, file)
        };

        let key = (target_doc.clone(), pointer.clone());
        if self.active.contains(&key) {
            return Err(ResolveError::CircularRef(reference.to_string()));
        }

        let target = self
            .lookup(&target_doc, &pointer)?
            .ok_or_else(|| ResolveError::RefTargetNotFound(reference.to_string()))?;

        self.active.push(key);
        let resolved = self.resolve_value(&target, &target_doc);
        self.active.pop();
        let mut resolved = resolved?;

        if let Value::Object(ref mut obj) = resolved {
            for (name, sibling) in siblings {
                if name != "$ref" {
                    obj.insert(name.clone(), self.resolve_value(sibling, doc)?);
                }
            }
        }

        Ok(resolved)
    }

    fn lookup(&mut self, target_doc: &Path, pointer: &str) -> Result<Option<Value>, ResolveError> {
        if !self.documents.contains_key(target_doc) {
            let raw = read_document(target_doc)?;
            log::debug!("loaded referenced document {}", target_doc.display());
            self.documents.insert(target_doc.to_path_buf(), raw);
        }

        Ok(self
            .documents
            .get(target_doc)
            .and_then(|document| document.pointer(pointer))
            .cloned())
    }
}

fn read_document(path: &Path) -> Result<Value, ResolveError> {
    let content = fs::read_to_string(path).map_err(|source| ResolveError::UnreadableDocument {
        path: path.to_path_buf(),
        source,
    })?;
    parse::parse_value(&content, SpecFormat::from_path(path)).map_err(|source| {
        ResolveError::InvalidDocument {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Split a reference into its file part and decoded JSON pointer.
fn split_reference(reference: &str) -> Result<(&str, String), ResolveError> {
    let (file, fragment) = reference.split_once('#').unwrap_or((reference, ""));
    let pointer = percent_decode(fragment);
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(ResolveError::InvalidRefFormat(reference.to_string()));
    }
    if file.is_empty() && pointer.is_empty() && !reference.starts_with('#') {
        return Err(ResolveError::InvalidRefFormat(reference.to_string()));
    }
    Ok((file, pointer))
}

fn relative_to(doc: &Path, file: &str) -> PathBuf {
    let joined = doc.parent().unwrap_or_else(|| Path::new(".")).join(file);
    fs::canonicalize(&joined).unwrap_or(joined)
}

fn percent_decode(input: &str) -> String {
    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| input.to_string())
}
