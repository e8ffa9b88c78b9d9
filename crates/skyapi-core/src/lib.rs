//! Loading, validation and flattening of OpenAPI documents into the
//! operation records skyapi renders clients from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod ir;
pub mod load;
pub mod parse;
pub mod transform;

/// One output file, with a path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

impl GeneratedFile {
    /// Write the file below `dir`, creating parent directories as needed.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Renders operation records into output files.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        ir: &ir::IrSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
