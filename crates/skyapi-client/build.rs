use std::error::Error;
use std::path::{Path, PathBuf};
use std::{env, fs};

use skyapi_core::config::ClientOptions;
use skyapi_core::{load, transform};

const SPEC_DIR: &str = "spec";
const ENTRY: &str = "openapi.yaml";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={SPEC_DIR}");

    let spec = load::load(&Path::new(SPEC_DIR).join(ENTRY))?;
    for issue in &spec.issues {
        println!("cargo:warning={ENTRY}: {issue}");
    }

    let ir = transform::transform(&spec.document);
    let source = skyapi_rust_client::render(&ir, &ClientOptions::default())?;

    let out = PathBuf::from(env::var("OUT_DIR")?).join("client.rs");
    fs::write(out, source)?;
    Ok(())
}
