use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use skyapi_core::config::{self, CONFIG_FILE_NAME, OutputKind, SkyapiConfig};
use skyapi_core::load::{self, LoadedSpec};
use skyapi_core::transform;
use skyapi_core::{CodeGenerator, GeneratedFile};
use skyapi_rust_client::RustClientGenerator;

#[derive(Parser)]
#[command(name = "skyapi", about = "Generate a Rust API client from an OpenAPI 3.x spec", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one build artifact to the output directory
    Build {
        /// Artifact to produce
        #[arg(short, long, default_value = "source")]
        kind: BuildKind,

        /// Path to the OpenAPI spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a spec for structural problems
    Validate {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the operation records derived from a spec
    Inspect {
        /// Path to the OpenAPI spec file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new skyapi configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BuildKind {
    /// Dereferenced spec as JSON
    Json,
    /// Dereferenced spec as YAML
    Yaml,
    /// Generated Rust client module
    Source,
}

impl From<BuildKind> for OutputKind {
    fn from(kind: BuildKind) -> Self {
        match kind {
            BuildKind::Json => OutputKind::Json,
            BuildKind::Yaml => OutputKind::Yaml,
            BuildKind::Source => OutputKind::Source,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            kind,
            input,
            output,
        } => cmd_build(kind.into(), input, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "skyapi", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the project config from the current directory, falling back to defaults.
fn load_project_config() -> Result<SkyapiConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    if cfg.is_some() {
        log::debug!("using {}", config_path.display());
    }
    Ok(cfg.unwrap_or_default())
}

fn load_spec(input: Option<PathBuf>, cfg: &SkyapiConfig) -> Result<LoadedSpec> {
    let path = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    load::load(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Produce the files of one build artifact.
fn artifact(kind: OutputKind, spec: &LoadedSpec, cfg: &SkyapiConfig) -> Result<Vec<GeneratedFile>> {
    let content = match kind {
        OutputKind::Json => spec.to_json_pretty()?,
        OutputKind::Yaml => spec.yaml.clone(),
        OutputKind::Source => {
            let ir = transform::transform_with_options(&spec.document, &cfg.transform_options());
            return Ok(RustClientGenerator.generate(&ir, &cfg.client)?);
        }
    };
    Ok(vec![GeneratedFile {
        path: kind.file_name().to_string(),
        content,
    }])
}

fn cmd_build(kind: OutputKind, input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = load_project_config()?;
    let spec = load_spec(input, &cfg)?;
    let files = artifact(kind, &spec, &cfg)?;

    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    for file in &files {
        let path = file
            .write_to(&output_dir)
            .with_context(|| format!("failed to write {} in {}", file.path, output_dir.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_validate(input: Option<PathBuf>) -> Result<()> {
    let cfg = load_project_config()?;
    let spec = load_spec(input, &cfg)?;

    eprintln!(
        "OpenAPI {} spec: {} {}",
        spec.document.openapi.as_deref().unwrap_or("?"),
        spec.document.info.title,
        spec.document.info.version
    );
    eprintln!("  Paths: {}", spec.document.paths.len());
    eprintln!("  Operations: {}", spec.document.operation_count());

    if spec.is_valid() {
        eprintln!("Validation successful.");
        return Ok(());
    }

    eprintln!("  Issues: {}", spec.issues.len());
    for issue in &spec.issues {
        eprintln!("    {issue}");
    }
    anyhow::bail!("{} validation issues", spec.issues.len())
}

fn cmd_inspect(input: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let cfg = load_project_config()?;
    let spec = load_spec(input, &cfg)?;
    let ir = transform::transform_with_options(&spec.document, &cfg.transform_options());

    match format {
        InspectFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&ir)?),
        InspectFormat::Json => println!("{}", serde_json::to_string_pretty(&ir)?),
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
