use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apicmd_commander::CommanderGenerator;
use apicmd_core::config::{self, ApicmdConfig, CONFIG_FILE_NAME};
use apicmd_core::model::Program;
use apicmd_core::parse::{self, spec::OpenApiSpec};
use apicmd_core::transform::{self, BuildOptions};
use apicmd_core::CodeGenerator;

#[derive(Parser)]
#[command(
    name = "apicmd",
    about = "Generate a command-line program from an OpenAPI 3.x document",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a CLI program from an OpenAPI document
    Generate {
        /// Path or http(s) URL of the OpenAPI document (YAML or JSON)
        spec: Option<String>,

        /// Path of the generated program
        output: Option<PathBuf>,

        /// Program name, used for help and environment variables
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check that a document parses, resolves and builds
    Validate {
        /// Path or http(s) URL of the OpenAPI document
        spec: String,
    },

    /// Print the command model built from a document
    Inspect {
        /// Path or http(s) URL of the OpenAPI document
        spec: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Program name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Initialize a new apicmd configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { spec, output, name } => cmd_generate(spec, output, name),

        Commands::Validate { spec } => cmd_validate(&spec),

        Commands::Inspect { spec, format, name } => cmd_inspect(&spec, format, name),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apicmd", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApicmdConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

/// Read a document from a file path or an `http(s)://` URL.
fn read_spec(location: &str) -> Result<String> {
    if location.starts_with("http://") || location.starts_with("https://") {
        log::info!("fetching {location}");
        let text = reqwest::blocking::get(location)
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .with_context(|| format!("failed to fetch {location}"))?;
        Ok(text)
    } else {
        fs::read_to_string(location).with_context(|| format!("failed to read {location}"))
    }
}

/// Read, parse and dereference a document.
fn load_spec(location: &str) -> Result<OpenApiSpec> {
    let content = read_spec(location)?;
    let parsed = parse::from_str_detect(location, &content)
        .with_context(|| format!("failed to parse {location}"))?;
    let resolved =
        parse::resolve(&parsed).with_context(|| format!("failed to resolve {location}"))?;
    log::info!(
        "loaded {} {} ({} paths)",
        resolved.info.title,
        resolved.info.version,
        resolved.paths.len()
    );
    Ok(resolved)
}

fn build_program(spec: &OpenApiSpec, name: &str, cfg: &ApicmdConfig) -> Result<Program> {
    let options = BuildOptions {
        naming_strategy: cfg.naming.strategy,
        aliases: cfg.naming.aliases.clone(),
    };
    let program = transform::build_with_options(spec, name, &options)?;
    Ok(program)
}

/// Explicit name, then the configured one, then the output file stem.
fn program_name(explicit: Option<String>, cfg: &ApicmdConfig, output: &Path) -> String {
    explicit
        .or_else(|| cfg.name.clone())
        .or_else(|| {
            output
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(String::from)
        })
        .unwrap_or_else(|| "cli".to_string())
}

/// Write `contents` to a temp file next to `path`, then move it into place.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    let permissions = output_permissions(path)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("failed to set permissions on {}", tmp.path().display()))?;
    }
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Permissions of the file being replaced, else `rwxr-xr-x` for a new program.
fn output_permissions(path: &Path) -> Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(new_program_permissions()),
        Err(err) => Err(err).with_context(|| format!("failed to inspect {}", path.display())),
    }
}

#[cfg(unix)]
fn new_program_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn new_program_permissions() -> Option<fs::Permissions> {
    None
}

fn cmd_generate(
    spec: Option<String>,
    output: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let location = spec.unwrap_or_else(|| cfg.input.clone());
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));
    let name = program_name(name, &cfg, &output);

    let resolved = load_spec(&location)?;
    let program = build_program(&resolved, &name, &cfg)
        .with_context(|| format!("failed to build commands from {location}"))?;
    let source = CommanderGenerator
        .generate(&program)
        .with_context(|| format!("failed to generate {}", output.display()))?;

    write_atomic(&output, &source)?;
    eprintln!(
        "wrote {} ({} commands)",
        output.display(),
        program.all_commands().count()
    );
    Ok(())
}

fn cmd_validate(location: &str) -> Result<()> {
    let resolved = load_spec(location)?;
    let program = build_program(&resolved, "cli", &ApicmdConfig::default())?;

    eprintln!(
        "Valid OpenAPI {} spec: {}",
        resolved.openapi, resolved.info.title
    );
    eprintln!("  Version: {}", resolved.info.version);
    eprintln!("  Paths: {}", resolved.paths.len());
    let operations: usize = resolved
        .paths
        .values()
        .map(|item| item.operations().count())
        .sum();
    eprintln!("  Operations: {operations}");
    eprintln!("  Commands: {}", program.all_commands().count());
    eprintln!("  Groups: {}", program.groups().count());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(location: &str, format: InspectFormat, name: Option<String>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let name = program_name(name, &cfg, Path::new(&cfg.output));
    let resolved = load_spec(location)?;
    let program = build_program(&resolved, &name, &cfg)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&program)?;
            print!("{yaml}");
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&program)?;
            println!("{json}");
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_precedence() {
        let mut cfg = ApicmdConfig::default();
        assert_eq!(
            program_name(None, &cfg, Path::new("bin/petstore.js")),
            "petstore"
        );
        cfg.name = Some("pets".to_string());
        assert_eq!(program_name(None, &cfg, Path::new("bin/petstore.js")), "pets");
        assert_eq!(
            program_name(Some("mine".to_string()), &cfg, Path::new("x.js")),
            "mine"
        );
    }

    #[test]
    fn test_write_atomic_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/cli.js");
        write_atomic(&path, "console.log(1)\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "console.log(1)\n");

        write_atomic(&path, "console.log(2)\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "console.log(2)\n");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cli.js");
        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;

        write_atomic(&path, "#!/usr/bin/env node\n").unwrap();
        assert_eq!(mode(&path), 0o755);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();
        write_atomic(&path, "#!/usr/bin/env node\n").unwrap();
        assert_eq!(mode(&path), 0o750);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        write_atomic(&path, "#!/usr/bin/env node\n").unwrap();
        assert_eq!(mode(&path), 0o644);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_spec("definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("failed to read definitely/not/here.yaml"));
    }
}
