mod fetch;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use s2r_core::config::{self, CONFIG_FILE_NAME, OutputFormat, S2rConfig};
use s2r_core::{ConvertOptions, ParseMode, RamlObject};

use crate::fetch::SourceFetcher;

#[derive(Parser)]
#[command(name = "s2r", about = "Swagger 1.x to RAML converter", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a resource listing, API declaration or directory to RAML
    Convert {
        /// File path, URL or directory to convert
        #[arg(short, long)]
        input: Option<String>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long)]
        format: Option<FormatArg>,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,

        /// Accept documents without a swaggerVersion
        #[arg(long)]
        lenient: bool,
    },

    /// Convert an input and print a summary of the result
    Validate {
        /// File path, URL or directory to check
        #[arg(short, long)]
        input: Option<String>,

        /// Accept documents without a swaggerVersion
        #[arg(long)]
        lenient: bool,
    },

    /// Initialize a new s2r configuration
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

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            compact,
            lenient,
        } => {
            let mut cfg = try_load_config()?.unwrap_or_default();
            if let Some(format) = format {
                cfg.output.format = format.into();
            }
            if compact {
                cfg.output.pretty = false;
            }
            if lenient {
                cfg.parser.mode = ParseMode::Lenient;
            }
            cmd_convert(input, output, &cfg).await
        }

        Commands::Validate { input, lenient } => {
            let mut cfg = try_load_config()?.unwrap_or_default();
            if lenient {
                cfg.parser.mode = ParseMode::Lenient;
            }
            cmd_validate(input, &cfg).await
        }

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "s2r", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<S2rConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// The command line input wins over the config file.
fn resolve_input(input: Option<String>, cfg: &S2rConfig) -> Result<String> {
    input.or_else(|| cfg.input.clone()).with_context(|| {
        format!("no input given. Pass --input or set `input` in {CONFIG_FILE_NAME}")
    })
}

async fn load_raml(input: &str, cfg: &S2rConfig) -> Result<RamlObject> {
    let fetcher = SourceFetcher::new(&cfg.fetch)?;
    let options = ConvertOptions {
        parse_mode: cfg.parser.mode,
        ..ConvertOptions::default()
    };

    let path = Path::new(input);
    let raml = if !fetch::is_remote(input) && path.is_dir() {
        let dir = path.to_path_buf();
        let files = tokio::task::spawn_blocking(move || fetch::read_directory(&dir))
            .await
            .context("directory walk panicked")??;
        s2r_core::convert_files(&files, &fetcher, options).await
    } else {
        s2r_core::convert_with_options(input, &fetcher, options).await
    };

    raml.with_context(|| format!("failed to convert {input}"))
}

fn render(raml: &RamlObject, format: OutputFormat, pretty: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(raml)? + "\n",
        OutputFormat::Json => serde_json::to_string(raml)? + "\n",
        OutputFormat::Yaml => serde_yaml_ng::to_string(raml)?,
    };
    Ok(rendered)
}

async fn cmd_convert(
    input: Option<String>,
    output: Option<PathBuf>,
    cfg: &S2rConfig,
) -> Result<()> {
    let input = resolve_input(input, cfg)?;
    let raml = load_raml(&input, cfg).await?;
    let rendered = render(&raml, cfg.output.format, cfg.output.pretty)?;

    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

async fn cmd_validate(input: Option<String>, cfg: &S2rConfig) -> Result<()> {
    let input = resolve_input(input, cfg)?;
    let raml = load_raml(&input, cfg).await?;

    eprintln!("Converted {input}");
    if let Some(title) = &raml.title {
        eprintln!("  Title: {title}");
    }
    if let Some(version) = &raml.version {
        eprintln!("  Version: {version}");
    }
    if let Some(base_uri) = &raml.base_uri {
        eprintln!("  Base URI: {base_uri}");
    }
    eprintln!("  Resources: {}", raml.resource_count());
    eprintln!("  Methods: {}", raml.method_count());
    eprintln!("  Security schemes: {}", raml.security_schemes.len());

    eprintln!("Validation successful.");
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

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
