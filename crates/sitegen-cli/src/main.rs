//! sitegen: CLI tool to build a static site from markdown

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use config::{CONFIG_FILE_NAME, Config};
use sitegen_core::{BlockType, classify, markdown_to_html_node, split_blocks};
use sitegen_site::{SiteOptions, build_site};

#[derive(Parser, Debug)]
#[command(name = "sitegen")]
#[command(about = "Build a static HTML site from markdown")]
#[command(version)]
#[command(after_help = "Examples:
  sitegen build                          # content/ + static/ -> public/
  sitegen build -o dist -j4              # Custom output dir, 4 parallel jobs
  sitegen render content/index.md        # Print the HTML body of one page
  sitegen blocks content/index.md        # Show how a file is split into blocks
  sitegen init                           # Write a sample _sitegen.toml")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy static assets and generate every page
    Build(BuildArgs),

    /// Convert one markdown file and print the result
    Render {
        /// Markdown file
        input: PathBuf,

        /// Print the element tree as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Print the blocks of a markdown file with their types, as JSON
    Blocks {
        /// Markdown file
        input: PathBuf,
    },

    /// Write a sample configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Configuration file (defaults to ./_sitegen.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of markdown sources
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of static assets
    #[arg(long = "static", value_name = "STATIC")]
    static_dir: Option<PathBuf>,

    /// HTML template with {{ Title }} and {{ Content }} placeholders
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output directory (replaced on every build)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Build(args) => build(args, cli.quiet),
        Command::Render { input, json } => render(&input, json),
        Command::Blocks { input } => blocks(&input),
        Command::Init { force } => init(force),
        Command::Schema => {
            println!("{}", Config::json_schema_string()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Resolve build options: CLI flags, then config file, then defaults
fn site_options(args: &BuildArgs, config: &Config) -> SiteOptions {
    let defaults = SiteOptions::default();
    let paths = &config.paths;

    SiteOptions {
        content_dir: pick(&args.content, &paths.content, defaults.content_dir),
        static_dir: pick(&args.static_dir, &paths.static_dir, defaults.static_dir),
        template: pick(&args.template, &paths.template, defaults.template),
        output_dir: pick(&args.output, &paths.output, defaults.output_dir),
        parallel_jobs: args.jobs.or(config.build.jobs),
    }
}

fn pick(flag: &Option<PathBuf>, configured: &Option<PathBuf>, default: PathBuf) -> PathBuf {
    flag.clone().or_else(|| configured.clone()).unwrap_or(default)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::load_from_dir(Path::new("."))?.unwrap_or_default()),
    }
}

fn build(args: BuildArgs, quiet: bool) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let options = site_options(&args, &config);

    let report = build_site(&options).context("Site build failed")?;

    for (file, e) in &report.pages.failed_files {
        eprintln!("Error converting {}: {}", file.display(), e);
    }

    let success_count = report.pages.success_count;
    let failed_count = report.pages.failed_files.len();

    if !quiet {
        if let Some(assets) = report.assets {
            eprintln!(
                "Copied {} static files in {} directories",
                assets.files, assets.directories
            );
        }
        eprintln!("Generated {} pages, {} failed", success_count, failed_count);
    }

    if failed_count > 0 {
        anyhow::bail!("{} pages failed to generate", failed_count);
    }

    Ok(())
}

fn read_markdown(input: &Path) -> Result<String> {
    fs::read_to_string(input).with_context(|| format!("Failed to read: {}", input.display()))
}

fn render(input: &Path, json: bool) -> Result<()> {
    let markdown = read_markdown(input)?;
    let root = markdown_to_html_node(&markdown)
        .with_context(|| format!("Failed to convert: {}", input.display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&root).context("Failed to serialize element tree")?
        );
    } else {
        println!("{}", root.to_html()?);
    }
    Ok(())
}

#[derive(Serialize)]
struct BlockView {
    #[serde(rename = "type")]
    block_type: BlockType,
    text: String,
}

fn blocks(input: &Path) -> Result<()> {
    let markdown = read_markdown(input)?;
    let views: Vec<BlockView> = split_blocks(&markdown)
        .into_iter()
        .map(|text| BlockView {
            block_type: classify(&text),
            text,
        })
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&views).context("Failed to serialize blocks")?
    );
    Ok(())
}

fn init(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(path, Config::sample().to_toml()?)
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
