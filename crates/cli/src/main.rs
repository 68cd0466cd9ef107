//! crumbtrail CLI
//!
//! Renders the breadcrumb trail for a request against a site described in
//! YAML or JSON.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use crumbtrail_core::{
    format_output, load_document, Breadcrumbs, BreadcrumbsOptions, Direction, Hooks, Link,
    OutputFormat, RequestContext, SiteSnapshot,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Breadcrumb trails for content-managed sites
#[derive(Parser)]
#[command(name = "crumbtrail")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render breadcrumb trails for a page of a content-managed site")]
#[command(long_about = r#"
crumbtrail: Breadcrumb Trails for Content-Managed Sites

Collects the crumbs from the site root to the current page (front page,
archives, single posts, taxonomy terms, search, 404, paginated listings)
and renders them as an HTML fragment.

The site is described by a YAML or JSON snapshot (posts, terms, taxonomies,
post types, authors). The request gives the page type tags, page number and
query variables.

Examples:
  crumbtrail render --site site.yaml --request request.yaml
  crumbtrail render --site site.yaml --request request.yaml --rtl
  crumbtrail links --site site.json --request request.json --format ansi
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Render the trail as HTML (or a JSON/YAML report)
    Render(TrailArgs),

    /// List the collected crumbs
    Links(TrailArgs),
}

/// Inputs shared by every subcommand
#[derive(ClapArgs, Clone)]
pub struct TrailArgs {
    /// Site snapshot (.yaml, .yml or .json)
    #[arg(long)]
    pub site: PathBuf,

    /// Request description (.yaml, .yml or .json)
    #[arg(long)]
    pub request: PathBuf,

    /// Breadcrumb options file (.yaml, .yml or .json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Render right-to-left
    #[arg(long)]
    pub rtl: bool,

    /// Label of the home crumb
    #[arg(long)]
    pub home_label: Option<String>,

    /// Delimiter between crumbs
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Text before the trail
    #[arg(long)]
    pub before: Option<String>,

    /// Text after the trail
    #[arg(long)]
    pub after: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Html,
    Json,
    Yaml,
    Summary,
    Ansi,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match &args.command {
        Commands::Render(trail) => run_render(trail),
        Commands::Links(trail) => run_links(trail),
    }
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build breadcrumb options from the options file and flags
fn build_options(args: &TrailArgs) -> Result<BreadcrumbsOptions> {
    let mut options = match &args.config {
        Some(path) => load_document::<BreadcrumbsOptions>(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => BreadcrumbsOptions::new(),
    };

    if args.rtl {
        options = options.with_direction(Direction::Rtl);
    }
    if let Some(label) = &args.home_label {
        options = options.with_home_label(label.clone());
    }
    if let Some(delimiter) = &args.delimiter {
        options = options.with_delimiter(delimiter.clone());
    }
    if let Some(before) = &args.before {
        options = options.with_before(before.clone());
    }
    if let Some(after) = &args.after {
        options = options.with_after(after.clone());
    }

    Ok(options)
}

fn collect(args: &TrailArgs) -> Result<Breadcrumbs> {
    let site = SiteSnapshot::from_path(&args.site)
        .with_context(|| format!("Failed to load site from {}", args.site.display()))?;
    let request: RequestContext = load_document(&args.request)
        .with_context(|| format!("Failed to load request from {}", args.request.display()))?;
    let config = build_options(args)?.build();

    let breadcrumbs = Breadcrumbs::new(&request, &site, config, &Hooks::new());
    tracing::info!(crumbs = breadcrumbs.links().len(), "collected trail");
    Ok(breadcrumbs)
}

fn run_render(args: &TrailArgs) -> Result<()> {
    let breadcrumbs = collect(args)?;

    let output = match args.format.clone().unwrap_or(OutputFormatArg::Html) {
        OutputFormatArg::Html => format_output(&breadcrumbs, OutputFormat::Html)?,
        OutputFormatArg::Json => format_output(&breadcrumbs, OutputFormat::Json)?,
        OutputFormatArg::Yaml => format_output(&breadcrumbs, OutputFormat::Yaml)?,
        OutputFormatArg::Summary => format_output(&breadcrumbs, OutputFormat::Summary)?,
        OutputFormatArg::Ansi => format_links_ansi(breadcrumbs.links()),
    };

    write_output(&output, args.output.as_ref())
}

fn run_links(args: &TrailArgs) -> Result<()> {
    let breadcrumbs = collect(args)?;
    let links = breadcrumbs.links();

    let output = match args.format.clone().unwrap_or(OutputFormatArg::Summary) {
        OutputFormatArg::Json => serde_json::to_string_pretty(links)?,
        OutputFormatArg::Yaml => serde_yaml::to_string(links)?,
        OutputFormatArg::Ansi => format_links_ansi(links),
        OutputFormatArg::Html | OutputFormatArg::Summary => format_links_plain(links),
    };

    write_output(&output, args.output.as_ref())
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn format_links_plain(links: &[Link]) -> String {
    links
        .iter()
        .enumerate()
        .map(|(i, link)| match &link.url {
            Some(url) => format!("{}. {} <{}>", i + 1, link.label, url),
            None => format!("{}. {}", i + 1, link.label),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_links_ansi(links: &[Link]) -> String {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    if links.is_empty() {
        return "(no crumbs)".dimmed().to_string();
    }

    links
        .iter()
        .map(|link| match &link.url {
            Some(url) => format!("{} {}", link.label.cyan().bold(), format!("<{}>", url).dimmed()),
            None => link.label.yellow().bold().to_string(),
        })
        .collect::<Vec<_>>()
        .join(&format!(" {} ", ">".dimmed()))
}
