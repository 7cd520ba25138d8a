//! Mapforge CLI
//!
//! - `build`: CSV tables → model → every data-pack artifact on disk
//! - `locations`: filter location rows by owner, core, region, ...
//! - `templates`: validate the template set and list its placeholders

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use mapforge_core::{LocalizationSource, LocationFilter, LocationRecord, Model};
use mapforge_export::{EmitOptions, TemplateKind, TemplateSet};
use mapforge_template::PlaceholderKind;
use tracing_subscriber::EnvFilter;

mod config;
mod sink;
mod tables;

use config::{Config, DEFAULT_CONFIG};
use sink::DirectorySink;

const DEFAULT_LOG_FILTER: &str = "mapforge=info";

#[derive(Parser)]
#[command(name = "mapforge")]
#[command(author, version, about = "Mapforge: map tables to game data-pack files")]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. `debug` or `mapforge_core=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model and write every artifact.
    Build {
        /// Manifest (`mapforge.toml`)
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Output root (overrides `[output].dir`)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Template override directory (overrides `[templates].dir`)
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Write engine files without a UTF-8 BOM
        #[arg(long)]
        no_bom: bool,
    },

    /// List locations matching every given filter.
    Locations {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
        /// Print only the number of matches
        #[arg(long)]
        count: bool,
    },

    /// Parse the template set and list each template's placeholders.
    Templates {
        /// Manifest to read `[templates].dir` from
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Template override directory (overrides the manifest)
        #[arg(long)]
        templates: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Owner tag
    #[arg(long)]
    owner: Option<String>,
    /// Tag present in the core list
    #[arg(long)]
    core: Option<String>,
    #[arg(long)]
    continent: Option<String>,
    #[arg(long)]
    superregion: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long)]
    religion: Option<String>,
    #[arg(long)]
    culture: Option<String>,
    /// e.g. `sea`
    #[arg(long)]
    location_type: Option<String>,
}

impl From<FilterArgs> for LocationFilter {
    fn from(args: FilterArgs) -> Self {
        LocationFilter {
            owner: args.owner,
            core: args.core,
            continent: args.continent,
            superregion: args.superregion,
            region: args.region,
            area: args.area,
            religion: args.religion,
            culture: args.culture,
            location_type: args.location_type,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Build {
            config,
            out,
            templates,
            no_bom,
        } => cmd_build(&config, out, templates, no_bom),
        Commands::Locations {
            config,
            filter,
            count,
        } => cmd_locations(&config, filter.into(), count),
        Commands::Templates { config, templates } => {
            cmd_templates(config.as_deref(), templates)
        }
    }
}

fn init_logging(flag: Option<&str>) {
    let filter = match flag {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// build
// ============================================================================

fn cmd_build(
    config_path: &Path,
    out: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    no_bom: bool,
) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if let Some(out) = out {
        config.output.dir = out;
    }
    if templates_dir.is_some() {
        config.templates.dir = templates_dir;
    }
    if no_bom {
        config.output.bom = false;
    }

    println!("{} {}", "Loading".green().bold(), config_path.display());
    let inputs = tables::load_inputs(&config)?;
    let templates = load_templates(config.templates.dir.as_deref())?;
    let language = output_language(
        config.localization.language.as_deref(),
        inputs.localization.as_ref(),
    );
    tracing::debug!(%language, "localization language");

    println!("{} model", "Building".green().bold());
    let model = Model::build(inputs);
    print_model_summary(&model);

    let options = EmitOptions { language };
    let mut sink = DirectorySink::new(&config.output.dir, config.output.bom);
    let summary = mapforge_export::run(&model, &templates, &options, &mut sink)
        .with_context(|| format!("failed to write artifacts to {}", sink.root().display()))?;
    tracing::debug!(files = sink.written().len(), "directory sink finished");
    if sink.overwritten() > 0 {
        println!(
            "  {} {} artifacts mapped to an already written path",
            "!".red().bold(),
            sink.overwritten()
        );
    }

    println!(
        "{} {} artifacts ({} bytes)",
        "Wrote".green().bold(),
        summary.artifacts,
        summary.bytes
    );
    println!("  {} {}", "→".cyan(), sink.root().display());
    Ok(())
}

/// Manifest setting, else the source's `l_<lang>:` header, else english.
fn output_language(configured: Option<&str>, source: Option<&LocalizationSource>) -> String {
    configured
        .or_else(|| source.and_then(LocalizationSource::language))
        .unwrap_or(mapforge_export::DEFAULT_LANGUAGE)
        .to_string()
}

fn print_model_summary(model: &Model) {
    for (level, count) in model.geography.counts() {
        println!("  {} {:<12} {}", "→".yellow(), level.label(), count);
    }
    println!("  {} {:<12} {}", "→".yellow(), "country", model.countries.len());
    println!("  {} {:<12} {}", "→".yellow(), "ruler", model.rulers.len());

    let report = &model.report;
    println!(
        "  {} localized {}, fallback {}, unmatched {}",
        "→".yellow(),
        report.localization.matched,
        report.localization.fallbacks,
        report.localization.unmatched
    );
    let ownership = &report.ownership;
    println!(
        "  {} owned core {}, owned non-core {}, unowned core {}",
        "→".yellow(),
        ownership.owned_core,
        ownership.owned_non_core,
        ownership.unowned_core
    );
    if ownership.unresolved_tags > 0 || ownership.unresolved_rulers > 0 {
        println!(
            "  {} {} unresolved tags, {} rulers without a country",
            "!".red().bold(),
            ownership.unresolved_tags,
            ownership.unresolved_rulers
        );
    }
}

/// Built-in templates, with any file present in `dir` taking precedence.
fn load_templates(dir: Option<&Path>) -> Result<TemplateSet> {
    let mut overrides: Vec<Option<String>> = Vec::with_capacity(TemplateKind::ALL.len());
    for kind in TemplateKind::ALL {
        let text = match dir {
            Some(dir) => {
                let path = dir.join(kind.file_name());
                if path.is_file() {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read template {}", path.display()))?;
                    Some(text)
                } else {
                    None
                }
            }
            None => None,
        };
        overrides.push(text);
    }
    let set = TemplateSet::with_overrides(|kind| overrides[kind as usize].take())?;
    Ok(set)
}

// ============================================================================
// locations
// ============================================================================

fn cmd_locations(config_path: &Path, filter: LocationFilter, count: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let records: Vec<LocationRecord> = tables::read_records(&config.inputs.locations)?;
    let matches = filter.apply(&records);

    if count {
        println!("{}", matches.len());
        return Ok(());
    }
    for record in &matches {
        println!(
            "{}\t{}\t{}",
            record.location_name,
            record.province,
            mapforge_core::or_placeholder(&record.owner, "-")
        );
    }
    eprintln!(
        "{} {} of {} locations",
        "matched".green().bold(),
        matches.len(),
        records.len()
    );
    Ok(())
}

// ============================================================================
// templates
// ============================================================================

fn cmd_templates(config_path: Option<&Path>, templates_dir: Option<PathBuf>) -> Result<()> {
    let dir = match (templates_dir, config_path) {
        (Some(dir), _) => Some(dir),
        (None, Some(path)) => Config::load(path)?.templates.dir,
        (None, None) => None,
    };
    let set = load_templates(dir.as_deref())?;

    for kind in TemplateKind::ALL {
        println!("{} {}", "Template".green().bold(), kind.file_name());
        for (name, placeholder) in set.get(kind).placeholders() {
            let label = match placeholder {
                PlaceholderKind::Required => "required",
                PlaceholderKind::OptionalLine => "optional line",
                PlaceholderKind::OptionalInline => "optional inline",
            };
            println!("  {} {} ({})", "→".cyan(), name, label);
        }
    }
    match dir {
        Some(dir) => println!("{} overrides from {}", "ok".green().bold(), dir.display()),
        None => println!("{} built-in templates", "ok".green().bold()),
    }
    Ok(())
}
