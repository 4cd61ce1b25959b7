// DevFinder - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Tag catalog loading (built-in + user-defined)
// 4. Background dataset load, waiting for the "data loaded" signal
// 5. One-shot output, or the interactive command loop

mod render;

use clap::{Parser, ValueEnum};
use devfinder::app::command::{self, Command};
use devfinder::app::loader::LoadManager;
use devfinder::app::state::{AppState, DataStatus};
use devfinder::core::model::{FilterParameters, MatchMode};
use devfinder::platform::config::{self as app_config, AppConfig, PlatformPaths};
use devfinder::util::error::{ExportError, Result};
use devfinder::{app, core as devcore, util};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Output format for one-shot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(name = "devfinder", version, about = "Browse developers by language and name")]
struct Cli {
    /// People dataset (JSON array). Defaults to `[data] path` from
    /// config.toml, then devs.json in the data directory.
    data: Option<PathBuf>,

    /// Select a language tag (repeatable, or comma-separated).
    /// Replaces the default selection.
    #[arg(short = 't', long = "tag")]
    tags: Vec<String>,

    /// Start with no language selected.
    #[arg(long = "no-tags", conflicts_with = "tags")]
    no_tags: bool,

    /// Tag match mode: any (at least one) or all (exact set).
    #[arg(short = 'm', long = "mode")]
    mode: Option<MatchMode>,

    /// Name search text (case, accents and spaces ignored).
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Output format for one-shot mode.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write one-shot output to a file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Read commands from stdin and re-filter after each one.
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// User tag catalog (TOML) overriding the configured one.
    #[arg(long = "catalog")]
    catalog: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let (config, config_warnings) = match load_app_config(&cli, &platform_paths) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    util::logging::init(cli.debug, config.log_level.as_deref(), config.log_file.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "DevFinder starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    // Catalog: CLI override > config > platform default
    let catalog_path = cli
        .catalog
        .clone()
        .or_else(|| config.catalog_file.clone())
        .unwrap_or_else(|| platform_paths.user_catalog.clone());
    let (catalog, catalog_errors) = app::catalog_mgr::load_catalog(Some(&catalog_path));
    for err in &catalog_errors {
        tracing::warn!(error = %err, "Catalog loading warning");
        eprintln!("Warning: {err}");
    }

    let filter = initial_filter(&cli, &config, catalog.default_active());
    let mut state = AppState::new(catalog, filter);

    // Dataset: CLI > config > platform default
    let dataset_path = cli
        .data
        .clone()
        .or_else(|| config.dataset_path.clone())
        .unwrap_or_else(|| platform_paths.default_dataset());

    let mut loader = LoadManager::new();
    loader.start_load(dataset_path);
    for msg in loader.wait_for_dataset() {
        state.handle_load_progress(msg);
    }

    if let DataStatus::Unavailable { reason } = state.status() {
        eprintln!("Error: Dataset unavailable: {reason}");
        std::process::exit(1);
    }

    let result = if cli.interactive {
        run_interactive(&mut state)
    } else {
        write_once(&state, cli.format, cli.output.as_deref())
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Output failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load config.toml. A config file named on the command line must exist
/// and parse; the platform default is optional and degrades to warnings.
fn load_app_config(
    cli: &Cli,
    paths: &PlatformPaths,
) -> Result<(AppConfig, Vec<String>)> {
    match cli.config {
        Some(ref path) => {
            let raw = app_config::read_raw_config(path)?;
            let mut warnings = Vec::new();
            let base_dir = path.parent().unwrap_or(Path::new("."));
            let config = app_config::validate_config(raw, base_dir, &mut warnings);
            Ok((config, warnings))
        }
        None => Ok(app_config::load_config(&paths.config_file())),
    }
}

/// Initial filter: CLI flags > config.toml > catalog defaults.
fn initial_filter(
    cli: &Cli,
    config: &AppConfig,
    catalog_defaults: std::collections::BTreeSet<String>,
) -> FilterParameters {
    let tags: Vec<String> = if !cli.tags.is_empty() {
        cli.tags
            .iter()
            .flat_map(|t| t.split(','))
            .map(str::to_string)
            .collect()
    } else if cli.no_tags {
        Vec::new()
    } else if let Some(ref tags) = config.initial_tags {
        tags.clone()
    } else {
        catalog_defaults.into_iter().collect()
    };

    let mode = cli.mode.unwrap_or(config.match_mode);
    let search = cli.search.as_deref().unwrap_or(&config.initial_search);

    FilterParameters::new(tags, mode, search)
}

/// One-shot mode: render the current view once.
fn write_once(
    state: &AppState,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let export_path = output.unwrap_or(Path::new("<stdout>"));
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(io::BufWriter::new(std::fs::File::create(path).map_err(
            |e| ExportError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        )?)),
        None => Box::new(io::stdout().lock()),
    };

    let records = state.visible_records();
    let count = match format {
        OutputFormat::Text => {
            render::render_people(state, writer).map_err(|e| ExportError::Io {
                path: export_path.to_path_buf(),
                source: e,
            })?;
            state.result_count()
        }
        OutputFormat::Json => devcore::export::export_json(&records, writer, export_path)?,
        OutputFormat::Csv => devcore::export::export_csv(&records, writer, export_path)?,
    };

    tracing::info!(count, format = ?format, target = %export_path.display(), "Results written");
    Ok(())
}

/// Interactive mode: one command per line; each filter change re-renders.
fn run_interactive(state: &mut AppState) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let io_err = |e: io::Error| ExportError::Io {
        path: PathBuf::from("<stdout>"),
        source: e,
    };

    render::render_people(state, &mut stdout).map_err(io_err)?;
    writeln!(stdout, "Type 'help' for commands.").map_err(io_err)?;

    loop {
        write!(stdout, "> ").map_err(io_err)?;
        stdout.flush().map_err(io_err)?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(io_err)? == 0 {
            break; // EOF
        }

        let command = match command::parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "{e}").map_err(io_err)?;
                continue;
            }
        };

        if command::apply_command(state, &command) {
            render::render_people(state, &mut stdout).map_err(io_err)?;
            continue;
        }

        match command {
            Command::Show => render::render_people(state, &mut stdout).map_err(io_err)?,
            Command::Tags => render::render_tags(state, &mut stdout).map_err(io_err)?,
            Command::Help => writeln!(stdout, "{}", command::HELP_TEXT).map_err(io_err)?,
            Command::Quit => break,
            _ => {}
        }
    }

    tracing::debug!("Interactive session ended");
    Ok(())
}
