//! timegaps - accept or reject items by time gaps.
//!
//! Usage:
//!   timegaps RULES ITEM...            Print rejected items
//!   timegaps --stdin RULES            Read items from stdin
//!   timegaps --delete RULES ITEM...   Delete rejected items
//!   timegaps --move DIR RULES ITEM... Move rejected items into DIR
//!   timegaps --help                   Show help

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result, bail, eyre};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use timegaps_core::{CollectConfig, Item, RuleSet, ScanError, TimeSource, unix_seconds};
use timegaps_filter::{FilterConfig, FilterReport, TimeFilter};
use timegaps_ops::{OperationExecutor, RetentionAction};
use timegaps_scan::{CollectedItem, ItemCollector, Separator, read_items};

#[derive(Parser)]
#[command(
    name = "timegaps",
    version,
    about = "Accept or reject items based on time gaps",
    long_about = "timegaps filters files or other items by their modification time, \
                  keeping a limited number of representatives per hour, day, week, \
                  month and year (generalized backup rotation).\n\n\
                  Rejected items are printed to stdout. With --delete or --move they \
                  are removed or relocated instead of only being reported."
)]
struct Cli {
    /// Retention rules, e.g. "days5,weeks4,months12,years5"
    #[arg(value_name = "RULES")]
    rules: String,

    /// Items to filter (paths)
    #[arg(value_name = "ITEM")]
    items: Vec<PathBuf>,

    /// Read items from stdin instead of the command line
    #[arg(short, long, conflicts_with = "items")]
    stdin: bool,

    /// Separate stdin items and output items with NUL instead of newline
    #[arg(short = '0', long)]
    nullsep: bool,

    /// Parse the time from each item's basename using a strftime format
    #[arg(short = 't', long, value_name = "FMT")]
    time_from_basename: Option<String>,

    /// Parse the time from each stdin item (not a path) using a strftime format
    #[arg(long, value_name = "FMT", conflicts_with = "time_from_basename")]
    time_from_string: Option<String>,

    /// Follow symbolic links when reading modification times
    #[arg(long)]
    follow_symlinks: bool,

    /// Delete rejected items
    #[arg(short, long, conflicts_with = "move_to")]
    delete: bool,

    /// Also delete non-empty directories
    #[arg(short = 'r', long)]
    recursive_delete: bool,

    /// Move rejected items into this existing directory
    #[arg(short = 'm', long = "move", value_name = "DIR")]
    move_to: Option<PathBuf>,

    /// Reference time in seconds since the Unix epoch (default: now)
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    reference_time: Option<i64>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Log decisions to stderr (-v: info, -vv: debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Rejected items, one per line
    #[default]
    Text,
    /// The full decision report
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    check_usage(&cli);
    init_logging(cli.verbose);

    // Rules are checked before anything touches the items.
    let rules = RuleSet::parse(&cli.rules).wrap_err("Invalid rules")?;
    debug!(%rules, "parsed rules");

    if !cli.stdin && cli.items.is_empty() {
        bail!("At least one item must be provided (if --stdin not set)");
    }

    let action = retention_action(&cli)?;
    let reference_time = cli
        .reference_time
        .unwrap_or_else(|| unix_seconds(SystemTime::now()));
    let separator = if cli.nullsep {
        Separator::Nul
    } else {
        Separator::Newline
    };

    let collector = ItemCollector::with_config(collect_config(&cli)?);
    let collected = if cli.stdin {
        let entries = read_items(io::stdin().lock(), separator)?;
        collector.collect_strings(&entries)?
    } else {
        collector.collect_paths(&cli.items)?
    };

    let items: Vec<Item> = collected.iter().map(|c| c.item.clone()).collect();
    let filter = TimeFilter::with_config(rules, FilterConfig::at(reference_time));
    debug!(
        rules = %filter.rules(),
        reference_time = filter.reference_time(),
        "filtering {} items",
        items.len()
    );
    let report = filter.decide(&items);
    log_report(&report);

    match cli.format {
        OutputFormat::Text => print_rejected(&report, &collected, separator)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    apply_action(&action, &report, &collected)
}

/// Set up logging to stderr; stdout carries the item list.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Argument combinations the derive attributes don't cover. Exits with
/// status 2 like any other usage error.
fn check_usage(cli: &Cli) {
    if cli.recursive_delete && !cli.delete {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "--recursive-delete requires --delete",
            )
            .exit();
    }
    if time_source(cli).needs_filesystem() {
        return;
    }
    if !cli.stdin {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "--time-from-string requires --stdin",
            )
            .exit();
    }
    if cli.delete || cli.move_to.is_some() {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--time-from-string items are not paths and cannot be deleted or moved",
            )
            .exit();
    }
}

fn time_source(cli: &Cli) -> TimeSource {
    match (&cli.time_from_basename, &cli.time_from_string) {
        (Some(format), _) => TimeSource::Basename {
            format: format.clone(),
        },
        (None, Some(format)) => TimeSource::Text {
            format: format.clone(),
        },
        (None, None) => TimeSource::Modified,
    }
}

fn collect_config(cli: &Cli) -> Result<CollectConfig> {
    let config = CollectConfig::builder()
        .follow_symlinks(cli.follow_symlinks)
        .time_source(time_source(cli))
        .build()
        .map_err(ScanError::from)?;
    Ok(config)
}

fn retention_action(cli: &Cli) -> Result<RetentionAction> {
    if cli.delete {
        return Ok(RetentionAction::delete(cli.recursive_delete));
    }
    if let Some(dir) = &cli.move_to {
        if !dir.is_dir() {
            bail!("--move: '{}' is not an existing directory", dir.display());
        }
        return Ok(RetentionAction::move_to(dir));
    }
    Ok(RetentionAction::Report)
}

/// Log each decision and the per-category summary.
fn log_report(report: &FilterReport) {
    for decision in &report.decisions {
        let period = decision
            .period
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        if decision.is_accepted() {
            info!(category = %decision.category, %period, "accepted: {}", decision.id);
        } else {
            info!(
                category = %decision.category,
                %period,
                verdict = ?decision.verdict,
                "rejected: {}",
                decision.id
            );
        }
    }

    for summary in &report.summaries {
        info!(
            category = %summary.category,
            items = summary.items,
            periods = summary.periods,
            accepted = summary.accepted,
            rejected = summary.rejected,
            "summary"
        );
    }
    info!(
        accepted = report.accepted_count(),
        rejected = report.rejected_count(),
        "done"
    );
}

/// Print rejected items in input order. Paths are written unmodified, so
/// names that are not valid UTF-8 survive a pipe into `xargs -0`.
fn print_rejected(
    report: &FilterReport,
    collected: &[CollectedItem],
    separator: Separator,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for decision in report.rejected() {
        match collected.get(decision.index).and_then(|c| c.path.as_deref()) {
            Some(path) => write_path(&mut out, path)?,
            None => out.write_all(decision.id.as_bytes())?,
        }
        out.write_all(separator.as_str().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(unix)]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    write!(out, "{}", path.display())
}

/// Delete or move rejected items.
fn apply_action(
    action: &RetentionAction,
    report: &FilterReport,
    collected: &[CollectedItem],
) -> Result<()> {
    if !action.is_mutating() {
        return Ok(());
    }

    let targets: Vec<PathBuf> = report
        .rejected()
        .filter_map(|d| collected.get(d.index).and_then(|c| c.path.clone()))
        .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("Failed to start runtime")?;

    let executor = OperationExecutor::new();
    let complete = runtime
        .block_on(executor.run(action, targets, |progress| {
            if let Some(item) = &progress.current_item {
                debug!(
                    item = %item.display(),
                    done = progress.items_completed,
                    total = progress.items_total,
                    "{}",
                    progress.operation_type
                );
            }
        }))
        .ok_or_else(|| eyre!("No operation was run"))?;

    for error in &complete.errors {
        eprintln!("{error}");
    }
    info!("{}", complete.summary());

    if !complete.is_success() {
        bail!(complete.summary());
    }
    Ok(())
}
