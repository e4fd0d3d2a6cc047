mod local;
mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use proxy_deck::{distribute_into_columns, group_by_type, load_deck_list};
use proxy_layout::constants::{mm_to_pt, pt_to_mm};
use proxy_layout::{GuideStyle, Orientation, PageLayoutConfig, PaperSize};
use proxy_runtime::{
    CancelSignal, CardProvider, ImportReport, PdfFileSink, PrintCoordinator, PrintOutcome,
    ProxyUpdate, RequestQueue, cancellation, import_deck_lines,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use local::{DirectoryProvider, FileImageLoader};
use logger::CliLogger;

#[derive(Parser)]
#[command(name = "proxies", about = "Print sheets of card proxies", version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a deck list and print it to PDF
    Print {
        /// Deck list file (one `[quantity ]name[ [SET]]` per line)
        #[arg(short, long)]
        list: PathBuf,

        /// Directory of card images
        #[arg(short, long)]
        images: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        pacing: PacingArgs,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Import a deck list and show it grouped by card type
    Deck {
        /// Deck list file
        #[arg(short, long)]
        list: PathBuf,

        /// Directory of card images
        #[arg(short, long)]
        images: PathBuf,

        /// Number of display columns
        #[arg(long, default_value = "3")]
        columns: usize,

        #[command(flatten)]
        pacing: PacingArgs,
    },

    /// Search the image directory for cards
    Search {
        /// Part of a card name
        term: String,

        /// Directory of card images
        #[arg(short, long)]
        images: PathBuf,
    },

    /// Write a layout configuration file
    Config {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Layout configuration file (JSON); other layout flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paper size
    #[arg(long, default_value = "a4", value_enum)]
    paper: PaperArg,

    /// Paper orientation
    #[arg(long, default_value = "portrait", value_enum)]
    orientation: OrientationArg,

    /// Cut guides
    #[arg(long, value_enum)]
    guides: Option<GuidesArg>,

    /// Card width in mm
    #[arg(long)]
    card_width_mm: Option<f32>,

    /// Card height in mm
    #[arg(long)]
    card_height_mm: Option<f32>,

    /// Gap between cards in points
    #[arg(long)]
    spacing_pt: Option<f32>,

    /// Page padding in points
    #[arg(long)]
    padding_pt: Option<f32>,

    /// Crosshair arm length in points
    #[arg(long)]
    crosshair_length_pt: Option<f32>,
}

#[derive(Args)]
struct PacingArgs {
    /// Delay before each card or image request, in milliseconds
    #[arg(long, default_value = "100")]
    delay_ms: u64,

    /// Give up on a single request after this many milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum GuidesArg {
    None,
    Border,
    Crosshair,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<GuidesArg> for GuideStyle {
    fn from(arg: GuidesArg) -> Self {
        match arg {
            GuidesArg::None => Self::None,
            GuidesArg::Border => Self::BorderLines,
            GuidesArg::Crosshair => Self::CrosshairMarks,
        }
    }
}

impl LayoutArgs {
    async fn to_config(&self) -> Result<PageLayoutConfig> {
        let mut config = match &self.config {
            Some(path) => PageLayoutConfig::load(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => PageLayoutConfig::for_paper(self.paper.into(), self.orientation.into()),
        };

        if let Some(guides) = self.guides {
            config.guide_style = guides.into();
        }
        if let Some(width) = self.card_width_mm {
            config.item_width_pt = mm_to_pt(width);
        }
        if let Some(height) = self.card_height_mm {
            config.item_height_pt = mm_to_pt(height);
        }
        if let Some(spacing) = self.spacing_pt {
            config.spacing_pt = spacing;
        }
        if let Some(padding) = self.padding_pt {
            config.padding_pt = padding;
        }
        if let Some(length) = self.crosshair_length_pt {
            config.crosshair_length_pt = length;
        }

        config.validate()?;
        Ok(config)
    }
}

impl PacingArgs {
    fn queue(&self) -> RequestQueue {
        let queue = RequestQueue::new(
            Duration::from_millis(self.delay_ms),
            Duration::from_millis(self.timeout_ms),
        );
        log::debug!(
            "Request pacing: {:?} delay, {:?} timeout",
            queue.delay(),
            queue.timeout()
        );
        queue
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = CliLogger::new(500, level);
    logger.clone().init()?;

    match cli.command {
        Commands::Print {
            list,
            images,
            output,
            layout,
            pacing,
            stats_only,
        } => {
            let config = layout.to_config().await?;
            let provider = DirectoryProvider::scan(&images).await?;
            let mut cancel = cancel_on_ctrl_c();

            let report = import(&list, &provider, &pacing, &mut cancel).await?;
            print_import_summary(&report);

            let stats = match proxy_layout::calculate_statistics(
                report.deck.total() as usize,
                &config,
            ) {
                Ok(stats) => stats,
                Err(proxy_layout::LayoutError::NoPages) => {
                    println!("Nothing to print");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            println!("Print Statistics:");
            println!("  Cards: {}", stats.item_count);
            println!(
                "  Card size: {:.1} x {:.1} mm",
                pt_to_mm(config.item_width_pt),
                pt_to_mm(config.item_height_pt)
            );
            println!(
                "  Grid: {} x {} ({} per page)",
                stats.items_per_row, stats.items_per_column, stats.items_per_page
            );
            println!("  Pages: {}", stats.pages);
            println!("  Empty slots: {}", stats.empty_slots);
            println!("  Guides: {}", config.guide_style.name());

            if stats_only {
                return Ok(());
            }

            let (update_tx, update_rx) = mpsc::unbounded_channel();
            let reporter = tokio::spawn(report_updates(update_rx));

            let coordinator =
                PrintCoordinator::new(FileImageLoader, config).with_queue(pacing.queue());
            let mut sink = PdfFileSink::new(&output);
            let outcome = coordinator
                .run(&report.deck, &mut sink, &update_tx, &mut cancel)
                .await;

            drop(update_tx);
            reporter.await?;

            match outcome? {
                PrintOutcome::Empty => println!("Nothing to print"),
                PrintOutcome::Emitted {
                    output,
                    pages,
                    placements,
                    failed_images,
                } => {
                    println!(
                        "Printed {} cards on {} pages → {}",
                        placements,
                        pages,
                        output.display()
                    );
                    if !failed_images.is_empty() {
                        println!("  {} images left blank", failed_images.len());
                    }
                }
            }

            let warnings = logger.warning_count();
            if warnings > 0 {
                println!("  {} warnings, rerun with --verbose for details", warnings);
            }
        }

        Commands::Deck {
            list,
            images,
            columns,
            pacing,
        } => {
            let provider = DirectoryProvider::scan(&images).await?;
            let mut cancel = cancel_on_ctrl_c();

            let report = import(&list, &provider, &pacing, &mut cancel).await?;
            print_import_summary(&report);

            println!("Deck ({} cards)", report.deck.total());
            let groups = group_by_type(&report.deck);
            for (i, column) in distribute_into_columns(&groups, columns)
                .iter()
                .enumerate()
            {
                if column.is_empty() {
                    continue;
                }
                println!("Column {}:", i + 1);
                for group in column {
                    println!("  {} ({})", group.category.name(), group.card_count());
                    for entry in &group.entries {
                        println!("    {} {}", entry.quantity, entry.name);
                    }
                }
            }
        }

        Commands::Search { term, images } => {
            let provider = DirectoryProvider::scan(&images).await?;
            let matches = provider.search(&term).await?;
            if matches.is_empty() {
                bail!("No cards match \"{}\"", term);
            }

            let mut names: Vec<&str> = matches.iter().map(|card| card.name.as_str()).collect();
            names.dedup();

            for name in names {
                let printings = provider.printings(name).await?;
                let sets: Vec<&str> = printings
                    .iter()
                    .map(|card| card.set.as_deref().unwrap_or("-"))
                    .collect();
                println!("{} [{}]", name, sets.join(", "));
            }
        }

        Commands::Config { output, layout } => {
            let config = layout.to_config().await?;
            config.save(&output).await?;
            println!("Wrote layout configuration → {}", output.display());
        }
    }

    Ok(())
}

/// Cancel signal that fires on Ctrl-C
fn cancel_on_ctrl_c() -> CancelSignal {
    let (handle, signal) = cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling");
            handle.cancel();
        }
    });
    signal
}

async fn import(
    list: &Path,
    provider: &DirectoryProvider,
    pacing: &PacingArgs,
    cancel: &mut CancelSignal,
) -> Result<ImportReport> {
    let lines = load_deck_list(list)
        .await
        .with_context(|| format!("Failed to read deck list {}", list.display()))?;
    log::info!("Importing {} lines from {}", lines.len(), list.display());

    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(report_updates(update_rx));

    let report = import_deck_lines(&lines, provider, &pacing.queue(), &update_tx, cancel).await;

    drop(update_tx);
    reporter.await?;
    Ok(report?)
}

fn print_import_summary(report: &ImportReport) {
    println!(
        "Imported {} lines, {} cards",
        report.resolved,
        report.deck.total()
    );
    if !report.not_found.is_empty() {
        println!("Not found:");
        for name in &report.not_found {
            println!("  {}", name);
        }
    }
}

async fn report_updates(mut update_rx: mpsc::UnboundedReceiver<ProxyUpdate>) {
    while let Some(update) = update_rx.recv().await {
        match update {
            ProxyUpdate::ResolveStarted { sources } => {
                log::info!("Loading {} images", sources);
            }
            ProxyUpdate::Progress {
                completed,
                total,
                percent,
            } => {
                log::info!("Images {}/{} ({}%)", completed, total, percent);
            }
            ProxyUpdate::ImportProgress {
                completed,
                total,
                percent,
            } => {
                log::debug!("Looked up {}/{} lines ({}%)", completed, total, percent);
            }
            ProxyUpdate::ImageFailed { source, message } => {
                log::debug!("Blank slot for {}: {}", source, message);
            }
            ProxyUpdate::CardNotFound { name } => {
                log::warn!("Card not found: {}", name);
            }
            ProxyUpdate::Emitted { pages, placements } => {
                log::debug!("Sink received {} placements on {} pages", placements, pages);
            }
            ProxyUpdate::Cancelled => {
                log::warn!("Cancelled");
            }
        }
    }
}
