//! Review list - Entry Point
//!
//! Drives the paging controller and layout engine against a JSON file the
//! way a scroll host would, then prints every row with its height.

use clap::Parser;
use revlist::cache::ContentCache;
use revlist::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ResolvedConfig,
};
use revlist::model::AppError;
use revlist::source::{FileImageFetcher, JsonFileSource};
use revlist::state::{PagingController, RowFactory};
use revlist::view::{
    ImagePolicy, LoadOutcome, MonospaceMeasurer, PhotoStrip, StarRatingRenderer, Typography,
};
use revlist::view_state::layout::ItemLayoutEngine;
use revlist::view_state::list::ReviewListViewState;
use revlist::view_state::row::{RowItem, RowsSnapshot};
use revlist::view_state::scroll::ScrollPosition;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Consecutive fetches that may fail before the fling stops retrying.
const MAX_FAILED_FETCHES: usize = 3;

/// Review list - lay out and page through a JSON file of reviews
#[derive(Parser, Debug)]
#[command(name = "revlist")]
#[command(version)]
#[command(about = "Page through a JSON review file and print computed row heights")]
pub struct Args {
    /// Path to JSON file of the form { "items": [...], "count": N }
    pub file: PathBuf,

    /// Row width in points
    #[arg(short, long, default_value_t = 375.0)]
    pub width: f64,

    /// Viewport height in points
    #[arg(long, default_value_t = 667.0)]
    pub viewport: f64,

    /// Toggle expansion of the row at this index (repeatable)
    #[arg(short, long = "expand", value_name = "ROW")]
    pub expand: Vec<usize>,

    /// Reviews per page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Lines shown for a collapsed review body (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub collapsed_lines: Option<u32>,

    /// Bind every review's photos to a photo strip and report load outcomes
    #[arg(long)]
    pub photos: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(&args)?;
    config.validate()?;

    revlist::logging::init(&config.log_file_path, "info")?;
    info!(config = ?config, "Configuration loaded and resolved");

    let source = JsonFileSource::open(&args.file)?;
    info!(
        path = %args.file.display(),
        items = source.item_count(),
        count = source.reported_count(),
        "Review source opened"
    );

    let typography = Typography::default();
    let engine = ItemLayoutEngine::new(Arc::new(MonospaceMeasurer::new()), &typography)
        .with_collapsed_lines(config.collapsed_lines)
        .with_max_photos(config.max_photos);
    let factory = RowFactory::new(typography, Arc::new(StarRatingRenderer::default()));

    let mut controller = PagingController::new(
        Arc::new(source),
        factory,
        engine.clone(),
        config.paging_config(),
    );
    let rows = controller.subscribe_rows();

    let mut list = ReviewListViewState::new(engine, args.width);
    list.set_viewport_height(args.viewport);

    fling_to_end(&mut controller, &mut list, &rows);
    apply_expansions(&mut controller, &mut list, &rows, &args.expand);

    for line in report_lines(&list) {
        println!("{line}");
    }

    if args.photos {
        let counts = bind_photos(&list, &config, &args.file)?;
        println!("{}", counts.summary());
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    let page_size = args.page_size.map(|n| n as usize);
    let collapsed_lines = args.collapsed_lines.map(|n| n as usize);
    Ok(apply_cli_overrides(with_env, page_size, collapsed_lines))
}

fn drain_rows(list: &mut ReviewListViewState, rows: &Receiver<RowsSnapshot>) {
    while let Ok(snapshot) = rows.try_recv() {
        let remeasured = list.apply_snapshot(snapshot);
        info!(rows = list.row_count(), remeasured, "Rows applied");
    }
}

/// Load the first page, then keep scrolling to the bottom and feeding the
/// prefetch trigger until the source is exhausted.
fn fling_to_end(
    controller: &mut PagingController,
    list: &mut ReviewListViewState,
    rows: &Receiver<RowsSnapshot>,
) {
    controller.request_next_page();
    let mut failures = 0;

    loop {
        let offset_before = controller.page_state().offset();
        controller.wait_and_pump();
        drain_rows(list, rows);

        if controller.page_state().offset() == offset_before {
            failures += 1;
            if failures >= MAX_FAILED_FETCHES {
                warn!(failures, "Giving up after repeated fetch failures");
                break;
            }
        } else {
            failures = 0;
        }

        list.scroll_to(ScrollPosition::Bottom);
        if !controller.on_scroll_will_end(list.scroll_metrics()) {
            break;
        }
    }
}

fn apply_expansions(
    controller: &mut PagingController,
    list: &mut ReviewListViewState,
    rows: &Receiver<RowsSnapshot>,
    indices: &[usize],
) {
    for &index in indices {
        let Some(id) = list.row(index).and_then(RowItem::as_review).map(|r| r.id()) else {
            warn!(index, "No review row at index; expansion ignored");
            continue;
        };
        controller.toggle_expansion(id);
        drain_rows(list, rows);
    }
}

fn describe_row(item: &RowItem) -> String {
    match item {
        RowItem::Review(row) => {
            let marker = if row.expansion().is_expanded() {
                " [expanded]"
            } else {
                ""
            };
            format!(
                "{} {}{}",
                row.rating().to_text(),
                row.full_name().text(),
                marker
            )
        }
        RowItem::Summary(row) => row.label().text().to_string(),
    }
}

fn report_lines(list: &ReviewListViewState) -> Vec<String> {
    let mut lines: Vec<String> = (0..list.row_count())
        .filter_map(|i| {
            let item = list.row(i)?;
            let height = list.height_for_row(i)?;
            Some(format!("{i:>4}  {height:>8.1}  {}", describe_row(item)))
        })
        .collect();
    lines.push(format!("content height: {:.1}", list.content_height()));
    lines
}

/// Tally of photo load outcomes across all review rows.
#[derive(Debug, Default, PartialEq, Eq)]
struct PhotoCounts {
    fetching: usize,
    cache_hits: usize,
    unchanged: usize,
    rejected: usize,
}

impl PhotoCounts {
    fn record(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Fetching => self.fetching += 1,
            LoadOutcome::CacheHit => self.cache_hits += 1,
            LoadOutcome::Unchanged => self.unchanged += 1,
            LoadOutcome::Rejected(_) => self.rejected += 1,
        }
    }

    fn summary(&self) -> String {
        format!(
            "photos: {} fetching, {} cached, {} unchanged, {} rejected",
            self.fetching, self.cache_hits, self.unchanged, self.rejected
        )
    }
}

fn base_url_for(file: &Path) -> Option<Url> {
    let dir = std::fs::canonicalize(file).ok()?.parent()?.to_path_buf();
    Url::from_directory_path(dir).ok()
}

/// Reuse one strip for every review row, as a recycling list would.
fn bind_photos(
    list: &ReviewListViewState,
    config: &ResolvedConfig,
    file: &Path,
) -> Result<PhotoCounts, AppError> {
    let cache = Arc::new(ContentCache::new(config.cache_capacity)?);
    let policy = ImagePolicy {
        allow_insecure: config.allow_insecure_images,
        base: base_url_for(file),
    };
    let strip = PhotoStrip::new(
        config.max_photos,
        cache,
        Arc::new(FileImageFetcher::new()),
        policy,
    );

    let mut counts = PhotoCounts::default();
    for review in list.rows().iter().filter_map(RowItem::as_review) {
        strip.prepare_for_reuse();
        for outcome in strip.configure(review.photo_urls()) {
            counts.record(outcome);
        }
    }
    Ok(counts)
}
