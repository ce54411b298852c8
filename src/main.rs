mod cli_args;

use anyhow::{Context, Result};
use log::{debug, info};

use cli_args::{CommandLineArgs, OutputFormat};
use utm_attribution::{AttributionTracker, PageContext, SessionStorage, Settings};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    info!(
        "UTM Attribution v{} starting up...",
        env!("CARGO_PKG_VERSION")
    );

    let cli_args = CommandLineArgs::parse_args();

    debug!("Loading application settings...");
    let settings = Settings::load_or_default(cli_args.settings.as_deref())?;

    let storage = settings.open_storage(&cli_args.session);
    let tracker = AttributionTracker::with_key(storage, &settings.storage_key);

    let current_page = visit_pages(&tracker, &cli_args.urls, cli_args.referrer.as_deref());
    print_output(&tracker, &current_page, cli_args.output)?;

    if cli_args.end_session {
        info!("Ending session '{}'", cli_args.session);
        tracker.clear();
    }

    Ok(())
}

/// Run the page-load hook for each URL in order and return the last page.
///
/// The first view uses the given referrer; later views are treated as
/// in-site navigation, with the previous view's full URL (query included)
/// as referrer.
fn visit_pages<S: SessionStorage>(
    tracker: &AttributionTracker<S>,
    urls: &[String],
    referrer: Option<&str>,
) -> PageContext {
    let mut current = PageContext::new("/", referrer);
    let mut previous_url: Option<String> = None;

    for (i, url) in urls.iter().enumerate() {
        let page_referrer = match previous_url.as_deref() {
            Some(previous) => Some(previous),
            None => referrer,
        };
        let page = PageContext::new(url, page_referrer);
        debug!("Page view {}/{}: {}", i + 1, urls.len(), page.href());

        tracker.capture_or_update(&page);
        previous_url = Some(url.trim().to_string());
        current = page;
    }

    current
}

fn print_output<S: SessionStorage>(
    tracker: &AttributionTracker<S>,
    page: &PageContext,
    output: OutputFormat,
) -> Result<()> {
    match output {
        OutputFormat::Data => {
            let record = tracker.attribution_data(page);
            let json = serde_json::to_string_pretty(&record)
                .context("Failed to serialize attribution data")?;
            println!("{}", json);
        }
        OutputFormat::Note => println!("{}", tracker.format_attribution_note(page)),
        OutputFormat::Form => println!("{}", tracker.attribution_data(page).to_form_urlencoded()),
        OutputFormat::None => debug!("Output disabled"),
    }
    Ok(())
}
