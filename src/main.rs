use anyhow::{Context, Result};
use clap::Parser;
use island_guide::{
    FileLogStore, Locale, LogStore, MemoryLogStore, MockContentSource, SearchQuery, SiteConfig,
    TouristSite, TracingBackend,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Render the Phú Quốc guide page to stdout
#[derive(Parser, Debug)]
#[command(name = "island-guide", version, about)]
struct Args {
    /// Display language (en or vi)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the booking and experience logs (in-memory when omitted)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Free-text search; prints matching item names instead of the page
    #[arg(short, long)]
    query: Option<String>,

    /// Tag filter, repeatable
    #[arg(short, long = "tag")]
    tags: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SiteConfig::default(),
    };
    if let Some(locale) = args.locale {
        config.default_locale = locale;
    }
    if let Some(dir) = args.storage_dir {
        config.storage_dir = Some(dir);
    }

    let store: Arc<dyn LogStore> = match &config.storage_dir {
        Some(dir) => Arc::new(
            FileLogStore::open(dir)
                .with_context(|| format!("opening storage in {}", dir.display()))?,
        ),
        None => Arc::new(MemoryLogStore::new()),
    };
    let source = Arc::new(MockContentSource::with_latency(config.content_latency()));
    let backend = Box::new(TracingBackend::new(
        config.notifications.supported,
        config.notifications.grant_on_request,
    ));

    let site = TouristSite::new(config, source, store, backend);
    site.refresh().await;

    if args.query.is_some() || !args.tags.is_empty() {
        let tags: Vec<&str> = args.tags.iter().map(String::as_str).collect();
        let query = SearchQuery::new(args.query.as_deref().unwrap_or_default(), &tags);
        let results = site.search(&query);
        for name in results.destinations.iter().chain(&results.cuisine) {
            println!("{}", name);
        }
    } else {
        print!("{}", site.page());
    }

    Ok(())
}
