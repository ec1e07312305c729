use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use digsigncarousel::{CarouselClient, EffectiveSettings, HttpFeedFetcher, LogRenderer};
use digsignconfig::get_config;
use digsigncontent::{ContentConfigExt, MediaExt};
use digsignfeed::{FeedAssembler, FeedExt, SignageConfigExt, SlideSource};
use digsignqrcode::{QrCodeConfigExt, QrCodeExt};
use digsignserver::{ConfigExt, LoggingOptions, ServerBuilder};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "digsign")]
#[command(about = "Digital signage slide feed server and carousel player", long_about = None)]
struct Cli {
    /// Configuration directory (contains config.yaml)
    #[arg(long, global = true, env = "DIGSIGN_CONFIG")]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the slide feed, the gallery page and the QR codes (default)
    Serve,

    /// Run a headless carousel against a feed, reporting slides in the logs
    Play {
        /// Feed endpoint, e.g. http://localhost:8080/api/slides
        #[arg(long)]
        feed_url: String,

        /// Category named in the empty-feed message
        #[arg(long, default_value = "")]
        category: String,

        /// Initial poll interval in seconds
        #[arg(long, default_value_t = 10)]
        refresh: u64,

        /// Initial slide delay in seconds
        #[arg(long, default_value_t = 5)]
        delay: u64,
    },

    /// Delete every generated QR code image
    PurgeQrcodes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.config_dir {
        // SAFETY: aucun autre thread n'existe encore, le runtime est créé après
        unsafe { std::env::set_var("DIGSIGN_CONFIG", dir) };
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command.unwrap_or(Command::Serve) {
            Command::Serve => serve().await,
            Command::Play {
                feed_url,
                category,
                refresh,
                delay,
            } => play(feed_url, category, refresh, delay).await,
            Command::PurgeQrcodes => purge_qrcodes().await,
        }
    })
}

async fn serve() -> anyhow::Result<()> {
    let config = get_config();

    // ========== PHASE 1 : Infrastructure HTTP ==========
    let mut server = ServerBuilder::new_configured().build();
    server.init_logging(LoggingOptions::configured()).await;

    if config.get_config_api_enabled()? {
        server.init_config_api().await?;
    }

    // ========== PHASE 2 : Contenus et flux ==========
    info!("🔳 Initializing QR code cache...");
    let codes = server.init_qrcode_cache_configured().await?;

    info!("🖼️ Initializing media variants...");
    let variants = server.init_media_configured().await?;

    let store = config.create_content_store()?;
    let source = SlideSource::new(store, variants, codes);
    let assembler = Arc::new(FeedAssembler::new(config.clone(), source));

    info!(
        "📰 Slide feed for category \"{}\"",
        config.get_category_name()
    );
    server.init_feed(assembler).await;
    server
        .add_redirect("/", digsignfeed::server_ext::PAGE_ROUTE)
        .await;

    // ========== PHASE 3 : Démarrage du serveur ==========
    info!("🌐 Starting HTTP server...");
    server.start().await?;

    info!("✅ DigSign is ready at {}", server.info().base_url);
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}

async fn play(feed_url: String, category: String, refresh: u64, delay: u64) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = EffectiveSettings {
        refresh_interval: Duration::from_secs(refresh.max(1)),
        slide_delay: Duration::from_secs(delay.max(1)),
        ..Default::default()
    };

    info!("▶️ Playing {}", feed_url);
    let fetcher = Arc::new(HttpFeedFetcher::new(feed_url));
    let client = CarouselClient::new(fetcher, LogRenderer::new(), settings, category);

    client
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
        })
        .await;

    Ok(())
}

async fn purge_qrcodes() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();

    let cache = get_config().create_code_cache()?;
    let removed = cache.purge().await?;
    info!("🧹 {} QR code image(s) removed from {}", removed, cache.dir().display());

    Ok(())
}
