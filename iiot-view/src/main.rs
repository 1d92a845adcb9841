use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use iiot_core::DeviceId;
use iiot_view::{
    Config, FactSource, FactStore, FileSource, MemorySource, Page, SimulatedSource, SourceConfig,
    ViewProjector,
};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "iiot-view")]
#[command(about = "Renders IIoT dashboard views as JSON")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "iiot-view.toml")]
    config: PathBuf,

    /// Keep refreshing from the source and re-render until interrupted
    #[arg(short, long)]
    watch: bool,

    #[command(subcommand)]
    page: PageArg,
}

#[derive(Subcommand, Clone)]
enum PageArg {
    /// KPI gauges, device status, telemetry chart and recent alerts
    Dashboard,
    /// Telemetry trends, alert history and production report
    Analytics,
    /// Status and alerts of a single device
    Device {
        /// Device identifier, e.g. DEV001
        id: String,
    },
}

impl From<PageArg> for Page {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::Dashboard => Page::Dashboard,
            PageArg::Analytics => Page::Analytics,
            PageArg::Device { id } => Page::Device(DeviceId::from(id.as_str())),
        }
    }
}

/// Everything a render pass needs besides the snapshot.
#[derive(Clone)]
struct Renderer {
    projector: ViewProjector,
    page: Page,
    pretty: bool,
}

impl Renderer {
    async fn render(&self, store: &FactStore) -> color_eyre::Result<()> {
        let snapshot = store.snapshot().await;
        let json = self.projector.render_json(&snapshot, &self.page, self.pretty)?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
        stdout.flush()?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // stdout carries the rendered views, so logs go to stderr.
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "iiot_view=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        info!(path = ?cli.config, "Loading configuration");
        Config::load(&cli.config)?
    } else {
        info!("No configuration file found, using defaults");
        Config::default()
    };

    let renderer = Renderer {
        projector: ViewProjector::new(config.kpi),
        page: cli.page.into(),
        pretty: config.render.pretty,
    };
    let period = cli.watch.then(|| config.render.refresh_interval());

    match config.source {
        SourceConfig::Demo => {
            info!("Using demo facts");
            run(MemorySource::demo(), renderer, period).await?;
        }
        SourceConfig::File { path } => {
            info!(path = ?path, "Using snapshot file");
            run(FileSource::new(path)?, renderer, period).await?;
        }
        SourceConfig::Simulated {
            device_count,
            sample_count,
            sample_interval_secs,
        } => {
            info!(device_count, sample_count, sample_interval_secs, "Using simulated plant");
            let source = SimulatedSource::new(device_count, sample_count, sample_interval_secs);
            run(source, renderer, period).await?;
        }
    }

    Ok(())
}

/// Render once, then keep refreshing every `period` when watching.
async fn run<S>(source: S, renderer: Renderer, period: Option<Duration>) -> color_eyre::Result<()>
where
    S: FactSource,
{
    let store = FactStore::default();
    store.refresh_from(&source).await?;
    renderer.render(&store).await?;

    let Some(period) = period else {
        return Ok(());
    };

    info!(?period, "Watching for new facts");
    let cancel = CancellationToken::new();
    let mut refresher = tokio::spawn(refresh_loop(
        store,
        source,
        renderer,
        period,
        cancel.clone(),
    ));

    tokio::select! {
        result = &mut refresher => return result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            cancel.cancel();
        }
    }

    refresher.await?
}

async fn refresh_loop<S>(
    store: FactStore,
    source: S,
    renderer: Renderer,
    period: Duration,
    cancel: CancellationToken,
) -> color_eyre::Result<()>
where
    S: FactSource,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately and the initial render already happened.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Refresh loop stopped");
                return Ok(());
            }
            _ = ticker.tick() => {
                // A failed read is logged by the store and the previous
                // snapshot stays on screen.
                if store.refresh_from(&source).await.is_ok() {
                    renderer.render(&store).await?;
                }
            }
        }
    }
}
