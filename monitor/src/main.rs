use anyhow::Context;
use clap::Parser;
use config::MonitorConfig;
use dashclient::{Dashboard, HttpTransport, Transport};
use dashcore::store::Mutation;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use view::ConsoleView;

mod config;
mod view;

#[derive(Parser)]
#[command(author, version, about = "Follow a model backend from the terminal")]
struct Args {
    /// Load the monitor config from YAML (other flags are ignored)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Talk to the local development backend
    #[arg(long, default_value_t = false)]
    dev: bool,
    /// Host of the server the dashboard is served from
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8050)]
    port: u16,
    /// Use /get_data and /get_model instead of /data with an embedded model
    #[arg(long, default_value_t = false)]
    legacy_endpoints: bool,
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
    #[arg(long, default_value_t = 900.0)]
    viewport_height: f64,
    /// Load one snapshot, print it, and exit
    #[arg(long, default_value_t = false)]
    once: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        MonitorConfig::load(path)?
    } else {
        MonitorConfig::from_args(
            args.dev,
            args.host,
            args.port,
            args.legacy_endpoints,
            args.interval_ms,
            args.viewport_height,
        )
    };

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime")?;
    runtime.block_on(run(config, args.once))
}

async fn run(config: MonitorConfig, once: bool) -> anyhow::Result<()> {
    let base = config.base_url();
    info!("following backend at {}", base.as_str());
    let dashboard = Arc::new(Dashboard::new(
        HttpTransport::new(base),
        config.endpoints.clone(),
        config.dashboard_options(),
    ));
    let mut console = ConsoleView::new();
    let mut stdout = io::stdout();

    if once {
        dashboard.initialize().await;
        return render(&dashboard, &mut console, &mut stdout);
    }

    let mut changes = dashboard.changes();
    let handle = dashboard.clone().start().await;
    render(&dashboard, &mut console, &mut stdout)?;

    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                result.context("awaiting Ctrl+C to exit")?;
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&dashboard, &mut console, &mut stdout)?;
            }
        }
    }

    handle.shutdown().await;
    println!("{}", view::summary(dashboard.metrics()));
    Ok(())
}

/// Draws pending changes; a displayed error modal counts as seen and is
/// dismissed so a persisting error does not show it again.
fn render<T: Transport, W: Write>(
    dashboard: &Dashboard<T>,
    console: &mut ConsoleView,
    out: &mut W,
) -> anyhow::Result<()> {
    let shown = dashboard
        .read(|state| console.render(state, out))
        .context("writing to terminal")?;
    out.flush().context("flushing terminal")?;
    if shown {
        dashboard.commit(Mutation::HideErrorModal);
    }
    Ok(())
}
