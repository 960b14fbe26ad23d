use anyhow::Context;
use api_bridge::ApiBridge;
use clap::Parser;
use neocore::prelude::ObjectSource;
use service::config::GatewayConfig;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use upstream::NeoWsClient;

mod api_bridge;
mod service;
mod upstream;

#[derive(Parser)]
#[command(author, version, about = "HTTP gateway for the Rust NEO platform")]
struct Args {
    /// Load a gateway config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bind address for the API bridge (overrides the config file)
    #[arg(long)]
    bind: Option<String>,
    /// NeoWs API key (falls back to the NASA_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,
    /// Fetch a single object by identifier and emit a baseline summary
    #[arg(long)]
    lookup: Option<String>,
    /// Keep the API bridge alive for incoming viewer requests
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        GatewayConfig::load(path)?
    } else {
        GatewayConfig::default()
    };
    let config = config.with_overrides(args.bind, args.api_key);

    let client = Arc::new(NeoWsClient::new(&config));
    let bridge = ApiBridge::new(client.clone(), config.bind_address()?);

    if let Some(identifier) = args.lookup {
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for one-shot lookup")?;
        let detail = runtime
            .block_on(client.lookup(&identifier))
            .with_context(|| format!("looking up object {identifier}"))?;

        println!(
            "Lookup {} -> approaches {}, orbital solutions {}",
            identifier,
            detail.sorted_approaches.len(),
            detail.orbital_data.len()
        );

        let report = format!(
            "identifier={} approaches={} orbital_solutions={} first_approach={:?}\n",
            identifier,
            detail.sorted_approaches.len(),
            detail.orbital_data.len(),
            detail
                .sorted_approaches
                .first()
                .map(|a| a.close_approach_date.as_str())
        );
        let report_path = PathBuf::from("tools/data/lookup.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        bridge.publish_status("API bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
        let (feeds, lookups, errors) = bridge.metrics_snapshot();
        bridge.publish_status(&format!(
            "API bridge stopping: {feeds} feeds, {lookups} lookups, {errors} errors"
        ));
    }

    Ok(())
}
