//! risk-dashboard CLI - Risk Evaluation Dashboard
//!
//! Fetches risk scores once and renders the dashboard to the terminal,
//! as JSON, or as a web page.
//!
//! Usage:
//!   risk-dashboard [OPTIONS]

use std::io::{Write, stdout};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{Level, debug};

use risk_dashboard::{
    DashboardView, ViewState, generate_json_output, generate_text_output, load_config,
    web::{ServerConfig, start_server},
};

/// risk-dashboard - Classify risk scores and chart them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print the rendered dashboard as JSON
    #[arg(long)]
    json: bool,

    /// Fetch scores from this URL instead of the built-in sample
    #[arg(long)]
    endpoint: Option<String>,

    /// Simulated delay of the sample provider in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Request timeout for --endpoint in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Config file path (default: search for .risk-dashboard.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    // === Web options ===
    /// Start web server for the interactive dashboard
    #[arg(long)]
    web: bool,

    /// Port for web server (default: 3000)
    #[arg(long)]
    port: Option<u16>,

    /// Don't open browser automatically when starting web server
    #[arg(long)]
    no_open: bool,

    /// API endpoint URL for frontend (useful for separate deployments)
    #[arg(long)]
    api_endpoint: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    // CLI args override config, which overrides defaults
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let mut config = load_config(&config_path)?;

    if let Some(endpoint) = &args.endpoint {
        config.provider.endpoint = Some(endpoint.clone());
    }
    if let Some(delay_ms) = args.delay_ms {
        config.provider.delay_ms = delay_ms;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.provider.timeout_secs = timeout_secs;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.no_open {
        config.server.open_browser = false;
    }
    if args.api_endpoint.is_some() {
        config.server.api_endpoint = args.api_endpoint.clone();
    }

    debug!(?config, "configuration resolved");

    let provider = config.provider.build()?;
    let rt = tokio::runtime::Runtime::new()?;

    // Web mode
    if args.web {
        let server_config = ServerConfig {
            port: config.server.port,
            open_browser: config.server.open_browser,
            api_endpoint: config.server.api_endpoint.clone(),
        };

        rt.block_on(start_server(provider, server_config))
            .map_err(|e| -> Box<dyn std::error::Error> { e })?;

        return Ok(());
    }

    if !args.json {
        eprintln!("Fetching risk data ({} provider)...", provider.name());
    }

    let state = rt.block_on(async {
        let mut view = DashboardView::mount(provider);
        view.settled().await
    });

    let mut writer = stdout().lock();
    let rendering = state.render();
    if args.json {
        generate_json_output(&rendering, &mut writer)?;
    } else {
        generate_text_output(&rendering, &mut writer)?;
    }
    writer.flush()?;

    if let ViewState::Failed(e) = state {
        return Err(e.into());
    }

    Ok(())
}
