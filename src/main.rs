use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use clash_aggregator::models::AppState;
use clash_aggregator::utils::HttpFetcher;
use clash_aggregator::web_handlers::interfaces;
use clash_aggregator::{Aggregator, Settings};

/// Aggregate published Clash proxy lists into a template and serve the result
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Path to the template the proxies are merged into
    #[arg(short, long, value_name = "FILE")]
    template: Option<String>,

    /// Path the merged config is written to and served from
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long, value_name = "SECONDS")]
    interval: Option<u64>,

    /// Run a single cycle and exit instead of starting the server
    #[arg(long)]
    once: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // Override settings with command line arguments if provided
    if let Some(address) = args.address {
        settings.listen_address = address;
    }
    if let Some(port) = args.port {
        settings.listen_port = port;
    }
    if let Some(template) = args.template {
        settings.template_path = template;
    }
    if let Some(output) = args.output {
        settings.output_path = output;
    }
    if let Some(interval) = args.interval {
        settings.refresh_interval = interval;
    }
    settings.log_summary();

    let settings = Arc::new(settings);
    let fetcher = HttpFetcher::new().map_err(std::io::Error::other)?;
    let aggregator = Aggregator::new(Arc::clone(&settings), fetcher);

    if args.once {
        return match aggregator.run_cycle().await {
            Ok(report) => {
                info!(
                    "Published {} proxies to {} (published={})",
                    report.proxies, settings.output_path, report.published
                );
                Ok(())
            }
            Err(e) => {
                error!("Cycle failed: {}", e);
                Err(std::io::Error::other(e))
            }
        };
    }

    // Refresh in the background, starting now
    actix_web::rt::spawn(aggregator.run_forever());

    let listen_address = settings.bind_address();
    let app_state = Arc::new(AppState::new(Arc::clone(&settings)));

    info!("clash-aggregator starting on {}", listen_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&app_state)))
            .configure(interfaces::config)
    })
    .bind(listen_address)?
    .run()
    .await
}
