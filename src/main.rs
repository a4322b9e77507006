use clap::Parser;

use demo::config::DemoConfig;
use demo::observability::init_logging;

#[tokio::main]
async fn main() {
    let config = DemoConfig::parse();
    init_logging(config.log_format);

    if let Err(e) = demo::app::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
