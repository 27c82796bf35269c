use tally::{config::Config, server::run_server};

use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Usage: {} [data_file.json|data_file.csv]", program_name());
            std::process::exit(1);
        }
    };

    info!(addr = %config.addr(), "starting tally");
    let source = config.build_source()?;
    run_server(source, config.addr()).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::from_env()?.with_args(env::args());
    config.validate()?;
    Ok(config)
}

fn program_name() -> String {
    env::args().next().unwrap_or_else(|| "tally".to_string())
}
