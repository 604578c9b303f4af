use clap::Parser;

use langtower::cli::{self, Args};
use langtower::config::Config;
use langtower::dispatch::Dispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env();
    let dispatcher = Dispatcher::from_config(config);

    if let Err(e) = cli::run(&args, &dispatcher).await {
        tracing::debug!("rewrite failed: {e:?}");
        eprintln!("⚠️ {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
