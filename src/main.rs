// src/main.rs

use renderq::config::{self, Settings};
use renderq::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("renderq error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();

    let (config_path, explicit) = match args.config.clone() {
        Some(path) => (path, true),
        None => (config::default_config_path(), false),
    };
    let cfg = config::load_or_default(&config_path, explicit)?;
    let settings = Settings::resolve(&args, cfg)?;

    let _log_guard = logging::init_logging(args.log_level, settings.log_file.as_deref())?;

    run(settings).await?;
    Ok(())
}
