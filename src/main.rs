use blueprint_apigen::cli::run_cli;
use blueprint_apigen::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli()
}
