//! destiny: calculate destiny matrices and keep client history.
//!
//! Usage:
//!   destiny calculate --name "Иван Иванов" --date 15.03.1990 [--json] [--save]
//!   destiny help
//!
//! Reports and JSON go to stdout, logs to stderr (RUST_LOG, default info).

use destiny_cli::{App, Args};
use destiny_core::CoreConfig;
use destiny_ledger::Ledger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let config = CoreConfig::load()?;
    let calculator = config.calculator()?;
    let ledger = Ledger::open(&config)?;
    tracing::debug!(ledger = %ledger.path().display(), app = %config.app_name, "destiny ready");

    let today = chrono::Local::now().date_naive();
    let app = App::new(config, calculator, ledger, today);
    match app.run(&args) {
        Ok(out) => {
            print!("{out}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
