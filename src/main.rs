use std::io;
use std::path::PathBuf;
use std::process::{self, ExitCode};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stronghold::ui::Session;
use stronghold::{Kingdom, KingdomConfig};

#[derive(Parser, Debug)]
#[command(name = "stronghold")]
#[command(about = "Rule a medieval kingdom one decree at a time")]
struct Cli {
    /// Name of the kingdom
    #[arg(long, default_value = "Westland")]
    name: String,

    /// File the game is saved to and loaded from
    #[arg(long, default_value = "score.txt")]
    save_file: PathBuf,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Real-time delay per army training cycle, in milliseconds
    #[arg(long, default_value_t = 1_000)]
    training_pace_ms: u64,
}

impl Cli {
    fn into_config(self) -> KingdomConfig {
        KingdomConfig {
            name: self.name,
            save_path: self.save_file,
            training_pace: Duration::from_millis(self.training_pace_ms),
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let config = Cli::parse().into_config();
    info!(
        kingdom = %config.name,
        save = %config.save_path.display(),
        seed = ?config.seed,
        "starting session"
    );
    let kingdom = Kingdom::new(config);

    // The menu blocks on stdin, so it lives on a blocking worker.
    let session = tokio::task::spawn_blocking(move || {
        let mut session = Session::new(kingdom, io::stdin().lock(), io::stdout());
        session.run()
    });

    tokio::select! {
        joined = session => {
            let end = joined.context("menu loop panicked")??;
            info!(?end, "session finished");
            Ok(end.exit_code())
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted");
            println!();
            // A blocked stdin read cannot be cancelled.
            process::exit(130);
        }
    }
}
