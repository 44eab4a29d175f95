use clap::Parser;

use surebet::adapter::inbound::cli::{self, command::Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(report) = cli::run(cli).await {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}
