use clap::Parser;

use blueprint::cli::{Cli, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    blueprint::logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
