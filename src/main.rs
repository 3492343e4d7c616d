use clap::Parser;
use wedding_planner::cli::commands::Cli;
use wedding_planner::cli::handlers;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
