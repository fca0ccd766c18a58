use crate::render::{run_catalog, run_estimate, CatalogArgs, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use paint_estimate::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Painting Estimate Service",
    about = "Serve the painting estimate API or price a job from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a job and print the line-item breakdown
    Estimate(EstimateArgs),
    /// Print the price catalog
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Catalog(args) => run_catalog(args),
    }
}
