mod cli;
mod infra;
mod render;
mod routes;
mod server;

use paint_estimate::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
