mod cli;
mod console;
mod infra;
mod routes;
mod server;

use campus_care::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
