use sea_orm_migration::prelude::*;

use raisedup_api_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
