use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_chemical_forms;
mod m20260801_000003_create_otp_challenges;
mod m20260801_000004_create_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_chemical_forms::Migration),
            Box::new(m20260801_000003_create_otp_challenges::Migration),
            Box::new(m20260801_000004_create_sessions::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
