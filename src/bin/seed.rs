use std::process::ExitCode;

use jobhunt::{app::init_tracing, config::AppConfig, db, seed};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(summary) => {
            tracing::info!(
                companies = summary.companies,
                applications = summary.applications,
                contacts = summary.contacts,
                interviews = summary.interviews,
                inserted = summary.inserted,
                "database seeded; log in as {} / {}",
                seed::DEMO_EMAIL,
                seed::DEMO_PASSWORD,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "seeding failed; nothing was written");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<seed::SeedSummary> {
    let config = AppConfig::from_env()?;
    let pool = db::connect(&config).await?;
    db::migrate(&pool).await?;
    seed::run(&pool).await
}
