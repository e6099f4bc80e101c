use reqres_shared_config::SuiteConfig;
use reqres_suite::{run_all, Case, SuiteContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    let config = SuiteConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "reqres_suite={level},reqres_client={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        base_url = %config.api.base_url,
        log_detail = %config.api.log_detail,
        "Starting reqres suite"
    );

    let ctx = SuiteContext::new(&config.api)?;
    let report = run_all(&ctx, Case::catalogue()).await;

    println!("{}", report);

    if !report.is_success() {
        anyhow::bail!("{} of {} cases failed", report.failed(), report.cases.len());
    }
    Ok(())
}
