use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plan_client::api::{ApiConfig, HttpPlanApi, PlanApi};
use plan_client::error::AppError;
use plan_client::models::EntityId;
use plan_client::services::{Notifier, PlanDetailLoader, Refresh, TracingNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "plan_client=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::new_from_env()?;
    let semester_code = env::var("PLAN_SEMESTER_CODE")
        .map_err(|_| AppError::Config("PLAN_SEMESTER_CODE is not set".to_string()))?;
    let account_id = env::var("PLAN_ACCOUNT_ID")
        .map_err(|_| AppError::Config("PLAN_ACCOUNT_ID is not set".to_string()))?;

    info!("loading plan {} from {}", semester_code, config.base_url);

    let api: Arc<dyn PlanApi> = Arc::new(HttpPlanApi::new(config)?);
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let mut loader = PlanDetailLoader::new(api, notifier, semester_code, EntityId::new(account_id));

    loader.refresh().await?;

    if let Some(view) = loader.view() {
        info!(
            "{} courses, {} classes, {} students, {} assign requests",
            view.courses.len(),
            view.classes.len(),
            view.student_groups.len(),
            view.assign_requests.len()
        );
        println!("{}", serde_json::to_string_pretty(view)?);
    }

    Ok(())
}
