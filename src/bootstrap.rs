use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::{ports::time::Clock, services::ApplicationServices};
use crate::config::AppConfig;
use crate::domain::article::ArticleRepository;
use crate::infrastructure::{
    database, repositories::PostgresArticleRepository, time::SystemClock,
};

/// Wire the application services against PostgreSQL and the system clock.
pub async fn build_services(config: &AppConfig) -> Result<ApplicationServices> {
    let pool = database::init_pool(config.database_url(), config.database_max_connections())
        .await
        .context("failed to connect to the database")?;

    let article_repo: Arc<dyn ArticleRepository> = Arc::new(PostgresArticleRepository::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    tracing::info!("application services ready");
    Ok(ApplicationServices::new(article_repo, clock))
}
