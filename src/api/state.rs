// src/api/state.rs
use crate::config::{AppConfig, ProblemCatalog};
use crate::database;
use crate::errors::Result;
use crate::executor::DyalogRunExecutor;
use crate::grader::Grader;
use crate::harness::Harness;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Everything a request handler needs. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProblemCatalog>,
    pub grader: Arc<Grader>,
    pub db_pool: SqlitePool,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let harness = Harness::load(config.harness_path.as_deref())?;
        let catalog = ProblemCatalog::load_dir(&config.problems_dir)?;
        let db_pool = database::init_db(&config.database_url).await?;
        let executor = DyalogRunExecutor::new(config.executor.clone());

        Ok(Self::from_parts(catalog, Grader::new(harness, Arc::new(executor)), db_pool))
    }

    pub fn from_parts(catalog: ProblemCatalog, grader: Grader, db_pool: SqlitePool) -> Self {
        Self {
            catalog: Arc::new(catalog),
            grader: Arc::new(grader),
            db_pool,
        }
    }
}
