use std::sync::Arc;

use shared::models::{AccountCreate, AccountRole};
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::auth::password::hash_password;
use crate::core::tasks::BackgroundTasks;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::account;
use crate::orders::OrderService;
use crate::services::StatusSweeper;
use crate::security_log;
use crate::utils::AppError;
use crate::utils::validation::{validate_email, validate_password};

/// Server state - shared handles to every service
///
/// Cheap to clone; handed to every axum handler.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | pool | SqlitePool | database pool |
/// | jwt_service | Arc<JwtService> | token issue / validation |
/// | orders | OrderService | purchase and verification |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub orders: OrderService,
}

impl ServerState {
    /// Build state over an existing pool
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let orders = OrderService::new(pool.clone());
        Self {
            config,
            pool,
            jwt_service,
            orders,
        }
    }

    /// Open the configured database (running migrations), build the state
    /// and provision the configured administrator
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let state = Self::new(config.clone(), db.pool);
        state.ensure_admin().await?;
        Ok(state)
    }

    /// Give `ADMIN_EMAIL` the admin role, creating the account from
    /// `ADMIN_PASSWORD` when it does not exist yet. No-op without `ADMIN_EMAIL`.
    pub async fn ensure_admin(&self) -> Result<(), AppError> {
        let Some(email) = self.config.admin_email.as_deref() else {
            return Ok(());
        };

        match account::find_by_email(&self.pool, email).await? {
            Some(existing) if existing.role == AccountRole::Admin => {
                tracing::debug!(account_id = existing.id, "Administrator already provisioned");
            }
            Some(existing) => {
                account::set_role(&self.pool, existing.id, AccountRole::Admin).await?;
                security_log!(
                    "INFO",
                    "admin_promoted",
                    account_id = existing.id,
                    email = email.to_string()
                );
            }
            None => {
                let Some(password) = self.config.admin_password.as_deref() else {
                    tracing::warn!(
                        email,
                        "ADMIN_EMAIL has no account and ADMIN_PASSWORD is unset, no administrator provisioned"
                    );
                    return Ok(());
                };
                validate_email(email)?;
                validate_password(password)?;
                let hash_pass = hash_password(password)
                    .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

                let created = account::create(
                    &self.pool,
                    &admin_registration(email, password),
                    &hash_pass,
                    AccountRole::Admin,
                    0.0,
                )
                .await?;
                security_log!(
                    "INFO",
                    "admin_created",
                    account_id = created.id,
                    email = email.to_string()
                );
            }
        }
        Ok(())
    }

    /// Start the background tasks; the caller owns their shutdown
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let sweeper = StatusSweeper::new(
            self.pool.clone(),
            self.config.sweep_interval,
            self.config.complaint_dwell,
        );
        let shutdown = tasks.shutdown_token();
        tasks.spawn("status_sweeper", sweeper.run(shutdown));

        tasks.log_summary();
        tasks
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

fn admin_registration(email: &str, password: &str) -> AccountCreate {
    AccountCreate {
        first_name: "Hostel".to_string(),
        last_name: "Admin".to_string(),
        email: email.to_string(),
        phone: String::new(),
        student_id: String::new(),
        department: String::new(),
        year: String::new(),
        password: password.to_string(),
    }
}
