pub mod accounts;
pub mod memory;

use crate::domain::account::{Investment, NewInvestment, NewUser, User};
use anyhow::Context;

pub async fn migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("sqlx migrations failed")?;
    Ok(())
}

/// Persistence for signups and submitted investment records.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    fn store_name(&self) -> &'static str;

    /// Returns `None` when a user with the same email already exists.
    async fn create_user(&self, user: NewUser) -> anyhow::Result<Option<User>>;

    async fn record_investment(&self, investment: NewInvestment) -> anyhow::Result<Investment>;
}
