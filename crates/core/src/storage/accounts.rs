use crate::domain::account::{Investment, NewInvestment, NewUser, User};
use crate::storage::AccountStore;
use anyhow::Context;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: sqlx::PgPool,
}

impl PgAccountStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    fn store_name(&self) -> &'static str {
        "postgres"
    }

    async fn create_user(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        let id = Uuid::new_v4();

        let created_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            "INSERT INTO users (id, name, email, password_salt, password_hash, age) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (email) DO NOTHING \
             RETURNING created_at",
        )
        .persistent(false)
        .bind(id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_salt)
        .bind(&user.password_hash)
        .bind(user.age)
        .fetch_optional(&self.pool)
        .await
        .context("insert users failed")?;

        let Some(created_at) = created_at else {
            tracing::debug!(email = %user.email, "signup rejected: email already registered");
            return Ok(None);
        };

        Ok(Some(User {
            id,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at,
        }))
    }

    async fn record_investment(&self, investment: NewInvestment) -> anyhow::Result<Investment> {
        let id = Uuid::new_v4();

        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO investments (id, user_id, kind, amount, risk_level, monthly_contribution, sectors) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING created_at, updated_at",
        )
        .persistent(false)
        .bind(id)
        .bind(&investment.user_id)
        .bind(&investment.kind)
        .bind(investment.amount)
        .bind(investment.risk_level.as_str())
        .bind(investment.monthly_contribution)
        .bind(&investment.sectors)
        .fetch_one(&self.pool)
        .await
        .context("insert investments failed")?;

        Ok(Investment {
            id,
            user_id: investment.user_id,
            kind: investment.kind,
            amount: investment.amount,
            risk_level: investment.risk_level,
            monthly_contribution: investment.monthly_contribution,
            sectors: investment.sectors,
            created_at,
            updated_at,
        })
    }
}
