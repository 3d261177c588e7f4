use crate::domain::account::{Investment, NewInvestment, NewUser, User};
use crate::storage::AccountStore;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Process-local store used by tests. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users_by_email: HashMap<String, User>,
    investments: Vec<Investment>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn investments_for(&self, user_id: &str) -> Vec<Investment> {
        let inner = self.inner.lock().await;
        inner
            .investments
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl AccountStore for MemoryAccountStore {
    fn store_name(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        let mut inner = self.inner.lock().await;
        if inner.users_by_email.contains_key(&user.email) {
            return Ok(None);
        }

        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email.clone(),
            age: user.age,
            created_at: Utc::now(),
        };
        inner.users_by_email.insert(user.email, created.clone());
        Ok(Some(created))
    }

    async fn record_investment(&self, investment: NewInvestment) -> anyhow::Result<Investment> {
        let now = Utc::now();
        let saved = Investment {
            id: Uuid::new_v4(),
            user_id: investment.user_id,
            kind: investment.kind,
            amount: investment.amount,
            risk_level: investment.risk_level,
            monthly_contribution: investment.monthly_contribution,
            sectors: investment.sectors,
            created_at: now,
            updated_at: now,
        };

        self.inner.lock().await.investments.push(saved.clone());
        Ok(saved)
    }
}
