use crate::domain::risk::RiskLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A validated signup, password already reduced to a salted digest.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_salt: String,
    pub password_hash: String,
    pub age: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInvestment {
    pub user_id: String,
    pub kind: Option<String>,
    pub amount: f64,
    pub risk_level: RiskLevel,
    pub monthly_contribution: f64,
    pub sectors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: f64,
    pub risk_level: RiskLevel,
    pub monthly_contribution: f64,
    pub sectors: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(name: String, email: String, password: &str, age: i32) -> Self {
        let password_salt = Uuid::new_v4().simple().to_string();
        let password_hash = hash_password(&password_salt, password);
        Self {
            name,
            email,
            password_salt,
            password_hash,
            age,
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        hash_password(&self.password_salt, password) == self.password_hash
    }
}

pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
