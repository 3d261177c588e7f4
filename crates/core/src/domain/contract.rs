use crate::domain::account::{NewInvestment, NewUser};
use crate::domain::profile::UserProfile;
use crate::domain::risk::{InvestmentTerm, RiskLevel};
use crate::engine::error::RecommendError;
use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

/// Raw questionnaire payload as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub risk_tolerance: Option<String>,
    pub investment_term: Option<String>,
    pub investment_amount: Option<f64>,
    pub monthly_addition: Option<f64>,
    pub sectors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentInput {
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub risk_level: Option<String>,
    pub monthly_contribution: Option<f64>,
    pub sectors: Option<Vec<String>>,
}

impl ProfileInput {
    pub fn validate_and_into_profile(self) -> Result<UserProfile, RecommendError> {
        let risk_tolerance: RiskLevel = self
            .risk_tolerance
            .as_deref()
            .ok_or_else(|| RecommendError::invalid_profile("riskTolerance is required"))?
            .parse()
            .map_err(|e| RecommendError::invalid_profile(format!("riskTolerance: {e}")))?;

        let investment_term: InvestmentTerm = self
            .investment_term
            .as_deref()
            .ok_or_else(|| RecommendError::invalid_profile("investmentTerm is required"))?
            .parse()
            .map_err(|e| RecommendError::invalid_profile(format!("investmentTerm: {e}")))?;

        let investment_amount = self
            .investment_amount
            .ok_or_else(|| RecommendError::invalid_profile("investmentAmount is required"))?;

        let sectors = clean_sectors(self.sectors.unwrap_or_default());

        UserProfile::new(risk_tolerance, investment_term, investment_amount)?
            .with_monthly_addition(self.monthly_addition.unwrap_or(0.0))
            .map(|p| p.with_sectors(sectors))
    }
}

impl SignupInput {
    pub fn validate_and_into_user(self) -> anyhow::Result<NewUser> {
        let (Some(name), Some(email), Some(password), Some(age)) =
            (self.name, self.email, self.password, self.age)
        else {
            bail!("All fields are required");
        };

        let name = name.trim().to_string();
        let email = email.trim().to_ascii_lowercase();
        ensure!(
            !name.is_empty() && !email.is_empty() && !password.is_empty(),
            "All fields are required"
        );
        ensure!(email.contains('@'), "email is not valid: {email}");
        ensure!((1..=150).contains(&age), "age out of range: {age}");

        Ok(NewUser::new(name, email, &password, age))
    }
}

impl InvestmentInput {
    pub fn validate_and_into_investment(self) -> anyhow::Result<NewInvestment> {
        let user_id = self
            .user_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let (Some(user_id), Some(amount), Some(risk_level)) =
            (user_id, self.amount, self.risk_level)
        else {
            bail!("Required fields missing");
        };

        ensure!(
            amount.is_finite() && amount > 0.0,
            "amount must be a positive number (got {amount})"
        );
        let risk_level: RiskLevel = risk_level.parse()?;

        let monthly_contribution = self.monthly_contribution.unwrap_or(0.0);
        ensure!(
            monthly_contribution.is_finite() && monthly_contribution >= 0.0,
            "monthlyContribution must be non-negative (got {monthly_contribution})"
        );

        let kind = self
            .kind
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(NewInvestment {
            user_id,
            kind,
            amount,
            risk_level,
            monthly_contribution,
            sectors: clean_sectors(self.sectors.unwrap_or_default()),
        })
    }
}

fn clean_sectors(sectors: Vec<String>) -> Vec<String> {
    sectors
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
