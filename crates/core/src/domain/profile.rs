use crate::domain::risk::{InvestmentTerm, RiskLevel};
use crate::engine::error::RecommendError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub risk_tolerance: RiskLevel,
    pub investment_term: InvestmentTerm,
    pub investment_amount: f64,
    #[serde(default)]
    pub monthly_addition: f64,
    /// Preferred sectors. Carried for display; scoring does not read it.
    #[serde(default)]
    pub sectors: Vec<String>,
}

impl UserProfile {
    pub fn new(
        risk_tolerance: RiskLevel,
        investment_term: InvestmentTerm,
        investment_amount: f64,
    ) -> Result<Self, RecommendError> {
        let profile = Self {
            risk_tolerance,
            investment_term,
            investment_amount,
            monthly_addition: 0.0,
            sectors: Vec::new(),
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn with_monthly_addition(mut self, monthly_addition: f64) -> Result<Self, RecommendError> {
        self.monthly_addition = monthly_addition;
        self.validate()?;
        Ok(self)
    }

    pub fn with_sectors(mut self, sectors: Vec<String>) -> Self {
        self.sectors = sectors;
        self
    }

    /// Fields are public, so the engine re-checks amounts on every call.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if !self.investment_amount.is_finite() || self.investment_amount <= 0.0 {
            return Err(RecommendError::invalid_profile(format!(
                "investmentAmount must be a positive finite number (got {})",
                self.investment_amount
            )));
        }
        if !self.monthly_addition.is_finite() || self.monthly_addition < 0.0 {
            return Err(RecommendError::invalid_profile(format!(
                "monthlyAddition must be a non-negative finite number (got {})",
                self.monthly_addition
            )));
        }
        Ok(())
    }
}
