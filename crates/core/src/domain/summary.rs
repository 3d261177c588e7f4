use crate::domain::profile::UserProfile;
use crate::domain::recommendation::Recommendation;
use serde::{Deserialize, Serialize};

/// Instruments above this five-year return (percent) are shown as outperforming.
const OUTPERFORMING_THRESHOLD_PCT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub risk_profile: String,
    pub time_horizon: String,
    pub investment_amount: f64,
    pub monthly_addition: f64,
    pub total_allocation: u32,
    /// `total_allocation - 100`; zero for an empty result.
    pub rounding_drift: i32,
    pub lines: Vec<AllocationLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationLine {
    pub ticker: String,
    pub name: String,
    pub allocation: u32,
    pub amount: f64,
    pub monthly_amount: f64,
    pub outperforming: bool,
}

impl AllocationSummary {
    pub fn build(profile: &UserProfile, recommendations: &[Recommendation]) -> Self {
        let total_allocation: u32 = recommendations.iter().map(|r| r.allocation).sum();
        let rounding_drift = if recommendations.is_empty() {
            0
        } else {
            total_allocation as i32 - 100
        };

        let lines = recommendations
            .iter()
            .map(|r| AllocationLine {
                ticker: r.instrument.ticker.clone(),
                name: r.instrument.name.clone(),
                allocation: r.allocation,
                amount: share_of(profile.investment_amount, r.allocation),
                monthly_amount: share_of(profile.monthly_addition, r.allocation),
                outperforming: r.instrument.five_year_performance > OUTPERFORMING_THRESHOLD_PCT,
            })
            .collect();

        Self {
            risk_profile: profile.risk_tolerance.profile_label().to_string(),
            time_horizon: profile.investment_term.horizon_label().to_string(),
            investment_amount: profile.investment_amount,
            monthly_addition: profile.monthly_addition,
            total_allocation,
            rounding_drift,
            lines,
        }
    }

    pub fn has_rounding_drift(&self) -> bool {
        self.rounding_drift != 0
    }
}

// Rounded to cents for display, unless the amount is too large to scale by 100.
fn share_of(amount: f64, allocation: u32) -> f64 {
    let share = amount * f64::from(allocation) / 100.0;
    let cents = share * 100.0;
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        share
    }
}
