use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse risk classification. Used both as an instrument's tier and as an investor's tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentTerm {
    Short,
    Medium,
    Long,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Investor-facing name for a risk tolerance.
    pub fn profile_label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Conservative",
            RiskLevel::Medium => "Balanced",
            RiskLevel::High => "Aggressive",
        }
    }
}

impl InvestmentTerm {
    pub fn as_str(self) -> &'static str {
        match self {
            InvestmentTerm::Short => "short",
            InvestmentTerm::Medium => "medium",
            InvestmentTerm::Long => "long",
        }
    }

    pub fn horizon_label(self) -> &'static str {
        match self {
            InvestmentTerm::Short => "Short-term (1-2 years)",
            InvestmentTerm::Medium => "Medium-term (3-5 years)",
            InvestmentTerm::Long => "Long-term (6+ years)",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InvestmentTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Parsing is exact (after trimming): an unknown value is an error, never a fallback level.
impl FromStr for RiskLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => anyhow::bail!("unknown risk level {other:?} (expected low, medium or high)"),
        }
    }
}

impl FromStr for InvestmentTerm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "short" => Ok(InvestmentTerm::Short),
            "medium" => Ok(InvestmentTerm::Medium),
            "long" => Ok(InvestmentTerm::Long),
            other => {
                anyhow::bail!("unknown investment term {other:?} (expected short, medium or long)")
            }
        }
    }
}
