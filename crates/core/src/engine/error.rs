use std::fmt;

/// Failure of a recommendation request. An empty catalog is not an error: it yields no picks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    InvalidProfile(String),
}

impl RecommendError {
    pub fn invalid_profile(detail: impl Into<String>) -> Self {
        RecommendError::InvalidProfile(detail.into())
    }
}

impl fmt::Display for RecommendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendError::InvalidProfile(detail) => write!(f, "invalid profile: {detail}"),
        }
    }
}

impl std::error::Error for RecommendError {}
