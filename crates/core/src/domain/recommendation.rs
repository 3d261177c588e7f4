use crate::catalog::Instrument;
use serde::{Deserialize, Serialize};

/// One selected instrument with its share of the investable capital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(flatten)]
    pub instrument: Instrument,
    /// Whole percent in 0..=100.
    pub allocation: u32,
}
