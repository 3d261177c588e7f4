//! Allocation scoring: filter the catalog by risk tolerance, weight the survivors, keep the top
//! picks and turn their weights into whole percentages.
//!
//! Everything here is a pure function of the profile and the catalog. Rounding is half-up
//! (`f64::round`, which rounds half away from zero; weights are never negative) and each
//! allocation is rounded independently, so a result may total 98..=102 rather than exactly 100.

pub mod error;

use crate::catalog::{Catalog, Instrument};
use crate::domain::profile::UserProfile;
use crate::domain::recommendation::Recommendation;
use crate::domain::risk::{InvestmentTerm, RiskLevel};
use error::RecommendError;
use std::sync::Arc;

/// Upper bound on the number of instruments in one result.
pub const MAX_PICKS: usize = 5;

const LOW_TIER_MATCH_BONUS: f64 = 1.5;
const MEDIUM_TIER_MATCH_BONUS: f64 = 1.5;
const HIGH_TIER_MATCH_BONUS: f64 = 2.0;

const SHORT_TERM_INDEX_PENALTY: f64 = 0.7;
const LONG_TERM_GROWTH_BONUS: f64 = 1.3;
/// Five-year performance (percent) above which a long horizon earns the growth bonus.
const LONG_TERM_GROWTH_THRESHOLD_PCT: f64 = 150.0;

/// Holds the injected catalog; cheap to clone and safe to share across requests.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    catalog: Arc<Catalog>,
}

impl AllocationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn recommend(&self, profile: &UserProfile) -> Result<Vec<Recommendation>, RecommendError> {
        recommend(profile, &self.catalog)
    }
}

#[derive(Debug, Clone, Copy)]
struct Weighted<'a> {
    instrument: &'a Instrument,
    weight: f64,
}

pub fn recommend(
    profile: &UserProfile,
    catalog: &Catalog,
) -> Result<Vec<Recommendation>, RecommendError> {
    profile.validate()?;

    let mut candidates: Vec<Weighted<'_>> = catalog
        .instruments()
        .iter()
        .filter(|i| is_eligible(profile.risk_tolerance, i))
        .map(|i| Weighted {
            instrument: i,
            weight: weight_for(profile, i),
        })
        .collect();

    if candidates.is_empty() {
        tracing::debug!(
            risk_tolerance = %profile.risk_tolerance,
            catalog_len = catalog.len(),
            "no eligible instruments"
        );
        return Ok(Vec::new());
    }

    // sort_by is stable: equal weights keep catalog order.
    candidates.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    candidates.truncate(MAX_PICKS);

    let weights: Vec<f64> = candidates.iter().map(|c| c.weight).collect();
    let allocations = normalize(&weights);

    Ok(candidates
        .into_iter()
        .zip(allocations)
        .map(|(c, allocation)| Recommendation {
            instrument: c.instrument.clone(),
            allocation,
        })
        .collect())
}

fn is_eligible(tolerance: RiskLevel, instrument: &Instrument) -> bool {
    match tolerance {
        RiskLevel::Low => instrument.risk_tier == RiskLevel::Low || instrument.is_broad_index,
        RiskLevel::Medium => matches!(instrument.risk_tier, RiskLevel::Low | RiskLevel::Medium),
        RiskLevel::High => true,
    }
}

fn weight_for(profile: &UserProfile, instrument: &Instrument) -> f64 {
    let mut weight = 1.0;

    // Only an exact tier match earns a bonus; index funds let into a low profile do not.
    weight *= match (profile.risk_tolerance, instrument.risk_tier) {
        (RiskLevel::Low, RiskLevel::Low) => LOW_TIER_MATCH_BONUS,
        (RiskLevel::Medium, RiskLevel::Medium) => MEDIUM_TIER_MATCH_BONUS,
        (RiskLevel::High, RiskLevel::High) => HIGH_TIER_MATCH_BONUS,
        _ => 1.0,
    };

    if profile.investment_term == InvestmentTerm::Short && instrument.is_broad_index {
        weight *= SHORT_TERM_INDEX_PENALTY;
    }
    if profile.investment_term == InvestmentTerm::Long
        && instrument.five_year_performance > LONG_TERM_GROWTH_THRESHOLD_PCT
    {
        weight *= LONG_TERM_GROWTH_BONUS;
    }

    weight
}

/// Whole-percent share of each weight, rounded half-up and independently.
pub fn normalize(weights: &[f64]) -> Vec<u32> {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return vec![0; weights.len()];
    }

    weights
        .iter()
        .map(|w| (w / total * 100.0).round().clamp(0.0, 100.0) as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin_catalog;

    fn instrument(ticker: &str, tier: RiskLevel, perf: f64, broad: bool) -> Instrument {
        Instrument {
            ticker: ticker.to_string(),
            name: format!("{ticker} Ltd."),
            risk_tier: tier,
            sector: if broad { "ETF" } else { "Equity" }.to_string(),
            five_year_performance: perf,
            description: String::new(),
            is_broad_index: broad,
        }
    }

    fn catalog(items: Vec<Instrument>) -> Catalog {
        Catalog::try_from_instruments(items).unwrap()
    }

    fn profile(risk: RiskLevel, term: InvestmentTerm) -> UserProfile {
        UserProfile::new(risk, term, 10_000.0).unwrap()
    }

    fn tickers(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.instrument.ticker.as_str()).collect()
    }

    #[test]
    fn low_tolerance_keeps_low_tier_and_broad_index_only() {
        let c = catalog(vec![
            instrument("LOW1", RiskLevel::Low, 10.0, false),
            instrument("MED1", RiskLevel::Medium, 10.0, false),
            instrument("IDX", RiskLevel::Medium, 10.0, true),
            instrument("HIGH1", RiskLevel::High, 10.0, false),
        ]);
        let recs = recommend(&profile(RiskLevel::Low, InvestmentTerm::Medium), &c).unwrap();
        assert_eq!(tickers(&recs), vec!["LOW1", "IDX"]);
        // 1.5 vs 1.0: the index fund gets no tier bonus.
        assert_eq!(recs[0].allocation, 60);
        assert_eq!(recs[1].allocation, 40);
    }

    #[test]
    fn medium_tolerance_excludes_high_tier() {
        let c = catalog(vec![
            instrument("HIGH1", RiskLevel::High, 10.0, false),
            instrument("LOW1", RiskLevel::Low, 10.0, false),
            instrument("MED1", RiskLevel::Medium, 10.0, false),
        ]);
        let recs = recommend(&profile(RiskLevel::Medium, InvestmentTerm::Medium), &c).unwrap();
        assert_eq!(tickers(&recs), vec!["MED1", "LOW1"]);
    }

    #[test]
    fn high_tolerance_keeps_whole_catalog_and_favours_high_tier() {
        let c = catalog(vec![
            instrument("LOW1", RiskLevel::Low, 10.0, false),
            instrument("MED1", RiskLevel::Medium, 10.0, false),
            instrument("HIGH1", RiskLevel::High, 10.0, false),
        ]);
        let recs = recommend(&profile(RiskLevel::High, InvestmentTerm::Medium), &c).unwrap();
        assert_eq!(tickers(&recs), vec!["HIGH1", "LOW1", "MED1"]);
        assert_eq!(recs.iter().map(|r| r.allocation).collect::<Vec<_>>(), vec![50, 25, 25]);
    }

    #[test]
    fn scenario_a_three_low_instruments_split_evenly() {
        let c = catalog(vec![
            instrument("L1", RiskLevel::Low, 50.0, false),
            instrument("H1", RiskLevel::High, 300.0, false),
            instrument("L2", RiskLevel::Low, 60.0, false),
            instrument("H2", RiskLevel::High, 20.0, false),
            instrument("L3", RiskLevel::Low, 70.0, false),
        ]);
        let p = UserProfile::new(RiskLevel::Low, InvestmentTerm::Medium, 5000.0).unwrap();
        let recs = recommend(&p, &c).unwrap();

        assert_eq!(tickers(&recs), vec!["L1", "L2", "L3"]);
        assert!(recs.iter().all(|r| r.allocation == 33));
        let total: u32 = recs.iter().map(|r| r.allocation).sum();
        assert_eq!(total, 99);
    }

    #[test]
    fn scenario_b_tier_and_growth_bonuses_compound() {
        let c = catalog(vec![
            instrument("STEADY", RiskLevel::Low, 40.0, false),
            instrument("GROWTH", RiskLevel::Medium, 200.0, false),
            instrument("ROCKET", RiskLevel::High, 1400.0, false),
            instrument("HIGHFLAT", RiskLevel::High, 10.0, false),
        ]);
        let p = profile(RiskLevel::High, InvestmentTerm::Long);
        assert!((weight_for(&p, &c.instruments()[2]) - 2.6).abs() < 1e-12);

        let recs = recommend(&p, &c).unwrap();
        assert_eq!(tickers(&recs), vec!["ROCKET", "HIGHFLAT", "GROWTH", "STEADY"]);
        // 2.6 / 2.0 / 1.3 / 1.0 over a total of 6.9.
        assert_eq!(
            recs.iter().map(|r| r.allocation).collect::<Vec<_>>(),
            vec![38, 29, 19, 14]
        );
    }

    #[test]
    fn scenario_c_empty_catalog_yields_empty_list() {
        let recs = recommend(&profile(RiskLevel::High, InvestmentTerm::Long), &Catalog::default())
            .unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn nothing_eligible_yields_empty_list() {
        let c = catalog(vec![instrument("H1", RiskLevel::High, 10.0, false)]);
        let recs = recommend(&profile(RiskLevel::Low, InvestmentTerm::Long), &c).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn short_term_penalizes_broad_index() {
        let c = catalog(vec![
            instrument("IDX", RiskLevel::Medium, 10.0, true),
            instrument("MED1", RiskLevel::Medium, 10.0, false),
        ]);
        let p = profile(RiskLevel::Medium, InvestmentTerm::Short);
        assert!((weight_for(&p, &c.instruments()[0]) - 1.05).abs() < 1e-12);
        let recs = recommend(&p, &c).unwrap();
        assert_eq!(tickers(&recs), vec!["MED1", "IDX"]);
    }

    #[test]
    fn growth_threshold_is_strict() {
        let p = profile(RiskLevel::Medium, InvestmentTerm::Long);
        let at = instrument("AT", RiskLevel::Low, 150.0, false);
        let above = instrument("ABOVE", RiskLevel::Low, 150.01, false);
        assert_eq!(weight_for(&p, &at), 1.0);
        assert!((weight_for(&p, &above) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn broad_index_growth_fund_gets_only_the_matching_term_rule() {
        // Long horizon: growth bonus applies; the short-term penalty does not.
        let idx = instrument("IDX", RiskLevel::Medium, 200.0, true);
        let long = profile(RiskLevel::Medium, InvestmentTerm::Long);
        assert!((weight_for(&long, &idx) - 1.5 * 1.3).abs() < 1e-12);
        let short = profile(RiskLevel::Medium, InvestmentTerm::Short);
        assert!((weight_for(&short, &idx) - 1.5 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn takes_at_most_five_and_breaks_ties_by_catalog_order() {
        let items: Vec<Instrument> = (1..=8)
            .map(|i| instrument(&format!("M{i}"), RiskLevel::Medium, 10.0, false))
            .collect();
        let recs = recommend(&profile(RiskLevel::Medium, InvestmentTerm::Medium), &catalog(items))
            .unwrap();
        assert_eq!(tickers(&recs), vec!["M1", "M2", "M3", "M4", "M5"]);
        assert!(recs.iter().all(|r| r.allocation == 20));
    }

    #[test]
    fn short_list_is_not_padded() {
        let c = catalog(vec![
            instrument("L1", RiskLevel::Low, 10.0, false),
            instrument("H1", RiskLevel::High, 10.0, false),
            instrument("H2", RiskLevel::High, 10.0, false),
        ]);
        let recs = recommend(&profile(RiskLevel::Low, InvestmentTerm::Long), &c).unwrap();
        assert_eq!(tickers(&recs), vec!["L1"]);
        assert_eq!(recs[0].allocation, 100);
    }

    #[test]
    fn rejects_invalid_amount_even_when_profile_was_mutated() {
        let mut p = profile(RiskLevel::Low, InvestmentTerm::Long);
        p.investment_amount = -10.0;
        let err = recommend(&p, &builtin_catalog().unwrap()).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidProfile(_)));

        p.investment_amount = f64::NAN;
        assert!(recommend(&p, &builtin_catalog().unwrap()).is_err());
    }

    #[test]
    fn normalize_rounds_half_up_without_correction() {
        // 12.5 and 87.5 are exact in binary floating point.
        assert_eq!(normalize(&[1.0, 7.0]), vec![13, 88]);
        assert_eq!(normalize(&[1.0, 1.0, 1.0]), vec![33, 33, 33]);
        assert_eq!(normalize(&[3.0, 1.0]), vec![75, 25]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn builtin_catalog_low_risk_long_term() {
        let engine = AllocationEngine::new(Arc::new(builtin_catalog().unwrap()));
        let recs = engine
            .recommend(&profile(RiskLevel::Low, InvestmentTerm::Long))
            .unwrap();
        // Low tier at 1.5 ahead of the index funds at 1.0.
        assert_eq!(
            tickers(&recs),
            vec!["SBIN", "SUNPHARMA", "HUL", "NIFTYBEES", "BANKBEES"]
        );
        assert_eq!(
            recs.iter().map(|r| r.allocation).collect::<Vec<_>>(),
            vec![23, 23, 23, 15, 15]
        );
    }

    #[test]
    fn builtin_catalog_high_risk_long_term() {
        let engine = AllocationEngine::new(Arc::new(builtin_catalog().unwrap()));
        let recs = engine
            .recommend(&profile(RiskLevel::High, InvestmentTerm::Long))
            .unwrap();
        // 2.6, 2.6, 2.0 for the high tier, RELIANCE at 1.3, then the first 1.0 in catalog order.
        assert_eq!(
            tickers(&recs),
            vec!["BAJFINANCE", "ADANIPORTS", "ZOMATO", "RELIANCE", "TCS"]
        );
    }

    #[test]
    fn recommend_does_not_mutate_catalog() {
        let c = builtin_catalog().unwrap();
        let before = c.clone();
        let _ = recommend(&profile(RiskLevel::High, InvestmentTerm::Short), &c).unwrap();
        assert_eq!(c.instruments(), before.instruments());
    }
}
