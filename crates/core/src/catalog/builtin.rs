use super::{Catalog, Instrument};
use crate::domain::risk::RiskLevel;

struct Entry {
    ticker: &'static str,
    name: &'static str,
    risk_tier: RiskLevel,
    sector: &'static str,
    five_year_performance: f64,
    is_broad_index: bool,
    description: &'static str,
}

// NSE large caps plus two Nippon India index ETFs.
const ENTRIES: &[Entry] = &[
    Entry {
        ticker: "RELIANCE",
        name: "Reliance Industries Ltd.",
        risk_tier: RiskLevel::Medium,
        sector: "Oil & Gas",
        five_year_performance: 185.0,
        is_broad_index: false,
        description: "Indian conglomerate with businesses in energy, petrochemicals, textiles, retail, and telecommunications.",
    },
    Entry {
        ticker: "TCS",
        name: "Tata Consultancy Services Ltd.",
        risk_tier: RiskLevel::Medium,
        sector: "Information Technology",
        five_year_performance: 130.0,
        is_broad_index: false,
        description: "India's largest IT services company providing consulting, technology, and outsourcing services.",
    },
    Entry {
        ticker: "HDFCBANK",
        name: "HDFC Bank Ltd.",
        risk_tier: RiskLevel::Medium,
        sector: "Banking",
        five_year_performance: 110.0,
        is_broad_index: false,
        description: "One of India's leading private sector banks with a strong presence in retail and corporate banking.",
    },
    Entry {
        ticker: "INFY",
        name: "Infosys Ltd.",
        risk_tier: RiskLevel::Medium,
        sector: "Information Technology",
        five_year_performance: 145.0,
        is_broad_index: false,
        description: "Global leader in next-generation digital services and consulting, helping clients in digital transformation.",
    },
    Entry {
        ticker: "SBIN",
        name: "State Bank of India",
        risk_tier: RiskLevel::Low,
        sector: "Banking",
        five_year_performance: 75.0,
        is_broad_index: false,
        description: "India's largest public sector bank with a significant market share in domestic banking.",
    },
    Entry {
        ticker: "SUNPHARMA",
        name: "Sun Pharmaceutical Industries Ltd.",
        risk_tier: RiskLevel::Low,
        sector: "Healthcare",
        five_year_performance: 65.0,
        is_broad_index: false,
        description: "India's largest pharmaceutical company specializing in generic drugs and active pharmaceutical ingredients.",
    },
    Entry {
        ticker: "HUL",
        name: "Hindustan Unilever Ltd.",
        risk_tier: RiskLevel::Low,
        sector: "Consumer Goods",
        five_year_performance: 120.0,
        is_broad_index: false,
        description: "India's largest fast-moving consumer goods company with products ranging from food to personal care.",
    },
    Entry {
        ticker: "BAJFINANCE",
        name: "Bajaj Finance Ltd.",
        risk_tier: RiskLevel::High,
        sector: "Finance",
        five_year_performance: 340.0,
        is_broad_index: false,
        description: "One of India's leading non-banking financial companies offering various financial services and loans.",
    },
    Entry {
        ticker: "ADANIPORTS",
        name: "Adani Ports and Special Economic Zone Ltd.",
        risk_tier: RiskLevel::High,
        sector: "Infrastructure",
        five_year_performance: 180.0,
        is_broad_index: false,
        description: "India's largest private port operator with a portfolio of ports and logistics businesses.",
    },
    Entry {
        ticker: "NIFTYBEES",
        name: "Nippon India ETF Nifty BeES",
        risk_tier: RiskLevel::Medium,
        sector: "ETF",
        five_year_performance: 90.0,
        is_broad_index: true,
        description: "Exchange-traded fund that tracks the performance of the Nifty 50 Index, providing exposure to India's top 50 companies.",
    },
    Entry {
        ticker: "BANKBEES",
        name: "Nippon India ETF Bank BeES",
        risk_tier: RiskLevel::Medium,
        sector: "ETF",
        five_year_performance: 75.0,
        is_broad_index: true,
        description: "Exchange-traded fund that provides exposure to India's banking sector by tracking the Nifty Bank Index.",
    },
    Entry {
        ticker: "ZOMATO",
        name: "Zomato Ltd.",
        risk_tier: RiskLevel::High,
        sector: "Technology",
        five_year_performance: 30.0,
        is_broad_index: false,
        description: "Indian multinational restaurant aggregator and food delivery company offering restaurant discovery and delivery services.",
    },
];

/// The catalog shipped with the binaries, used when no file or URL is configured.
pub fn builtin_catalog() -> anyhow::Result<Catalog> {
    let instruments = ENTRIES
        .iter()
        .map(|e| Instrument {
            ticker: e.ticker.to_string(),
            name: e.name.to_string(),
            risk_tier: e.risk_tier,
            sector: e.sector.to_string(),
            five_year_performance: e.five_year_performance,
            description: e.description.to_string(),
            is_broad_index: e.is_broad_index,
        })
        .collect();
    Catalog::try_from_instruments(instruments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 12);
    }

    #[test]
    fn only_the_bees_funds_are_broad_index() {
        let catalog = builtin_catalog().unwrap();
        let flagged: Vec<&str> = catalog
            .instruments()
            .iter()
            .filter(|i| i.is_broad_index)
            .map(|i| i.ticker.as_str())
            .collect();
        assert_eq!(flagged, vec!["NIFTYBEES", "BANKBEES"]);
    }
}
