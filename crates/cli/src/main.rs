use anyhow::Context;
use clap::Parser;
use riskroad_core::catalog::source::{
    catalog_source_from_settings, CatalogSource, FileCatalogSource,
};
use riskroad_core::domain::contract::ProfileInput;
use riskroad_core::domain::summary::AllocationSummary;
use riskroad_core::engine::recommend;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Debug, Parser)]
#[command(name = "riskroad_cli", about = "Suggest a stock allocation for an investor profile")]
struct Args {
    /// Risk tolerance: low, medium or high.
    #[arg(long)]
    risk: String,

    /// Investment horizon: short, medium or long.
    #[arg(long)]
    term: String,

    /// Total amount to invest.
    #[arg(long)]
    amount: f64,

    /// Amount added every month.
    #[arg(long, default_value_t = 0.0)]
    monthly_addition: f64,

    /// Preferred sector; may be repeated. Informational only.
    #[arg(long = "sector")]
    sectors: Vec<String>,

    /// JSON catalog file. Overrides CATALOG_PATH / CATALOG_URL.
    #[arg(long)]
    catalog: Option<String>,

    /// Print the recommendation array as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = riskroad_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let source: Box<dyn CatalogSource> = match args.catalog.as_deref() {
        Some(path) => Box::new(FileCatalogSource::new(path)),
        None => catalog_source_from_settings(&settings)?,
    };
    let catalog = source
        .load()
        .await
        .with_context(|| format!("failed to load catalog from {}", source.source_name()))?;
    tracing::debug!(source = source.source_name(), instruments = catalog.len(), "catalog loaded");

    let profile = ProfileInput {
        risk_tolerance: Some(args.risk),
        investment_term: Some(args.term),
        investment_amount: Some(args.amount),
        monthly_addition: Some(args.monthly_addition),
        sectors: Some(args.sectors),
    }
    .validate_and_into_profile()?;

    let recommendations = recommend(&profile, &catalog)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    let summary = AllocationSummary::build(&profile, &recommendations);
    print!("{}", report::render(&summary));
    Ok(())
}

fn init_sentry(settings: &riskroad_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_is_required() {
        let missing = Args::try_parse_from(["riskroad_cli", "--risk", "low", "--amount", "100"]);
        assert!(missing.is_err());

        let args = Args::try_parse_from([
            "riskroad_cli", "--risk", "low", "--term", "long", "--amount", "100",
        ])
        .unwrap();
        assert_eq!(args.term, "long");
        assert_eq!(args.monthly_addition, 0.0);
    }
}
