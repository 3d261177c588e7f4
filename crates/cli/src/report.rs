use riskroad_core::domain::summary::AllocationSummary;
use std::fmt::Write;

/// Plain-text table for terminal output.
pub fn render(summary: &AllocationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Profile: {} / {}",
        summary.risk_profile, summary.time_horizon
    );
    let _ = writeln!(out, "Initial investment: {:.2}", summary.investment_amount);
    if summary.monthly_addition > 0.0 {
        let _ = writeln!(out, "Monthly addition: {:.2}", summary.monthly_addition);
    }

    if summary.lines.is_empty() {
        let _ = writeln!(out, "No instruments match this profile.");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<12} {:>6} {:>14} {:>12}  {}",
        "TICKER", "ALLOC", "AMOUNT", "MONTHLY", "NAME"
    );
    for line in &summary.lines {
        let trend = if line.outperforming { "+" } else { "-" };
        let _ = writeln!(
            out,
            "{:<12} {:>5}% {:>14.2} {:>12.2}  {} {}",
            line.ticker, line.allocation, line.amount, line.monthly_amount, trend, line.name
        );
    }

    if summary.has_rounding_drift() {
        let _ = writeln!(
            out,
            "\nwarning: allocations total {}% ({:+} from 100% due to rounding)",
            summary.total_allocation, summary.rounding_drift
        );
    }

    out
}
