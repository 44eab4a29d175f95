//! Tables and JSON records for detection results.

use rust_decimal::Decimal;
use tabled::Tabled;

use crate::adapter::inbound::cli::output;
use crate::domain::{ArbitrageOpportunity, MarketEvaluation, ScanReport, StakePlan};

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Selections")]
    selections: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "ROI")]
    roi: String,
    #[tabled(rename = "Id")]
    id: String,
}

impl OpportunityRow {
    fn new(rank: usize, opportunity: &ArbitrageOpportunity) -> Self {
        let selections = opportunity
            .selections()
            .iter()
            .map(|s| format!("{} @ {} ({})", s.outcome, s.decimal_odds, s.bookmaker))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            rank,
            event: opportunity.event_name().to_string(),
            market: opportunity.market_type().display_name().to_string(),
            selections,
            margin: percent(opportunity.profit_margin() * Decimal::ONE_HUNDRED),
            roi: percent(opportunity.roi_percent()),
            id: opportunity.id().to_string(),
        }
    }
}

#[derive(Tabled)]
struct StakeRow {
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Bookmaker")]
    bookmaker: String,
    #[tabled(rename = "Odds")]
    odds: Decimal,
    #[tabled(rename = "Stake")]
    stake: Decimal,
    #[tabled(rename = "Return")]
    potential_return: Decimal,
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.round_dp(2))
}

fn opportunities(opportunities: &[ArbitrageOpportunity]) {
    for opportunity in opportunities {
        output::record("opportunity", opportunity);
    }
    if output::is_json() {
        return;
    }

    if opportunities.is_empty() {
        output::note("No arbitrage opportunities found");
        return;
    }
    output::table(
        opportunities
            .iter()
            .enumerate()
            .map(|(i, opportunity)| OpportunityRow::new(i + 1, opportunity)),
    );
}

/// Print a batch scan.
pub fn scan_report(report: &ScanReport) {
    opportunities(&report.opportunities);
    output::record(
        "summary",
        &serde_json::json!({
            "opportunities": report.opportunities.len(),
            "events_scanned": report.events_scanned,
            "events_failed": report.events_failed,
            "events_timed_out": report.events_timed_out,
            "truncated_markets": report.truncated_markets,
            "deadline_hit": report.deadline_hit,
        }),
    );
    if output::is_json() {
        return;
    }

    output::section("Scan");
    output::field("Events scanned", report.events_scanned);
    output::field("Opportunities", report.opportunities.len());
    if report.events_failed > 0 || report.events_timed_out > 0 {
        output::warning(&format!(
            "{} event(s) failed, {} timed out",
            report.events_failed, report.events_timed_out
        ));
    }
    if report.truncated_markets > 0 {
        output::warning(&format!(
            "{} market(s) hit the combination cap",
            report.truncated_markets
        ));
    }
    if report.deadline_hit {
        output::warning("Scan deadline reached, results are partial");
    }
}

/// Print a single event evaluation.
pub fn evaluation(evaluation: &MarketEvaluation) {
    opportunities(&evaluation.opportunities);
    output::record(
        "summary",
        &serde_json::json!({
            "event_id": evaluation.event_id,
            "market_id": evaluation.market_id,
            "opportunities": evaluation.opportunities.len(),
            "explored": evaluation.explored,
            "rejected_invalid": evaluation.rejected_invalid,
            "truncated": evaluation.truncated,
        }),
    );
    if output::is_json() {
        return;
    }

    output::section("Event");
    output::field("Event", &evaluation.event_id);
    output::field("Market", &evaluation.market_id);
    output::field("Combinations", evaluation.explored);
    if evaluation.rejected_invalid > 0 {
        output::warning(&format!(
            "{} combination(s) rejected for invalid odds",
            evaluation.rejected_invalid
        ));
    }
    if evaluation.truncated {
        output::warning("Combination cap reached, results may be incomplete");
    }
}

/// Print a stake plan.
pub fn stake_plan(plan: &StakePlan) {
    output::record("stake_plan", plan);
    if output::is_json() {
        return;
    }

    output::table(plan.allocations.iter().map(|a| StakeRow {
        outcome: a.outcome.clone(),
        bookmaker: a.bookmaker.to_string(),
        odds: a.decimal_odds,
        stake: a.stake,
        potential_return: a.potential_return,
    }));

    output::section("Stakes");
    output::field("Opportunity", output::muted(plan.opportunity_id));
    output::field("Bankroll", plan.bankroll);
    output::field("Total stake", plan.total_stake);
    output::field("Locked profit", output::positive(plan.locked_profit));
    output::field("Implied profit", plan.implied_profit);
    output::field("Profit margin", percent(plan.profit_margin_percent));
    output::field("ROI", output::highlight(percent(plan.roi_percent)));
}
