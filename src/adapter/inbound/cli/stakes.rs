//! `surebet stakes`: stake plan for a detected opportunity.

use crate::adapter::inbound::cli::command::StakesArgs;
use crate::adapter::inbound::cli::render;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::inbound::{ArbitrageDesk, OpportunityQuery};

/// Scan the feed, then split the bankroll across the chosen opportunity.
///
/// The scan registers every detected opportunity, so any id printed by
/// `scan` or `event` for the same feed resolves here.
pub async fn execute(config: &Config, args: &StakesArgs) -> Result<()> {
    let service = bootstrap::build_feed_service(config, &args.source.input)?;
    let query = OpportunityQuery {
        min_profit_margin: args.source.min_margin,
        sport: args.sport.clone(),
        ..OpportunityQuery::default()
    };
    let report = service.list_opportunities(&query).await?;

    let plan = match args.opportunity {
        Some(id) => service.compute_stakes(&id, args.bankroll).await?,
        None => {
            let best = report
                .opportunities
                .first()
                .ok_or_else(|| Error::not_found("opportunity: the scan found none"))?;
            service.plan_stakes(best, args.bankroll)?
        }
    };

    render::stake_plan(&plan);
    Ok(())
}
