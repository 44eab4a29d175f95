//! `surebet scan`: batch scan of every upcoming event.

use crate::adapter::inbound::cli::command::ScanArgs;
use crate::adapter::inbound::cli::render;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::inbound::{ArbitrageDesk, OpportunityQuery};

/// Run the scan and print the ranked opportunities.
pub async fn execute(config: &Config, args: &ScanArgs) -> Result<()> {
    let service = bootstrap::build_feed_service(config, &args.source.input)?;
    let query = OpportunityQuery {
        min_profit_margin: args.source.min_margin,
        sport: args.sport.clone(),
        limit: args.limit,
        market_type: args.market.clone(),
    };

    let report = service.list_opportunities(&query).await?;
    render::scan_report(&report);
    Ok(())
}
