//! `surebet event`: detection for a single event.

use crate::adapter::inbound::cli::command::EventArgs;
use crate::adapter::inbound::cli::render;
use crate::domain::EventId;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::inbound::{ArbitrageDesk, EventQuery};

/// Evaluate the requested event and print its opportunities.
pub async fn execute(config: &Config, args: &EventArgs) -> Result<()> {
    let service = bootstrap::build_feed_service(config, &args.source.input)?;
    let query = EventQuery {
        event_id: EventId::new(args.event.as_str()),
        market_type: args.market.clone(),
        min_profit_margin: args.source.min_margin,
    };

    let evaluation = service.detect_for_event(&query).await?;
    render::evaluation(&evaluation);
    Ok(())
}
