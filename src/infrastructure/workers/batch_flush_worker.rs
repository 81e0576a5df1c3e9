use std::time::Duration;

use log::debug;
use tokio::time::{MissedTickBehavior, interval};

use crate::domain::origin::Origin;
use crate::domain::repository::LedgerRepository;
use crate::infrastructure::batch::batch_writer::BatchWriter;

/// Drains `origin`'s buffer whenever a batch fills up or `flush_interval`
/// passes, whichever comes first.
pub async fn batch_flush_worker<L>(
	batch_writer: BatchWriter<L>,
	origin: Origin,
	flush_interval: Duration,
) where
	L: LedgerRepository,
{
	let mut ticker = interval(flush_interval.max(Duration::from_millis(1)));
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		tokio::select! {
			_ = ticker.tick() => {}
			_ = batch_writer.batch_ready(origin) => {}
		}

		let flushed = batch_writer.flush_all(origin).await;
		if flushed > 0 {
			debug!("Batch flush worker wrote {flushed} {origin} records");
		}
	}
}
