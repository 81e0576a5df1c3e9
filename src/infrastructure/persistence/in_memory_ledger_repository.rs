use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ledger::{
	LedgerError, LedgerEvent, LedgerMetrics, SummaryOrigin, TimeRange,
};
use crate::domain::origin::Origin;
use crate::domain::repository::LedgerRepository;
use crate::infrastructure::persistence::ledger::Ledger;

/// One in-process `Ledger` per origin.
#[derive(Clone)]
pub struct InMemoryLedgerRepository {
	default:  Arc<Ledger>,
	fallback: Arc<Ledger>,
}

impl InMemoryLedgerRepository {
	pub fn new(capacity: usize) -> Self {
		Self {
			default:  Arc::new(Ledger::with_capacity(capacity)),
			fallback: Arc::new(Ledger::with_capacity(capacity)),
		}
	}

	pub fn ledger(&self, origin: Origin) -> &Ledger {
		match origin {
			Origin::Default => &self.default,
			Origin::Fallback => &self.fallback,
		}
	}
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
	async fn append(
		&self,
		origin: Origin,
		event: LedgerEvent,
	) -> Result<(), LedgerError> {
		event.validate()?;
		self.ledger(origin).append(event);
		Ok(())
	}

	async fn append_batch(
		&self,
		origin: Origin,
		events: Vec<LedgerEvent>,
	) -> Result<(), LedgerError> {
		events.iter().try_for_each(LedgerEvent::validate)?;
		self.ledger(origin).append_all(events);
		Ok(())
	}

	async fn summary(
		&self,
		origin: Origin,
		range: TimeRange,
	) -> Result<SummaryOrigin, LedgerError> {
		Ok(self.ledger(origin).summary(range))
	}

	async fn purge(&self) -> Result<(), LedgerError> {
		for origin in Origin::ALL {
			self.ledger(origin).purge();
		}
		Ok(())
	}

	async fn metrics(&self, origin: Origin) -> Result<LedgerMetrics, LedgerError> {
		Ok(self.ledger(origin).metrics())
	}
}
