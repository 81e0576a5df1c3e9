use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ledger::{
	LedgerError, LedgerEvent, LedgerMetrics, SummaryOrigin, TimeRange,
};
use crate::domain::origin::Origin;

/// Persistence port for confirmed payments, partitioned by origin.
#[async_trait]
pub trait LedgerRepository: Send + Sync + 'static {
	async fn append(
		&self,
		origin: Origin,
		event: LedgerEvent,
	) -> Result<(), LedgerError>;

	async fn append_batch(
		&self,
		origin: Origin,
		events: Vec<LedgerEvent>,
	) -> Result<(), LedgerError>;

	async fn summary(
		&self,
		origin: Origin,
		range: TimeRange,
	) -> Result<SummaryOrigin, LedgerError>;

	async fn purge(&self) -> Result<(), LedgerError>;

	async fn metrics(&self, origin: Origin) -> Result<LedgerMetrics, LedgerError>;
}

pub type SharedLedgerRepository = Arc<dyn LedgerRepository>;

#[async_trait]
impl<T: LedgerRepository + ?Sized> LedgerRepository for Arc<T> {
	async fn append(
		&self,
		origin: Origin,
		event: LedgerEvent,
	) -> Result<(), LedgerError> {
		(**self).append(origin, event).await
	}

	async fn append_batch(
		&self,
		origin: Origin,
		events: Vec<LedgerEvent>,
	) -> Result<(), LedgerError> {
		(**self).append_batch(origin, events).await
	}

	async fn summary(
		&self,
		origin: Origin,
		range: TimeRange,
	) -> Result<SummaryOrigin, LedgerError> {
		(**self).summary(origin, range).await
	}

	async fn purge(&self) -> Result<(), LedgerError> {
		(**self).purge().await
	}

	async fn metrics(&self, origin: Origin) -> Result<LedgerMetrics, LedgerError> {
		(**self).metrics(origin).await
	}
}
