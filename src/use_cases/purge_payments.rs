use crate::domain::ledger::LedgerError;
use crate::domain::repository::LedgerRepository;

#[derive(Clone)]
pub struct PurgePaymentsUseCase<R: LedgerRepository> {
	repository: R,
}

impl<R: LedgerRepository> PurgePaymentsUseCase<R> {
	pub fn new(repository: R) -> Self {
		Self { repository }
	}

	pub async fn execute(&self) -> Result<(), LedgerError> {
		self.repository.purge().await
	}
}
