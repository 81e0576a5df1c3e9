use crate::domain::ledger::LedgerError;
use crate::domain::origin::Origin;
use crate::domain::repository::LedgerRepository;
use crate::infrastructure::queue::dead_letter_queue::DeadLetterQueue;
use crate::infrastructure::routing::retry_state::RetryState;
use crate::use_cases::dto::{DeadLetterEntry, PaymentsMetricsResponse};

#[derive(Clone)]
pub struct GetPaymentMetricsUseCase<R: LedgerRepository> {
	ledger_repo:  R,
	retry_state:  RetryState,
	dead_letters: DeadLetterQueue,
}

impl<R: LedgerRepository> GetPaymentMetricsUseCase<R> {
	pub fn new(
		ledger_repo: R,
		retry_state: RetryState,
		dead_letters: DeadLetterQueue,
	) -> Self {
		Self {
			ledger_repo,
			retry_state,
			dead_letters,
		}
	}

	pub async fn execute(&self) -> Result<PaymentsMetricsResponse, LedgerError> {
		let (default, fallback) = tokio::try_join!(
			self.ledger_repo.metrics(Origin::Default),
			self.ledger_repo.metrics(Origin::Fallback),
		)?;

		Ok(PaymentsMetricsResponse {
			default,
			fallback,
			pending_retries: self.retry_state.len(),
			dead_letters: self.dead_letters.len(),
			dead_letters_discarded: self.dead_letters.discarded(),
		})
	}

	pub fn dead_letters(&self) -> Vec<DeadLetterEntry> {
		self.dead_letters
			.snapshot()
			.into_iter()
			.map(DeadLetterEntry::from)
			.collect()
	}
}
