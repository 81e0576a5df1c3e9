use crate::domain::ledger::{LedgerError, TimeRange};
use crate::domain::origin::Origin;
use crate::domain::repository::LedgerRepository;
use crate::use_cases::dto::{GetPaymentSummaryQuery, PaymentsSummaryResponse};

#[derive(Clone)]
pub struct GetPaymentSummaryUseCase<R: LedgerRepository> {
	ledger_repo: R,
}

impl<R: LedgerRepository> GetPaymentSummaryUseCase<R> {
	pub fn new(ledger_repo: R) -> Self {
		Self { ledger_repo }
	}

	pub async fn execute(
		&self,
		query: GetPaymentSummaryQuery,
	) -> Result<PaymentsSummaryResponse, LedgerError> {
		let range = TimeRange::new(query.from, query.to)?;

		let (default, fallback) = tokio::try_join!(
			self.ledger_repo.summary(Origin::Default, range),
			self.ledger_repo.summary(Origin::Fallback, range),
		)?;

		Ok(PaymentsSummaryResponse {
			default:  default.into(),
			fallback: fallback.into(),
		})
	}
}
