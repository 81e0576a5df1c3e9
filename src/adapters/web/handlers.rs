pub use crate::adapters::web::ledger_handlers::configure as ledger_routes;
pub use crate::adapters::web::payments_handler::payments;
pub use crate::adapters::web::payments_metrics_handler::{
	payments_dead_letters, payments_metrics,
};
pub use crate::adapters::web::payments_purge_handler::payments_purge;
pub use crate::adapters::web::payments_summary_handler::payments_summary;
