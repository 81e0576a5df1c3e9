use async_trait::async_trait;
use derive_more::derive::{Display, Error};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Message<B> {
	pub id:   Uuid,
	pub body: B,
}

impl<B> Message<B> {
	pub fn with(id: Uuid, body: B) -> Message<B> {
		Message { id, body }
	}
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum QueueError {
	#[display("queue is closed")]
	Closed,
}

#[async_trait]
pub trait Queue<B>: Send + Sync + 'static {
	/// Hands a message over without waiting. Fails only once the queue
	/// has been closed.
	fn push(&self, message: Message<B>) -> Result<(), QueueError>;

	/// Waits for the next message. `None` means the queue is closed and
	/// drained.
	async fn pop(&self) -> Option<Message<B>>;
}
