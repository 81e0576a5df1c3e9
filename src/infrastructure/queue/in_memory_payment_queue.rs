use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::sync::{Mutex, watch};

use crate::domain::payment::Payment;
use crate::domain::queue::{Message, Queue, QueueError};

/// Unbounded intake queue between the HTTP boundary and the workers.
///
/// Producers never wait. Workers share the single receiver, so ordering is
/// only roughly FIFO once messages are re-queued after a backoff.
#[derive(Clone)]
pub struct PaymentQueue {
	sender:   UnboundedSender<Message<Payment>>,
	receiver: Arc<Mutex<UnboundedReceiver<Message<Payment>>>>,
	closed:   Arc<watch::Sender<bool>>,
}

impl PaymentQueue {
	pub fn new() -> Self {
		let (sender, receiver) = unbounded_channel();
		Self {
			sender,
			receiver: Arc::new(Mutex::new(receiver)),
			closed: Arc::new(watch::Sender::new(false)),
		}
	}

	/// Stops accepting new messages. Buffered ones can still be popped.
	pub fn close(&self) {
		self.closed.send_replace(true);
	}

	pub fn is_closed(&self) -> bool {
		*self.closed.borrow()
	}
}

impl Default for PaymentQueue {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Queue<Payment> for PaymentQueue {
	fn push(&self, message: Message<Payment>) -> Result<(), QueueError> {
		if self.is_closed() {
			return Err(QueueError::Closed);
		}
		self.sender.send(message).map_err(|_| QueueError::Closed)
	}

	async fn pop(&self) -> Option<Message<Payment>> {
		let mut closed = self.closed.subscribe();
		let mut receiver = self.receiver.lock().await;

		tokio::select! {
			biased;
			message = receiver.recv() => message,
			_ = closed.wait_for(|closed| *closed) => receiver.try_recv().ok(),
		}
	}
}
