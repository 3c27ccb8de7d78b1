use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Generation issued to one debounced invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Debounce gate for one kind of search
///
/// Every call to [`Debouncer::wait`] starts a new generation. A waiter only
/// gets a ticket if no newer call arrived during its delay, and the ticket
/// stays current until the next call, which lets the caller drop responses
/// that land after a newer search started.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the quiet period; `None` if superseded meanwhile
    pub async fn wait(&self) -> Option<Ticket> {
        let ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        tokio::time::sleep(self.delay).await;
        self.is_current(ticket).then_some(ticket)
    }

    /// True while no newer invocation has started
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}
