use std::time::Duration;

use tokio::time::Instant;

/// Debounce-and-dedupe stage for search text.
///
/// Every update is timestamped. A pending value is emitted once `delay` has
/// elapsed since its timestamp with no newer update replacing it, and only if
/// it differs from the last emitted value. The initial emitted value is the
/// empty query.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    last_emitted: String,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_emitted: String::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records an update and returns the instant at which it becomes due.
    pub fn push(&mut self, value: String, now: Instant) -> Instant {
        self.pending = Some((value, now));
        now + self.delay
    }

    /// Takes the pending value if it is due and new.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = matches!(&self.pending, Some((_, at)) if now >= *at + self.delay);
        if !due {
            return None;
        }

        let (value, _) = self.pending.take()?;
        if value == self.last_emitted {
            return None;
        }
        self.last_emitted.clone_from(&value);
        Some(value)
    }

    pub fn last_emitted(&self) -> &str {
        &self.last_emitted
    }
}
