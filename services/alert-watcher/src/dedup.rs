//! Bounded record of alert ids that have already been published.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};

/// Time-windowed set of published alert ids.
///
/// Ids are forgotten once older than `window`, and the oldest are evicted
/// first when `capacity` is reached. The caller passes the current time so
/// expiry is deterministic under test.
#[derive(Debug)]
pub struct SeenAlerts {
    window: Duration,
    capacity: usize,
    /// Insertion order, oldest first.
    order: VecDeque<(String, DateTime<Utc>)>,
    /// Latest insertion time per id.
    latest: HashMap<String, DateTime<Utc>>,
}

impl SeenAlerts {
    pub fn new(window: Duration, capacity: usize) -> Self {
        Self {
            window,
            capacity: capacity.max(1),
            order: VecDeque::new(),
            latest: HashMap::new(),
        }
    }

    pub fn contains(&self, id: &str, now: DateTime<Utc>) -> bool {
        self.latest
            .get(id)
            .map(|seen| now - *seen < self.window)
            .unwrap_or(false)
    }

    pub fn insert(&mut self, id: &str, now: DateTime<Utc>) {
        self.prune(now);
        self.latest.insert(id.to_string(), now);
        self.order.push_back((id.to_string(), now));

        while self.latest.len() > self.capacity {
            self.pop_oldest();
        }
    }

    /// Drop every entry older than the window.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        while let Some((_, at)) = self.order.front() {
            if now - *at < self.window {
                break;
            }
            self.pop_oldest();
        }
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    fn pop_oldest(&mut self) {
        if let Some((id, at)) = self.order.pop_front() {
            // A re-inserted id has a newer entry further back; keep it.
            if self.latest.get(&id) == Some(&at) {
                self.latest.remove(&id);
            }
        }
    }
}
