use humanoid_lib::{HandGesture, HomeTarget};
use std::collections::BTreeSet;

/// Pending one-off requests. Enqueueing is idempotent and a drain hands out
/// everything pending in the key's order, leaving the queue empty.
#[derive(Debug, Clone)]
pub struct RequestQueue<T: Ord> {
    pending: BTreeSet<T>,
}

impl<T: Ord> Default for RequestQueue<T> {
    fn default() -> Self {
        Self {
            pending: BTreeSet::new(),
        }
    }
}

impl<T: Ord + Copy> RequestQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the request was already pending.
    pub fn enqueue(&mut self, request: T) -> bool {
        self.pending.insert(request)
    }

    /// Takes every pending request; anything enqueued afterwards waits for
    /// the next drain.
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

pub type HomeRequestQueue = RequestQueue<HomeTarget>;
pub type HandRequestQueue = RequestQueue<HandGesture>;
