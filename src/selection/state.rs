use std::sync::mpsc;

use rand::Rng;

use crate::foundation::core::{Category, PerCategory};

/// Monotonically increasing identifier of a composite request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BatchToken(pub u64);

/// Published on every selection change; the compositor resolves and draws `snapshot`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeRequest {
    /// Sequence number of this request.
    pub token: BatchToken,
    /// Full selection tuple at the time of the change.
    pub snapshot: PerCategory<usize>,
}

/// Selected variant index per category.
///
/// Every stored index is in `[0, len)` of its category's list. For an empty list (head with no
/// loadable variants) the stored index is 0 and resolves to no image downstream.
#[derive(Debug)]
pub struct SelectionState {
    lens: PerCategory<usize>,
    indices: PerCategory<usize>,
    seq: u64,
    subscribers: Vec<mpsc::Sender<CompositeRequest>>,
}

impl SelectionState {
    /// Create a state for lists of the given lengths with every category at index 0.
    ///
    /// Nothing is published until the first mutation.
    pub fn new(lens: PerCategory<usize>) -> Self {
        Self {
            lens,
            indices: PerCategory::default(),
            seq: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber for composite requests.
    pub fn subscribe(&mut self) -> mpsc::Receiver<CompositeRequest> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Current index of `category`.
    pub fn get(&self, category: Category) -> usize {
        self.indices[category]
    }

    /// Copy of the full selection tuple.
    pub fn snapshot(&self) -> PerCategory<usize> {
        self.indices.clone()
    }

    /// List lengths this state guards against.
    pub fn lens(&self) -> &PerCategory<usize> {
        &self.lens
    }

    /// Token of the most recent published request, `None` before any change.
    pub fn latest_token(&self) -> Option<BatchToken> {
        (self.seq > 0).then_some(BatchToken(self.seq))
    }

    /// Select `index` in `category`.
    ///
    /// Out-of-range indices are ignored and `false` is returned; nothing is published.
    pub fn set(&mut self, category: Category, index: usize) -> bool {
        if index >= self.lens[category] {
            tracing::debug!(%category, index, len = self.lens[category], "ignoring out-of-range pick");
            return false;
        }
        self.indices[category] = index;
        self.publish();
        true
    }

    /// Draw a uniform index in `[0, len)` independently for every category, then publish once.
    pub fn randomize_all<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for category in Category::ALL {
            let len = self.lens[category];
            self.indices[category] = if len == 0 { 0 } else { rng.gen_range(0..len) };
        }
        self.publish();
    }

    fn publish(&mut self) {
        self.seq += 1;
        let request = CompositeRequest {
            token: BatchToken(self.seq),
            snapshot: self.indices.clone(),
        };
        self.subscribers
            .retain(|tx| tx.send(request.clone()).is_ok());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/selection/state.rs"]
mod tests;
