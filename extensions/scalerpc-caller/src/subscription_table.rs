use crate::constants::RETIRED_SUBSCRIPTION_HISTORY;
use crate::rpc_correlator::SubscriptionEvent;
use futures::channel::mpsc;
use scalerpc::rpc::SubscriptionId;
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubscriptionState {
    Active,
    /// An unsubscribe call is in flight; notifications are dropped.
    Stopping,
}

pub(crate) struct SubscriptionEntry {
    pub sender: mpsc::UnboundedSender<SubscriptionEvent>,
    pub unsubscribe_method: String,
    pub state: SubscriptionState,
}

impl SubscriptionEntry {
    pub fn new(sender: mpsc::UnboundedSender<SubscriptionEvent>, unsubscribe_method: String) -> Self {
        Self {
            sender,
            unsubscribe_method,
            state: SubscriptionState::Active,
        }
    }
}

/// Live subscriptions plus the most recently closed ids on this connection,
/// so a repeated stop can be told apart from an unknown id.
pub(crate) struct SubscriptionTable {
    live: HashMap<SubscriptionId, SubscriptionEntry>,
    retired: HashSet<SubscriptionId>,
    retired_order: VecDeque<SubscriptionId>,
    history: usize,
}

impl Default for SubscriptionTable {
    fn default() -> Self {
        Self::with_history(RETIRED_SUBSCRIPTION_HISTORY)
    }
}

impl SubscriptionTable {
    pub fn with_history(history: usize) -> Self {
        Self {
            live: HashMap::new(),
            retired: HashSet::new(),
            retired_order: VecDeque::new(),
            history,
        }
    }

    /// Returns `true` if a live entry was replaced.
    pub fn insert(&mut self, id: SubscriptionId, entry: SubscriptionEntry) -> bool {
        if self.retired.remove(&id) {
            self.retired_order.retain(|retired| retired != &id);
        }
        self.live.insert(id, entry).is_some()
    }

    pub fn get(&self, id: &SubscriptionId) -> Option<&SubscriptionEntry> {
        self.live.get(id)
    }

    pub fn get_mut(&mut self, id: &SubscriptionId) -> Option<&mut SubscriptionEntry> {
        self.live.get_mut(id)
    }

    /// Moves a live entry to the retired set and hands it back. Dropping the
    /// returned entry ends the consumer's stream.
    pub fn retire(&mut self, id: &SubscriptionId) -> Option<SubscriptionEntry> {
        let entry = self.live.remove(id)?;
        self.remember_retired(id.clone());
        Some(entry)
    }

    pub fn retire_all(&mut self) -> Vec<SubscriptionEntry> {
        let live = std::mem::take(&mut self.live);
        live.into_iter()
            .map(|(id, entry)| {
                self.remember_retired(id);
                entry
            })
            .collect()
    }

    fn remember_retired(&mut self, id: SubscriptionId) {
        if !self.retired.insert(id.clone()) {
            return;
        }
        self.retired_order.push_back(id);
        while self.retired_order.len() > self.history {
            if let Some(oldest) = self.retired_order.pop_front() {
                self.retired.remove(&oldest);
            }
        }
    }

    pub fn is_retired(&self, id: &SubscriptionId) -> bool {
        self.retired.contains(id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }
}
