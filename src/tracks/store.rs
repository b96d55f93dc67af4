use std::sync::Arc;

use tokio::sync::Mutex;

use crate::tracks::state::{Action, TracksState, reduce};

pub type Listener = Box<dyn Fn(&TracksState) + Send + Sync>;

/// Shared handle to the store, passed explicitly to everything that reads
/// or writes tracks state.
pub type SharedStore = Arc<Mutex<Store>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owner of the tracks state. All mutations go through [`Store::dispatch`]
/// or [`Store::dispatch_all`].
#[derive(Default)]
pub struct Store {
    state: TracksState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: TracksState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> &TracksState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> &TracksState {
        reduce(&mut self.state, action);
        self.notify();
        &self.state
    }

    /// Applies all actions before any listener runs, so subscribers only
    /// observe the combined result.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) -> &TracksState {
        for action in actions {
            reduce(&mut self.state, action);
        }
        self.notify();
        &self.state
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&TracksState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}
