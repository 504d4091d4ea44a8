//! The view-state store: the single mutable piece of the application.
//!
//! The store owns the current [`ViewState`] and the preference backend.
//! Rendering code reads snapshots and asks for changes through
//! [`ViewStore::dispatch`]; it never writes the state directly.

use crate::models::{DeviceMode, Transition, ViewState};
use crate::services::preferences::{save_legend, save_unit, KeyValueStore, Preferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ViewState)>;

pub struct ViewStore<S: KeyValueStore> {
    state: ViewState,
    preferences: S,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<S: KeyValueStore> ViewStore<S> {
    /// Initial state with unit and legend restored from `preferences`.
    pub fn new(preferences: S, mode: DeviceMode) -> Self {
        let restored = Preferences::load(&preferences, mode);
        let state = ViewState::new(restored.unit, restored.legend_visible);
        Self::with_state(state, preferences)
    }

    /// Resume from a known state, e.g. one sent back by the client.
    pub fn with_state(state: ViewState, preferences: S) -> Self {
        ViewStore {
            state,
            preferences,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn preferences(&self) -> &S {
        &self.preferences
    }

    pub fn into_preferences(self) -> S {
        self.preferences
    }

    /// Apply a transition. Unit and legend changes are persisted;
    /// subscribers hear about every change.
    pub fn dispatch(&mut self, transition: Transition) -> &ViewState {
        let next = self.state.apply(&transition);
        if next == self.state {
            return &self.state;
        }

        if next.unit != self.state.unit {
            save_unit(&mut self.preferences, next.unit);
        }
        if next.legend_visible != self.state.legend_visible {
            save_legend(&mut self.preferences, next.legend_visible);
        }

        tracing::debug!(?transition, day = %next.day, "View state changed");
        self.state = next;

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
        &self.state
    }

    /// Register a change listener. Keep the id and unsubscribe on teardown.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ViewState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}
