//! The dispatching store that owns the live project state.
//!
//! [`ProjectStore`] serializes all mutations through [`crate::reduce`] and
//! publishes each committed state by swapping it into a shared handle.
//! Readers (the preview loop, the export driver) take cheap snapshots and
//! never observe a half-applied action.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::action::Action;
use crate::state::ProjectState;

/// Shared read handle over the latest committed state.
pub type SharedState = Arc<RwLock<ProjectState>>;

/// Owns the project state and applies actions in dispatch order.
pub struct ProjectStore {
    shared: SharedState,
    next_clip_id: u64,
    next_track_id: u64,
    next_asset_id: u64,
}

impl ProjectStore {
    /// Create a store over a fresh default project.
    pub fn new() -> Self {
        Self::with_state(ProjectState::new())
    }

    /// Create a store over an existing state (e.g. a restored session).
    pub fn with_state(state: ProjectState) -> Self {
        Self {
            shared: Arc::new(RwLock::new(state)),
            next_clip_id: 1,
            next_track_id: 1,
            next_asset_id: 1,
        }
    }

    /// Handle for readers; clones are cheap and stay live across dispatches.
    pub fn shared(&self) -> SharedState {
        Arc::clone(&self.shared)
    }

    /// A snapshot of the current state.
    pub fn snapshot(&self) -> ProjectState {
        match self.shared.read() {
            Ok(guard) => guard.clone(),
            // A writer panicked mid-commit; the data is still a whole
            // ProjectState value, so continue with it.
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply an action and publish the resulting state.
    pub fn dispatch(&self, action: &Action) {
        match self.shared.write() {
            Ok(mut guard) => {
                let next = crate::reduce(&guard, action);
                *guard = next;
            }
            Err(poisoned) => {
                let mut guard = poisoned.into_inner();
                let next = crate::reduce(&guard, action);
                *guard = next;
            }
        }
        debug!(action = ?discriminant_name(action), "dispatched");
    }

    /// Apply a batch of actions as consecutive dispatches.
    pub fn dispatch_all<'a>(&self, actions: impl IntoIterator<Item = &'a Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Allocate a fresh clip id (`clip-1`, `clip-2`, ...).
    pub fn alloc_clip_id(&mut self) -> String {
        let id = format!("clip-{}", self.next_clip_id);
        self.next_clip_id += 1;
        id
    }

    /// Allocate a fresh track id.
    pub fn alloc_track_id(&mut self) -> String {
        let id = format!("track-{}", self.next_track_id);
        self.next_track_id += 1;
        id
    }

    /// Allocate a fresh asset id.
    pub fn alloc_asset_id(&mut self) -> String {
        let id = format!("asset-{}", self.next_asset_id);
        self.next_asset_id += 1;
        id
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn discriminant_name(action: &Action) -> &'static str {
    match action {
        Action::SetProject(_) => "set_project",
        Action::AddAsset(_) => "add_asset",
        Action::RemoveAsset { .. } => "remove_asset",
        Action::AddClip(_) => "add_clip",
        Action::UpdateClip { .. } => "update_clip",
        Action::RemoveClip { .. } => "remove_clip",
        Action::SetSelection { .. } => "set_selection",
        Action::SetPlayhead { .. } => "set_playhead",
        Action::SetZoom { .. } => "set_zoom",
        Action::TogglePlayback => "toggle_playback",
        Action::AddTrack { .. } => "add_track",
        Action::RemoveTrack { .. } => "remove_track",
        Action::UpdateTrack { .. } => "update_track",
        Action::SplitClip { .. } => "split_clip",
        Action::Tick { .. } => "tick",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Clip;
    use crate::effects::ClipEffects;

    #[test]
    fn test_dispatch_publishes_to_shared_handle() {
        let store = ProjectStore::new();
        let shared = store.shared();

        store.dispatch(&Action::SetZoom { zoom: 75.0 });

        assert_eq!(shared.read().unwrap().zoom, 75.0);
        assert_eq!(store.snapshot().zoom, 75.0);
    }

    #[test]
    fn test_dispatch_order_is_preserved() {
        let mut store = ProjectStore::new();
        let clip_id = store.alloc_clip_id();
        let clip = Clip {
            id: clip_id.clone(),
            asset_id: "asset-1".into(),
            track_id: "track-v1".into(),
            start_time: 0.0,
            offset: 0.0,
            duration: 4.0,
            name: "shot".into(),
            effects: ClipEffects::default(),
            transition: None,
        };

        store.dispatch_all(&[
            Action::AddClip(clip),
            Action::SplitClip {
                clip_id: clip_id.clone(),
                time: 1.0,
            },
            Action::RemoveClip { clip_id },
        ]);

        let state = store.snapshot();
        assert_eq!(state.clips.len(), 1); // only the right half remains
        assert!((state.clips[0].start_time - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_id_allocation_is_monotonic() {
        let mut store = ProjectStore::new();
        assert_eq!(store.alloc_clip_id(), "clip-1");
        assert_eq!(store.alloc_clip_id(), "clip-2");
        assert_eq!(store.alloc_track_id(), "track-1");
        assert_eq!(store.alloc_asset_id(), "asset-1");
    }
}
