//! Framecut Project Model
//!
//! Defines the core data contracts for Framecut sessions:
//! - **Media:** Imported assets and their intrinsic metadata
//! - **Tracks & Clips:** The multi-track timeline arrangement
//! - **Effects:** Per-clip visual/audio parameters and named presets
//! - **State & Reducer:** The authoritative project state tree and the
//!   pure transition function enacting every mutation
//!
//! All times are in seconds. The project is session-scoped and never
//! persisted; serde derives exist for diagnostics and wire-free snapshots,
//! not for a save format.

pub mod action;
pub mod clip;
pub mod effects;
pub mod media;
pub mod presets;
pub mod reducer;
pub mod state;
pub mod store;
pub mod track;

pub use action::*;
pub use clip::*;
pub use effects::*;
pub use media::*;
pub use presets::*;
pub use reducer::reduce;
pub use state::*;
pub use store::*;
pub use track::*;
