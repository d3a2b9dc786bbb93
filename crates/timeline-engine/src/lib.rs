//! Framecut Timeline Engine
//!
//! Translates pointer gestures over the timeline surface into project
//! actions:
//! - **Geometry:** pixel ↔ second conversion and track-row hit testing
//! - **Snapping:** magnetic alignment against clip edges and the playhead
//! - **Drag:** the drag-to-move session state machine
//! - **Drop:** asset and preset drop validation
//!
//! The engine never mutates state itself; every accepted gesture resolves
//! to an [`framecut_project_model::Action`] for the store to dispatch, and
//! every rejected gesture resolves to nothing.

pub mod drag;
pub mod drop;
pub mod geometry;
pub mod snap;

pub use drag::{DragOutcome, DragSession};
pub use drop::{drop_asset, drop_preset};
pub use geometry::TimelineGeometry;
pub use snap::{resolve_snap, snap_targets, SnapResolution};
