//! Framecut Render Engine
//!
//! Software compositing pipeline shared by the live preview and the export
//! path:
//!
//! ```text
//! ProjectState ──┐
//!                ├── active clip selection (per timestamp)
//! SourceBank ────┘          │
//!                           ├── transition fx (enter/exit)
//!                           ├── filter chain (blur, color)
//!                           ├── transform (rotate, scale)
//!                           ├── blend + opacity composite
//!                           ├── tint overlay
//!                           └── vignette
//!                                   │
//!                                   ▼
//!                      Frame (RGBA8) ──► preview / Encoder
//! ```
//!
//! The per-frame entry point, [`compositor::render_frame`], is pure:
//! identical state, sources, and timestamp produce identical pixels, which
//! is what keeps preview and export output in agreement.

pub mod blend;
pub mod compositor;
pub mod export;
pub mod filter;
pub mod frame;
pub mod playback;
pub mod source;
pub mod transform;
pub mod transition;

pub use compositor::render_frame;
pub use export::*;
pub use frame::{Frame, Rgba};
pub use source::{FrameSource, SourceBank};
