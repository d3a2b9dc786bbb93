//! Imported media assets.

use std::future::Future;

use framecut_common::error::FramecutResult;
use serde::{Deserialize, Serialize};

/// Kind of media an asset or track carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    Audio,
}

impl MediaKind {
    /// Whether an asset of this kind may be placed on a track of `track_kind`.
    ///
    /// Audio assets only land on audio tracks; visual assets never do.
    pub fn compatible_with_track(self, track_kind: MediaKind) -> bool {
        match track_kind {
            MediaKind::Audio => self == MediaKind::Audio,
            _ => self != MediaKind::Audio,
        }
    }
}

/// An imported piece of media, owned by the project.
///
/// Clips reference assets by id and never own them. Removing an asset does
/// not cascade to clips; the compositor simply draws nothing for a clip
/// whose asset is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier.
    pub id: String,

    /// Display name (usually the imported file name).
    pub name: String,

    /// Media kind.
    pub kind: MediaKind,

    /// Opaque source handle (blob URL, path). Resolved by the decode
    /// surface, never dereferenced by the model.
    pub source: String,

    /// Intrinsic duration in seconds. Images report a nominal default.
    pub duration_secs: f64,
}

/// Metadata resolved by the host's import surface.
#[derive(Debug, Clone, Copy)]
pub struct MediaProbe {
    pub kind: MediaKind,
    pub duration_secs: f64,
}

/// Import a piece of media, resolving its metadata asynchronously.
///
/// The store only ever receives the fully resolved [`Asset`]; there is no
/// partially loaded state.
pub async fn import_asset<F>(
    id: String,
    name: String,
    source: String,
    probe: F,
) -> FramecutResult<Asset>
where
    F: Future<Output = FramecutResult<MediaProbe>>,
{
    let meta = probe.await?;
    Ok(Asset {
        id,
        name,
        kind: meta.kind,
        source,
        duration_secs: meta.duration_secs,
    })
}
