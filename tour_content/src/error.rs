use thiserror::Error;

use crate::ids::HotspotId;

/// Per-record conversion failures. The loader reports these and skips the
/// offending record; a bad hotspot never fails a whole collection.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("hotspot {id} has unknown type {kind:?}")]
    UnknownHotspotType { id: HotspotId, kind: String },
    #[error("hotspot {id} is missing its {field} target")]
    MissingTarget { id: HotspotId, field: &'static str },
}
