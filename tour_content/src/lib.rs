//! Content-store data model for the tour viewer.
//!
//! The CMS serves four read-only record collections (layers, hotspots,
//! projects, per-project scenes). This crate mirrors those raw shapes,
//! converts them into the typed hotspot/scene model the navigation engine
//! consumes, and loads a content-root snapshot into a `ContentIndex`.

pub mod error;
pub mod hotspot;
pub mod ids;
pub mod records;
pub mod scene_graph;
pub mod store;

pub use error::ContentError;
pub use hotspot::{HotspotModel, HotspotTarget, Position, Visibility};
pub use ids::{HotspotId, LayerId, LinkId, ProjectId, SceneId};
pub use scene_graph::{SceneGraph, SceneGraphEntry};
pub use store::{ContentIndex, Layer, LayerKind, ProjectInfo};
