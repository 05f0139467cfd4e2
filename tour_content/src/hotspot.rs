use serde::{Deserialize, Serialize};

use crate::ids::{HotspotId, LayerId, LinkId, ProjectId, SceneId};

/// Placement of a hotspot as percentages (0-100) of the rendered frame
/// width/height, so the same record works at any output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x_pct: f32,
    pub y_pct: f32,
}

/// When a hotspot is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visibility {
    /// Shown whenever the owning layer is displayed.
    Always,
    /// Shown while the playback clock sits inside the window, bounds
    /// inclusive. An inverted window (`start > end`) never matches; the
    /// content store is expected to reject such records upstream and this
    /// model does not repair them.
    TimeWindow { start: f64, end: f64 },
    /// Shown whenever the owning panorama scene is displayed.
    SceneLocal,
}

impl Visibility {
    pub fn matches_clock(&self, clock: f64) -> bool {
        match self {
            Visibility::Always | Visibility::SceneLocal => true,
            Visibility::TimeWindow { start, end } => *start <= clock && clock <= *end,
        }
    }
}

/// Where activating a hotspot takes the viewer. The dispatch on this enum
/// lives in exactly one place (the target resolver); the record `type`
/// strings scattered through the store collapse into these four cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HotspotTarget {
    /// Jump to another top-level layer, optionally selecting a
    /// frame-sequence link or a panorama scene inside it.
    Layer {
        layer: LayerId,
        link: Option<LinkId>,
        scene: Option<SceneId>,
    },
    /// Jump to a scene, possibly in a different project. A missing project
    /// means "the current one".
    Scene {
        project: Option<ProjectId>,
        scene: Option<SceneId>,
    },
    /// Open outside the engine; never mutates navigation state.
    ExternalLink { url: String },
    /// Show a static image/icon at the hotspot; never mutates state.
    AssetDisplay {
        asset_ref: Option<String>,
        render_hint: Option<String>,
    },
}

/// One interactive region within a layer or scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotModel {
    pub id: HotspotId,
    pub position: Position,
    pub visibility: Visibility,
    pub target: HotspotTarget,
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f64, end: f64) -> Visibility {
        Visibility::TimeWindow { start, end }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let v = window(13.0, 18.0);
        assert!(v.matches_clock(13.0));
        assert!(v.matches_clock(15.0));
        assert!(v.matches_clock(18.0));
    }

    #[test]
    fn clock_outside_window_is_hidden() {
        let v = window(13.0, 18.0);
        assert!(!v.matches_clock(12.999));
        assert!(!v.matches_clock(18.001));
    }

    #[test]
    fn inverted_window_never_matches() {
        let v = window(18.0, 13.0);
        assert!(!v.matches_clock(15.0));
        assert!(!v.matches_clock(18.0));
    }

    #[test]
    fn always_and_scene_local_ignore_the_clock() {
        assert!(Visibility::Always.matches_clock(-1.0));
        assert!(Visibility::SceneLocal.matches_clock(9999.0));
    }
}
