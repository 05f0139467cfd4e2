use serde::Serialize;

use tour_content::{ContentIndex, LayerId, LayerKind, LinkId, ProjectId, SceneId};

/// Where the viewer currently is. Exactly one instance lives inside the
/// engine; it is only rewritten by `activate`, `go_back`, and the playback
/// clock tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    pub active_layer: LayerId,
    pub active_link: Option<LinkId>,
    pub active_project: Option<ProjectId>,
    pub active_scene: Option<SceneId>,
    pub playback_clock: Option<f64>,
}

impl NavigationState {
    pub fn entry(layer: LayerId) -> Self {
        NavigationState {
            active_layer: layer,
            active_link: None,
            active_project: None,
            active_scene: None,
            playback_clock: None,
        }
    }
}

/// A saved prior position for back navigation. The scene variant carries
/// its hosting layer: nothing else records which panorama layer was
/// active, and "back" must re-enter it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationFrame {
    Layer {
        layer: LayerId,
        link: Option<LinkId>,
    },
    Scene {
        layer: LayerId,
        project: ProjectId,
        scene: SceneId,
    },
}

impl NavigationFrame {
    /// Snapshot the current position ahead of a forward jump. A panorama
    /// position is captured scene-first so "back" lands on the same scene.
    pub fn capture(state: &NavigationState, index: &ContentIndex) -> Self {
        let in_panorama = index
            .layer(state.active_layer)
            .map_or(false, |layer| layer.kind == LayerKind::Panorama);
        match (&state.active_project, &state.active_scene) {
            (Some(project), Some(scene)) if in_panorama => NavigationFrame::Scene {
                layer: state.active_layer,
                project: project.clone(),
                scene: scene.clone(),
            },
            _ => NavigationFrame::Layer {
                layer: state.active_layer,
                link: state.active_link.clone(),
            },
        }
    }

    /// Rebuild the state this frame was captured from. The playback clock
    /// is not part of a frame; restored video layers start from the
    /// player's own position.
    pub fn restore(&self) -> NavigationState {
        match self {
            NavigationFrame::Layer { layer, link } => NavigationState {
                active_layer: *layer,
                active_link: link.clone(),
                active_project: None,
                active_scene: None,
                playback_clock: None,
            },
            NavigationFrame::Scene {
                layer,
                project,
                scene,
            } => NavigationState {
                active_layer: *layer,
                active_link: None,
                active_project: Some(project.clone()),
                active_scene: Some(scene.clone()),
                playback_clock: None,
            },
        }
    }
}

/// What an `activate` or `go_back` call did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum TransitionOutcome {
    Navigated(NavigationState),
    NoOp(NoOpReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    /// External link; opening it is the caller's effect to perform.
    ExternalEffect,
    /// Info/asset hotspot; shows in place, never navigates.
    AssetDisplay,
    /// `go_back` with nothing to go back to. There is no layer 0.
    EmptyHistory,
    /// The target names a layer/project/scene absent from loaded content.
    UnresolvableTarget,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tour_content::{Layer, LayerKind};

    fn index_with_panorama() -> ContentIndex {
        let mut index = ContentIndex::new();
        index.insert_layer(Layer {
            id: LayerId(3),
            kind: LayerKind::Panorama,
            media_ref: None,
            project: Some(ProjectId::new("p1")),
            hotspots: Vec::new(),
        });
        index
    }

    #[test]
    fn panorama_position_captures_as_scene_frame() {
        let index = index_with_panorama();
        let state = NavigationState {
            active_layer: LayerId(3),
            active_link: None,
            active_project: Some(ProjectId::new("p1")),
            active_scene: Some(SceneId::new("s1")),
            playback_clock: None,
        };
        let frame = NavigationFrame::capture(&state, &index);
        assert_eq!(
            frame,
            NavigationFrame::Scene {
                layer: LayerId(3),
                project: ProjectId::new("p1"),
                scene: SceneId::new("s1"),
            }
        );
        assert_eq!(frame.restore(), state);
    }

    #[test]
    fn non_panorama_position_captures_as_layer_frame() {
        let index = index_with_panorama();
        let state = NavigationState::entry(LayerId(1));
        let frame = NavigationFrame::capture(&state, &index);
        assert_eq!(
            frame,
            NavigationFrame::Layer {
                layer: LayerId(1),
                link: None,
            }
        );
        assert_eq!(frame.restore(), state);
    }
}
