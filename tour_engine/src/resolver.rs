//! Pure resolution of hotspot targets against the loaded content. All of
//! the original viewer's per-layer `if/else` dispatch collapses into this
//! one module; the engine applies whatever comes out.

use tour_content::{ContentIndex, HotspotTarget, LayerId, LayerKind, LinkId, ProjectId, SceneId};

use crate::state::{NavigationState, NoOpReason};

/// The computed next position, or the classification of a target that
/// never navigates.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTransition {
    Navigate {
        layer: LayerId,
        link: Option<LinkId>,
        project: Option<ProjectId>,
        scene: Option<SceneId>,
    },
    NoOp(NoOpReason),
}

pub fn resolve(
    target: &HotspotTarget,
    current: &NavigationState,
    index: &ContentIndex,
) -> ResolvedTransition {
    match target {
        HotspotTarget::Layer { layer, link, scene } => {
            resolve_layer(*layer, link, scene.as_ref(), current, index)
        }
        HotspotTarget::Scene { project, scene } => {
            resolve_scene(project.as_ref(), scene.as_ref(), current, index)
        }
        HotspotTarget::ExternalLink { .. } => ResolvedTransition::NoOp(NoOpReason::ExternalEffect),
        HotspotTarget::AssetDisplay { .. } => ResolvedTransition::NoOp(NoOpReason::AssetDisplay),
    }
}

fn resolve_layer(
    layer_id: LayerId,
    link: &Option<LinkId>,
    scene: Option<&SceneId>,
    current: &NavigationState,
    index: &ContentIndex,
) -> ResolvedTransition {
    let Some(layer) = index.layer(layer_id) else {
        return ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget);
    };

    if layer.kind != LayerKind::Panorama {
        return ResolvedTransition::Navigate {
            layer: layer_id,
            link: link.clone(),
            project: None,
            scene: None,
        };
    }

    let Some(project) = layer.project.clone() else {
        log::warn!("panorama layer {layer_id} is bound to no project");
        return ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget);
    };
    let Some(graph) = index.graph(&project) else {
        return ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget);
    };

    // Landing scene precedence: the authored target scene when it resolves,
    // the carried-over current scene when staying in the same project, then
    // the project's default entry. Same hotspot, same content, same scene.
    let landing = scene
        .filter(|id| graph.get(*id).is_some())
        .cloned()
        .or_else(|| {
            current
                .active_scene
                .clone()
                .filter(|id| {
                    current.active_project.as_ref() == Some(&project) && graph.get(id).is_some()
                })
        })
        .or_else(|| graph.default_entry().map(|entry| entry.id.clone()));

    match landing {
        Some(landing) => ResolvedTransition::Navigate {
            layer: layer_id,
            link: link.clone(),
            project: Some(project),
            scene: Some(landing),
        },
        None => ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget),
    }
}

fn resolve_scene(
    project: Option<&ProjectId>,
    scene: Option<&SceneId>,
    current: &NavigationState,
    index: &ContentIndex,
) -> ResolvedTransition {
    let Some(project) = project.cloned().or_else(|| current.active_project.clone()) else {
        return ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget);
    };
    let Some(graph) = index.graph(&project) else {
        return ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget);
    };

    let landing = match scene {
        Some(requested) => match graph.get(requested) {
            Some(entry) => Some(entry.id.clone()),
            None => {
                // Lossy recovery, not silent loss: the authored id is bad
                // content, so fall back to the project default and say so.
                log::warn!(
                    "scene {requested} does not exist in project {project}; \
                     falling back to its default scene"
                );
                graph.default_entry().map(|entry| entry.id.clone())
            }
        },
        None => graph.default_entry().map(|entry| entry.id.clone()),
    };
    let Some(landing) = landing else {
        return ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget);
    };

    // Within the current project this is a scene swap; a project switch
    // also re-resolves which panorama layer hosts the destination.
    let layer = if current.active_project.as_ref() == Some(&project) {
        current.active_layer
    } else {
        index
            .layer_for_project(&project)
            .unwrap_or(current.active_layer)
    };

    ResolvedTransition::Navigate {
        layer,
        link: None,
        project: Some(project),
        scene: Some(landing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tour_content::{Layer, SceneGraph, SceneGraphEntry};

    fn entry(id: &str) -> SceneGraphEntry {
        SceneGraphEntry {
            id: SceneId::new(id),
            image_ref: format!("{id}.jpg"),
            display_name: None,
            hotspots: Vec::new(),
        }
    }

    fn fixture_index() -> ContentIndex {
        let mut index = ContentIndex::new();
        index.insert_layer(Layer {
            id: LayerId(1),
            kind: LayerKind::Video,
            media_ref: Some("tour.mp4".to_string()),
            project: None,
            hotspots: Vec::new(),
        });
        index.insert_layer(Layer {
            id: LayerId(3),
            kind: LayerKind::Panorama,
            media_ref: None,
            project: Some(ProjectId::new("p1")),
            hotspots: Vec::new(),
        });
        index.insert_graph(SceneGraph::new(
            ProjectId::new("p1"),
            Some(SceneId::new("s1")),
            vec![entry("s1"), entry("s2")],
        ));
        index.insert_graph(SceneGraph::new(
            ProjectId::new("p2"),
            Some(SceneId::new("s0")),
            vec![entry("s0")],
        ));
        index
    }

    fn at_scene(layer: u32, project: &str, scene: &str) -> NavigationState {
        NavigationState {
            active_layer: LayerId(layer),
            active_link: None,
            active_project: Some(ProjectId::new(project)),
            active_scene: Some(SceneId::new(scene)),
            playback_clock: None,
        }
    }

    #[test]
    fn layer_target_into_panorama_lands_on_default_scene() {
        let index = fixture_index();
        let current = NavigationState::entry(LayerId(1));
        let target = HotspotTarget::Layer {
            layer: LayerId(3),
            link: None,
            scene: None,
        };

        // Deterministic across repeated resolutions.
        for _ in 0..3 {
            assert_eq!(
                resolve(&target, &current, &index),
                ResolvedTransition::Navigate {
                    layer: LayerId(3),
                    link: None,
                    project: Some(ProjectId::new("p1")),
                    scene: Some(SceneId::new("s1")),
                }
            );
        }
    }

    #[test]
    fn layer_target_keeps_the_current_scene_when_none_is_authored() {
        let index = fixture_index();
        let current = at_scene(3, "p1", "s2");
        let target = HotspotTarget::Layer {
            layer: LayerId(3),
            link: None,
            scene: None,
        };

        let resolved = resolve(&target, &current, &index);
        assert_eq!(
            resolved,
            ResolvedTransition::Navigate {
                layer: LayerId(3),
                link: None,
                project: Some(ProjectId::new("p1")),
                scene: Some(SceneId::new("s2")),
            }
        );
    }

    #[test]
    fn unknown_layer_is_unresolvable() {
        let index = fixture_index();
        let current = NavigationState::entry(LayerId(1));
        let target = HotspotTarget::Layer {
            layer: LayerId(42),
            link: None,
            scene: None,
        };
        assert_eq!(
            resolve(&target, &current, &index),
            ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget)
        );
    }

    #[test]
    fn cross_project_scene_falls_back_to_target_default() {
        let index = fixture_index();
        let current = at_scene(3, "p1", "s1");
        let target = HotspotTarget::Scene {
            project: Some(ProjectId::new("p2")),
            scene: Some(SceneId::new("sX")),
        };

        assert_eq!(
            resolve(&target, &current, &index),
            ResolvedTransition::Navigate {
                layer: LayerId(3),
                link: None,
                project: Some(ProjectId::new("p2")),
                scene: Some(SceneId::new("s0")),
            }
        );
    }

    #[test]
    fn scene_target_without_project_stays_in_the_current_one() {
        let index = fixture_index();
        let current = at_scene(3, "p1", "s1");
        let target = HotspotTarget::Scene {
            project: None,
            scene: Some(SceneId::new("s2")),
        };

        assert_eq!(
            resolve(&target, &current, &index),
            ResolvedTransition::Navigate {
                layer: LayerId(3),
                link: None,
                project: Some(ProjectId::new("p1")),
                scene: Some(SceneId::new("s2")),
            }
        );
    }

    #[test]
    fn scene_target_with_no_loaded_graph_is_unresolvable() {
        let index = fixture_index();
        let current = at_scene(3, "p1", "s1");
        let target = HotspotTarget::Scene {
            project: Some(ProjectId::new("p9")),
            scene: None,
        };
        assert_eq!(
            resolve(&target, &current, &index),
            ResolvedTransition::NoOp(NoOpReason::UnresolvableTarget)
        );
    }

    #[test]
    fn external_targets_never_navigate() {
        let index = fixture_index();
        let current = NavigationState::entry(LayerId(1));

        let link = HotspotTarget::ExternalLink {
            url: "https://example.com/brochure".to_string(),
        };
        assert_eq!(
            resolve(&link, &current, &index),
            ResolvedTransition::NoOp(NoOpReason::ExternalEffect)
        );

        let asset = HotspotTarget::AssetDisplay {
            asset_ref: Some("floorplan.png".to_string()),
            render_hint: None,
        };
        assert_eq!(
            resolve(&asset, &current, &index),
            ResolvedTransition::NoOp(NoOpReason::AssetDisplay)
        );
    }
}
