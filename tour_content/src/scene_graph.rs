use serde::Serialize;

use crate::hotspot::{HotspotModel, Visibility};
use crate::ids::{ProjectId, SceneId};

/// One scene of a panorama project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneGraphEntry {
    pub id: SceneId,
    pub image_ref: String,
    pub display_name: Option<String>,
    pub hotspots: Vec<HotspotModel>,
}

/// A project's scenes in authored order, with the default-scene rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneGraph {
    pub project: ProjectId,
    pub default_scene: Option<SceneId>,
    entries: Vec<SceneGraphEntry>,
}

impl SceneGraph {
    pub fn new(
        project: ProjectId,
        default_scene: Option<SceneId>,
        entries: Vec<SceneGraphEntry>,
    ) -> Self {
        if let Some(id) = default_scene.as_ref() {
            if !entries.iter().any(|entry| &entry.id == id) {
                log::warn!(
                    "project {project}: default scene {id} is not among its scenes; \
                     the first authored scene will be used instead"
                );
            }
        }
        SceneGraph {
            project,
            default_scene,
            entries,
        }
    }

    pub fn get(&self, id: &SceneId) -> Option<&SceneGraphEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// The scene a navigation lands on when none is named: the authored
    /// default if it resolves, else the first authored scene. Deterministic
    /// for a given graph.
    pub fn default_entry(&self) -> Option<&SceneGraphEntry> {
        self.default_scene
            .as_ref()
            .and_then(|id| self.get(id))
            .or_else(|| self.entries.first())
    }

    pub fn entries(&self) -> &[SceneGraphEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach a standalone hotspot record to its owning scene. Scene-owned
    /// hotspots are visible whenever the scene is, so an `Always` visibility
    /// is narrowed to `SceneLocal`.
    pub fn attach_hotspot(&mut self, scene: &SceneId, mut hotspot: HotspotModel) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| &entry.id == scene) else {
            return false;
        };
        if hotspot.visibility == Visibility::Always {
            hotspot.visibility = Visibility::SceneLocal;
        }
        entry.hotspots.push(hotspot);
        true
    }
}
