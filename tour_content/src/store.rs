use std::{
    collections::BTreeMap,
    fs,
    path::Path,
};

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;

use crate::hotspot::{HotspotModel, Visibility};
use crate::ids::{LayerId, ProjectId, SceneId};
use crate::records::{HotspotRecord, LayerRecord, ProjectRecord, SceneCollection};
use crate::scene_graph::{SceneGraph, SceneGraphEntry};

/// The four top-level tour modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Video,
    Object360,
    Panorama,
    Document,
}

impl LayerKind {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "video" => Some(LayerKind::Video),
            "object360" => Some(LayerKind::Object360),
            "panorama" => Some(LayerKind::Panorama),
            "iframe" => Some(LayerKind::Document),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Video => "video",
            LayerKind::Object360 => "object360",
            LayerKind::Panorama => "panorama",
            LayerKind::Document => "iframe",
        }
    }

    /// Layers that occupy the whole viewport; the host page hides its
    /// chrome while one of these is active.
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, LayerKind::Panorama | LayerKind::Document)
    }
}

/// A loaded layer with its typed hotspots.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub kind: LayerKind,
    pub media_ref: Option<String>,
    pub project: Option<ProjectId>,
    pub hotspots: Vec<HotspotModel>,
}

/// Project metadata without its scene graph.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub id: ProjectId,
    pub name: String,
    pub default_scene: Option<SceneId>,
}

/// All loaded content, read-only from the engine's point of view apart
/// from fetch completions replacing a project's scene graph.
#[derive(Debug, Default, Clone)]
pub struct ContentIndex {
    layers: BTreeMap<LayerId, Layer>,
    projects: BTreeMap<ProjectId, ProjectInfo>,
    graphs: BTreeMap<ProjectId, SceneGraph>,
}

impl ContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a content-root snapshot: `layers.json`, `hotspots.json`,
    /// `projects.json`, and `scenes/<projectId>.json` per project. A
    /// missing or unparsable collection degrades to empty; only a missing
    /// root directory is an error.
    pub fn load_from_dir(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            bail!("content root {} is not a directory", root.display());
        }

        let mut index = ContentIndex::new();

        let layer_records: Vec<LayerRecord> =
            read_or_default(&root.join("layers.json"), "layer records");
        for record in layer_records {
            let Some(kind) = LayerKind::from_str(&record.kind) else {
                log::warn!(
                    "layer {} has unknown type {:?}; skipping it",
                    record.id,
                    record.kind
                );
                continue;
            };
            let mut hotspots = Vec::new();
            for hotspot in record.hotspots {
                match hotspot.into_model() {
                    Ok(model) => hotspots.push(model),
                    Err(err) => log::warn!("skipping hotspot on layer {}: {err}", record.id),
                }
            }
            index.insert_layer(Layer {
                id: LayerId(record.id),
                kind,
                media_ref: record.media_url,
                project: record.project_id.map(ProjectId::new),
                hotspots,
            });
        }

        let project_records: Vec<ProjectRecord> =
            read_or_default(&root.join("projects.json"), "project records");
        for record in project_records {
            let ProjectRecord {
                id,
                name,
                default_scene_id,
            } = record;
            let project = ProjectId::new(id);
            let scene_path = root.join("scenes").join(format!("{project}.json"));
            let SceneCollection(scene_records) =
                read_or_default(&scene_path, "scene records");

            let mut entries = Vec::new();
            for (scene_id, scene) in scene_records {
                let mut hotspots = Vec::new();
                for hotspot in scene.hotspots {
                    match hotspot.into_model() {
                        Ok(mut model) => {
                            if model.visibility == Visibility::Always {
                                model.visibility = Visibility::SceneLocal;
                            }
                            hotspots.push(model);
                        }
                        Err(err) => log::warn!(
                            "skipping hotspot in scene {scene_id} of project {project}: {err}"
                        ),
                    }
                }
                entries.push(SceneGraphEntry {
                    id: SceneId::new(scene_id),
                    image_ref: scene.scene,
                    display_name: scene.name,
                    hotspots,
                });
            }

            let graph = SceneGraph::new(
                project.clone(),
                default_scene_id.map(SceneId::new),
                entries,
            );
            index.insert_project(ProjectInfo {
                id: project.clone(),
                name,
                default_scene: graph.default_scene.clone(),
            });
            index.insert_graph(graph);
        }

        let standalone: Vec<HotspotRecord> =
            read_or_default(&root.join("hotspots.json"), "hotspot records");
        for record in standalone {
            let owner_media = record.media_id.clone();
            let owner_scene = record.scene_id.clone().map(SceneId::new);
            let model = match record.into_model() {
                Ok(model) => model,
                Err(err) => {
                    log::warn!("skipping standalone hotspot: {err}");
                    continue;
                }
            };
            index.attach_standalone(owner_media, owner_scene, model);
        }

        Ok(index)
    }

    pub fn insert_layer(&mut self, layer: Layer) {
        self.layers.insert(layer.id, layer);
    }

    pub fn insert_project(&mut self, info: ProjectInfo) {
        self.projects.insert(info.id.clone(), info);
    }

    pub fn insert_graph(&mut self, graph: SceneGraph) {
        self.graphs.insert(graph.project.clone(), graph);
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    pub fn project(&self, id: &ProjectId) -> Option<&ProjectInfo> {
        self.projects.get(id)
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectInfo> {
        self.projects.values()
    }

    pub fn graph(&self, id: &ProjectId) -> Option<&SceneGraph> {
        self.graphs.get(id)
    }

    pub fn scene_entry(&self, project: &ProjectId, scene: &SceneId) -> Option<&SceneGraphEntry> {
        self.graphs.get(project)?.get(scene)
    }

    /// The panorama layer bound to a project, lowest layer id first.
    pub fn layer_for_project(&self, id: &ProjectId) -> Option<LayerId> {
        self.layers
            .values()
            .find(|layer| layer.kind == LayerKind::Panorama && layer.project.as_ref() == Some(id))
            .map(|layer| layer.id)
    }

    fn attach_standalone(
        &mut self,
        media: Option<String>,
        scene: Option<SceneId>,
        model: HotspotModel,
    ) {
        if let Some(media) = media {
            if let Some(layer) = media
                .parse::<u32>()
                .ok()
                .and_then(|raw| self.layers.get_mut(&LayerId(raw)))
            {
                layer.hotspots.push(model);
                return;
            }
            log::warn!(
                "hotspot {} references unknown media {media:?}; dropping it",
                model.id
            );
            return;
        }

        if let Some(scene) = scene {
            for graph in self.graphs.values_mut() {
                if graph.get(&scene).is_some() {
                    graph.attach_hotspot(&scene, model);
                    return;
                }
            }
            log::warn!(
                "hotspot {} references unknown scene {scene}; dropping it",
                model.id
            );
            return;
        }

        log::warn!("hotspot {} names no owning media or scene; dropping it", model.id);
    }
}

/// Read one collection file, treating absence or a parse failure as an
/// empty collection (the engine keeps navigating with whatever loaded).
fn read_or_default<T>(path: &Path, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        log::warn!(
            "content root has no {what} at {}; continuing without them",
            path.display()
        );
        return T::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("failed to read {what} from {}: {err}", path.display());
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("failed to parse {what} from {}: {err}", path.display());
            T::default()
        }
    }
}
