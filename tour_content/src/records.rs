//! Raw record shapes as the content store serves them, plus their
//! conversion into the typed model. Field names follow the store's own
//! camelCase JSON.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ContentError;
use crate::hotspot::{HotspotModel, HotspotTarget, Position, Visibility};
use crate::ids::{HotspotId, LayerId, LinkId, ProjectId, SceneId};

/// Top-level layer record (`layers.json`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRecord {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub hotspots: Vec<HotspotRecord>,
}

/// Hotspot record, either embedded in a layer/scene or standalone in
/// `hotspots.json` keyed by `mediaId`/`sceneId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotRecord {
    pub id: String,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub scene_id: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub target_layer_id: Option<u32>,
    #[serde(default)]
    pub target_link_id: Option<String>,
    #[serde(default)]
    pub target_project_id: Option<String>,
    #[serde(default)]
    pub target_scene_id: Option<String>,
    #[serde(default)]
    pub target_asset_url: Option<String>,
    #[serde(default)]
    pub render_hint: Option<String>,
    #[serde(default)]
    pub time_start: Option<f64>,
    #[serde(default)]
    pub time_end: Option<f64>,
}

/// Project record (`projects.json`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub default_scene_id: Option<String>,
}

/// One scene inside a project's `scenes/<projectId>.json` map.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneRecord {
    pub scene: String,
    #[serde(default)]
    pub hotspots: Vec<HotspotRecord>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The scene map in authored order. The first authored scene is the
/// fallback when a project has no usable default, so insertion order is
/// load-bearing and a plain `BTreeMap` would destroy it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneCollection(
    #[serde(deserialize_with = "ordered_scenes")] pub Vec<(String, SceneRecord)>,
);

fn ordered_scenes<'de, D>(deserializer: D) -> Result<Vec<(String, SceneRecord)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedScenes;

    impl<'de> Visitor<'de> for OrderedScenes {
        type Value = Vec<(String, SceneRecord)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of scene ids to scene records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, SceneRecord>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedScenes)
}

impl HotspotRecord {
    /// Convert the raw record into the typed model, dispatching the store's
    /// `type` string exactly once.
    pub fn into_model(self) -> Result<HotspotModel, ContentError> {
        let id = HotspotId::new(self.id.clone());

        let visibility = match (self.time_start, self.time_end) {
            (None, None) if self.scene_id.is_some() => Visibility::SceneLocal,
            (None, None) => Visibility::Always,
            (start, end) => {
                let start = start.unwrap_or(0.0);
                let end = end.unwrap_or(f64::INFINITY);
                if start > end {
                    log::warn!(
                        "hotspot {} has an inverted time window ({start}..{end}); it will never be visible",
                        self.id
                    );
                }
                Visibility::TimeWindow { start, end }
            }
        };

        let target = match self.kind.to_ascii_lowercase().as_str() {
            "layer" => {
                let layer = self.target_layer_id.ok_or(ContentError::MissingTarget {
                    id: id.clone(),
                    field: "layer",
                })?;
                HotspotTarget::Layer {
                    layer: LayerId(layer),
                    link: self.target_link_id.map(LinkId::new),
                    scene: self.target_scene_id.map(SceneId::new),
                }
            }
            "scene" => HotspotTarget::Scene {
                project: self.target_project_id.map(ProjectId::new),
                scene: self.target_scene_id.map(SceneId::new),
            },
            "link" | "external" => {
                let url = self.target_asset_url.ok_or(ContentError::MissingTarget {
                    id: id.clone(),
                    field: "url",
                })?;
                HotspotTarget::ExternalLink { url }
            }
            "info" | "asset" => HotspotTarget::AssetDisplay {
                asset_ref: self.target_asset_url,
                render_hint: self.render_hint,
            },
            other => {
                return Err(ContentError::UnknownHotspotType {
                    id,
                    kind: other.to_string(),
                })
            }
        };

        Ok(HotspotModel {
            id,
            position: Position {
                x_pct: self.x,
                y_pct: self.y,
            },
            visibility,
            target,
            label: self.title,
        })
    }
}
