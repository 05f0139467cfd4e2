use anyhow::Result;

use tour_content::{ContentIndex, HotspotModel, Layer, LayerId, ProjectId, SceneGraph};

use crate::fetch::{FetchSlot, FetchTracker, RequestToken};
use crate::history::HistoryStack;
use crate::resolver::{self, ResolvedTransition};
use crate::signal::{ChromeNotifier, ChromeReceiver};
use crate::state::{NavigationFrame, NavigationState, NoOpReason, TransitionOutcome};
use crate::visibility;

/// The single owner of the viewer's navigation position. All mutation goes
/// through `activate`/`go_back` (plus the playback clock tick), applied
/// synchronously on the UI dispatch queue; nothing in here suspends.
pub struct NavigationEngine {
    index: ContentIndex,
    state: NavigationState,
    history: HistoryStack,
    fetches: FetchTracker,
    chrome: ChromeNotifier,
}

impl NavigationEngine {
    /// The guided-tour video layer the viewer opens on.
    pub const ENTRY_LAYER: LayerId = LayerId(1);

    pub fn new(index: ContentIndex) -> Self {
        Self::with_entry_layer(index, Self::ENTRY_LAYER)
    }

    pub fn with_entry_layer(index: ContentIndex, layer: LayerId) -> Self {
        let state = NavigationState::entry(layer);
        let mut chrome = ChromeNotifier::default();
        chrome.prime(layer_is_fullscreen(&index, layer));
        NavigationEngine {
            index,
            state,
            history: HistoryStack::new(),
            fetches: FetchTracker::new(),
            chrome,
        }
    }

    pub fn current_state(&self) -> &NavigationState {
        &self.state
    }

    pub fn content(&self) -> &ContentIndex {
        &self.index
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// True while the active layer occupies the whole viewport. Recomputed
    /// from the layer on every call; never tracked separately, so it cannot
    /// drift out of sync with the state.
    pub fn is_immersive_mode(&self) -> bool {
        layer_is_fullscreen(&self.index, self.state.active_layer)
    }

    pub fn subscribe_chrome(&mut self) -> ChromeReceiver {
        self.chrome.subscribe()
    }

    /// Playback clock tick from the video/object player. Not a navigation;
    /// no history frame, no chrome signal.
    pub fn set_clock(&mut self, seconds: f64) {
        self.state.playback_clock = Some(seconds);
    }

    /// The hotspots the renderer should draw right now: the active scene's
    /// list in panorama mode, otherwise the active layer's list, filtered
    /// by the playback clock.
    pub fn visible_hotspots(&self) -> Vec<&HotspotModel> {
        let clock = self.state.playback_clock.unwrap_or(0.0);
        match (&self.state.active_project, &self.state.active_scene) {
            (Some(project), Some(scene)) => self
                .index
                .scene_entry(project, scene)
                .map(|entry| visibility::visible_hotspots(&entry.hotspots, clock))
                .unwrap_or_default(),
            _ => self
                .index
                .layer(self.state.active_layer)
                .map(|layer| visibility::visible_hotspots(&layer.hotspots, clock))
                .unwrap_or_default(),
        }
    }

    /// Sole entry point for forward navigation. External-effect targets are
    /// classified and returned as no-ops; the engine never opens a URL or
    /// renders an asset itself.
    pub fn activate(&mut self, hotspot: &HotspotModel) -> TransitionOutcome {
        match resolver::resolve(&hotspot.target, &self.state, &self.index) {
            ResolvedTransition::Navigate {
                layer,
                link,
                project,
                scene,
            } => {
                self.history
                    .push(NavigationFrame::capture(&self.state, &self.index));
                self.state = NavigationState {
                    active_layer: layer,
                    active_link: link,
                    active_project: project,
                    active_scene: scene,
                    playback_clock: None,
                };
                self.chrome.notify(self.is_immersive_mode());
                log::debug!(
                    "hotspot {} -> layer {} {:?}/{:?}",
                    hotspot.id,
                    self.state.active_layer,
                    self.state.active_project,
                    self.state.active_scene
                );
                TransitionOutcome::Navigated(self.state.clone())
            }
            ResolvedTransition::NoOp(reason) => {
                if reason == NoOpReason::UnresolvableTarget {
                    // Almost certainly a content-authoring error; the click
                    // does nothing rather than crashing the host page.
                    log::warn!(
                        "hotspot {} names a target absent from the loaded content",
                        hotspot.id
                    );
                }
                TransitionOutcome::NoOp(reason)
            }
        }
    }

    /// Reverse the most recent forward jump. An empty stack is the
    /// deliberate terminal case: the state stays put.
    pub fn go_back(&mut self) -> TransitionOutcome {
        match self.history.pop() {
            Some(frame) => {
                self.state = frame.restore();
                self.chrome.notify(self.is_immersive_mode());
                TransitionOutcome::Navigated(self.state.clone())
            }
            None => TransitionOutcome::NoOp(NoOpReason::EmptyHistory),
        }
    }

    /// Register interest in a project's scene graph ahead of navigation.
    pub fn begin_scene_graph_fetch(&mut self, project: ProjectId) -> RequestToken {
        self.fetches.begin(FetchSlot::SceneGraph(project))
    }

    /// Apply a completed scene-graph fetch unless a newer request for the
    /// same project was issued in the meantime. A failed fetch completes
    /// the slot without touching the index.
    pub fn complete_scene_graph_fetch(
        &mut self,
        project: &ProjectId,
        token: RequestToken,
        result: Result<SceneGraph>,
    ) {
        let slot = FetchSlot::SceneGraph(project.clone());
        if !self.fetches.is_current(&slot, token) {
            log::debug!("discarding superseded scene graph fetch for project {project}");
            return;
        }
        match result {
            Ok(graph) => self.index.insert_graph(graph),
            Err(err) => log::warn!(
                "scene graph fetch for project {project} failed: {err:#}; keeping loaded data"
            ),
        }
    }

    pub fn begin_layer_fetch(&mut self, layer: LayerId) -> RequestToken {
        self.fetches.begin(FetchSlot::Layer(layer))
    }

    pub fn complete_layer_fetch(&mut self, id: LayerId, token: RequestToken, result: Result<Layer>) {
        let slot = FetchSlot::Layer(id);
        if !self.fetches.is_current(&slot, token) {
            log::debug!("discarding superseded fetch for layer {id}");
            return;
        }
        match result {
            Ok(layer) => self.index.insert_layer(layer),
            Err(err) => log::warn!("fetch for layer {id} failed: {err:#}; keeping loaded data"),
        }
    }
}

fn layer_is_fullscreen(index: &ContentIndex, layer: LayerId) -> bool {
    index
        .layer(layer)
        .map_or(false, |layer| layer.kind.is_fullscreen())
}
