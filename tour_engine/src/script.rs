use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use tour_content::HotspotId;

/// A scripted walkthrough the CLI host replays against the engine, in
/// place of live clicks from the rendering layer.
#[derive(Debug, Clone, Deserialize)]
pub struct WalkthroughScript {
    pub steps: Vec<WalkthroughStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WalkthroughStep {
    /// Click the named hotspot, optionally positioning the playback clock
    /// first. The hotspot must be visible at that clock, exactly as a real
    /// click requires.
    Activate {
        hotspot: HotspotId,
        #[serde(default)]
        clock: Option<f64>,
    },
    /// Press the back control.
    Back,
    /// Advance the playback clock without clicking anything.
    Tick { clock: f64 },
}

impl WalkthroughScript {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading walkthrough script from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing walkthrough script from {}", path.display()))
    }

    pub fn describe(step: &WalkthroughStep) -> String {
        match step {
            WalkthroughStep::Activate { hotspot, clock } => match clock {
                Some(clock) => format!("activate {hotspot} @ {clock}s"),
                None => format!("activate {hotspot}"),
            },
            WalkthroughStep::Back => "back".to_string(),
            WalkthroughStep::Tick { clock } => format!("tick {clock}s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_step_kinds() {
        let raw = r#"{
            "steps": [
                { "action": "activate", "hotspot": "h1", "clock": 15.0 },
                { "action": "tick", "clock": 20.0 },
                { "action": "back" }
            ]
        }"#;
        let script: WalkthroughScript = serde_json::from_str(raw).expect("parse");
        assert_eq!(script.steps.len(), 3);
        assert_eq!(
            WalkthroughScript::describe(&script.steps[0]),
            "activate h1 @ 15s"
        );
        assert_eq!(WalkthroughScript::describe(&script.steps[2]), "back");
    }
}
