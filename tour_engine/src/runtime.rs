use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;

use tour_content::ContentIndex;

use crate::cli::ReplayArgs;
use crate::engine::NavigationEngine;
use crate::script::{WalkthroughScript, WalkthroughStep};
use crate::state::{NavigationState, TransitionOutcome};

/// One replayed step with the outcome and the state it left behind.
#[derive(Debug, Serialize)]
pub struct ReplayEvent {
    pub sequence: u32,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TransitionOutcome>,
    pub state: NavigationState,
}

#[derive(Debug, Serialize)]
pub struct ReplayLog {
    pub events: Vec<ReplayEvent>,
}

/// Load a content root, replay the walkthrough script, and persist the
/// requested JSON artefacts.
pub fn execute(args: ReplayArgs) -> Result<()> {
    let ReplayArgs {
        content_root,
        verbose,
        script,
        event_log_json,
        state_json,
        entry_layer,
    } = args;

    let index = ContentIndex::load_from_dir(&content_root)?;
    let script = WalkthroughScript::from_json_file(&script)?;

    let mut engine = NavigationEngine::with_entry_layer(index, entry_layer);
    let log = replay(&mut engine, &script, verbose);

    if let Some(path) = event_log_json.as_ref() {
        let json = serde_json::to_string_pretty(&log)
            .context("serializing replay event log to JSON")?;
        fs::write(path, &json)
            .with_context(|| format!("writing replay event log to {}", path.display()))?;
        println!("Saved replay event log to {}", path.display());
    }

    if let Some(path) = state_json.as_ref() {
        let json = serde_json::to_string_pretty(engine.current_state())
            .context("serializing final navigation state to JSON")?;
        fs::write(path, &json)
            .with_context(|| format!("writing final state to {}", path.display()))?;
        println!("Saved final navigation state to {}", path.display());
    }

    let state = engine.current_state();
    println!(
        "Replayed {} step(s); final position: layer {}{}{}",
        log.events.len(),
        state.active_layer,
        state
            .active_project
            .as_ref()
            .map(|p| format!(", project {p}"))
            .unwrap_or_default(),
        state
            .active_scene
            .as_ref()
            .map(|s| format!(", scene {s}"))
            .unwrap_or_default(),
    );
    println!(
        "History depth: {} | immersive: {}",
        engine.history().len(),
        engine.is_immersive_mode()
    );

    Ok(())
}

/// Drive the engine through the script. Hotspot activations go through the
/// visible set, so a scripted click outside a hotspot's time window is
/// skipped the same way the real viewer could never produce it.
pub fn replay(
    engine: &mut NavigationEngine,
    script: &WalkthroughScript,
    verbose: bool,
) -> ReplayLog {
    let mut events = Vec::with_capacity(script.steps.len());

    for (sequence, step) in script.steps.iter().enumerate() {
        let outcome = match step {
            WalkthroughStep::Tick { clock } => {
                engine.set_clock(*clock);
                None
            }
            WalkthroughStep::Activate { hotspot, clock } => {
                if let Some(clock) = clock {
                    engine.set_clock(*clock);
                }
                let clicked = engine
                    .visible_hotspots()
                    .into_iter()
                    .find(|candidate| &candidate.id == hotspot)
                    .cloned();
                match clicked {
                    Some(model) => Some(engine.activate(&model)),
                    None => {
                        log::warn!("hotspot {hotspot} is not visible at step {sequence}; skipping");
                        None
                    }
                }
            }
            WalkthroughStep::Back => Some(engine.go_back()),
        };

        if verbose {
            println!(
                "  {:>3}. {:<24} -> layer {}",
                sequence,
                WalkthroughScript::describe(step),
                engine.current_state().active_layer
            );
        }

        events.push(ReplayEvent {
            sequence: sequence as u32,
            action: WalkthroughScript::describe(step),
            outcome,
            state: engine.current_state().clone(),
        });
    }

    ReplayLog { events }
}
