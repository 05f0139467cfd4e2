use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use tour_content::LayerId;

#[derive(Parser, Debug)]
#[command(
    about = "Host that inspects tour content and replays scripted navigation sessions",
    version
)]
pub struct Args {
    /// Path to the content-store snapshot directory
    #[arg(long, default_value = "content")]
    pub content_root: PathBuf,

    /// Print every hotspot instead of the compact per-layer counts
    #[arg(long)]
    pub verbose: bool,

    /// Replay a walkthrough script instead of inspecting the content
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Path to write the replay event log as JSON (requires --script)
    #[arg(long)]
    pub event_log_json: Option<PathBuf>,

    /// Path to write the final navigation state as JSON (requires --script)
    #[arg(long)]
    pub state_json: Option<PathBuf>,

    /// Layer the engine starts on (default: the entry tour layer)
    #[arg(long, default_value_t = 1)]
    pub entry_layer: u32,
}

#[derive(Debug)]
pub enum Command {
    Inspect(InspectArgs),
    Replay(ReplayArgs),
}

#[derive(Debug)]
pub struct InspectArgs {
    pub content_root: PathBuf,
    pub verbose: bool,
    pub entry_layer: LayerId,
}

#[derive(Debug)]
pub struct ReplayArgs {
    pub content_root: PathBuf,
    pub verbose: bool,
    pub script: PathBuf,
    pub event_log_json: Option<PathBuf>,
    pub state_json: Option<PathBuf>,
    pub entry_layer: LayerId,
}

pub fn parse() -> Result<Command> {
    let args = Args::parse();
    args.into_command()
}

impl Args {
    fn into_command(self) -> Result<Command> {
        if self.script.is_none() {
            if self.event_log_json.is_some() {
                bail!("--event-log-json requires --script");
            }
            if self.state_json.is_some() {
                bail!("--state-json requires --script");
            }
        }

        let entry_layer = LayerId(self.entry_layer);
        match self.script {
            Some(script) => Ok(Command::Replay(ReplayArgs {
                content_root: self.content_root,
                verbose: self.verbose,
                script,
                event_log_json: self.event_log_json,
                state_json: self.state_json,
                entry_layer,
            })),
            None => Ok(Command::Inspect(InspectArgs {
                content_root: self.content_root,
                verbose: self.verbose,
                entry_layer,
            })),
        }
    }
}
