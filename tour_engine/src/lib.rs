//! Navigation engine for the interactive tour viewer.
//!
//! The viewer can be showing a 360-degree video, a frame-sequence object
//! view, a panorama scene, or an embedded document; hotspots move it
//! between those modes. This crate owns the navigation state machine: the
//! visibility filter, the target resolver, the back-navigation history,
//! the stale-fetch token discipline, and the immersive-mode signal the
//! host page uses to hide its chrome. Rendering and media playback live
//! elsewhere; the engine only decides which hotspots are visible and
//! where activating one goes.

pub mod cli;
pub mod engine;
pub mod fetch;
pub mod history;
pub mod resolver;
pub mod runtime;
pub mod script;
pub mod signal;
pub mod state;
pub mod visibility;
