#![warn(missing_docs)]
//! Hex board viewer core.
//!
//! A translucent background grid that follows the viewport in whole-cell
//! steps, and board tokens driven by game-state change batches. Tokens may
//! be ghost copies of other tokens, resolved through an id registry.

pub mod board;
pub mod camera;
pub mod demo;
pub mod error;
pub mod grid;
pub mod math;
pub mod pieces;

use bevy::prelude::*;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal interaction: camera and demo input active.
    #[default]
    Running,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}
