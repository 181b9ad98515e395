//! World-side data: maze, player pose, actors and angle math.
//!
//! Re-exports:
//! - `maze`: grid loading, cell queries, radius probe
//! - `player`: pose and movement integration
//! - `actor`: billboard records
//! - `angle`: angle normalization

pub mod actor;
pub mod angle;
pub mod maze;
pub mod player;
