//! State module for tracking walk progress
//!
//! - `WalkState`: the stage a catalog walk is in, with the transitions it may take

mod walk_state;

pub use walk_state::WalkState;
