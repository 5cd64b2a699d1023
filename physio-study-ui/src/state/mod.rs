//! State Management
//!
//! Global toast state.

pub mod global;

pub use global::{provide_global_state, GlobalState};
