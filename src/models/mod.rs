//! Models module for score components
//!
//! This module contains the value types (durations, pitches, marks) and the
//! arena node types that make up a score tree.

pub mod core;
pub mod duration;
pub mod elements;
pub mod pitch;

// Re-export commonly used types
pub use self::core::*;
pub use duration::{Duration, Rational};
pub use elements::*;
pub use pitch::{Pitch, PitchLanguage};
