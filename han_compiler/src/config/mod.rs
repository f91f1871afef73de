//! Configuration for the han converter
//!
//! Compile-time constants (hard limits, fixed names) are separated from
//! runtime preferences (user experience, env-overridable).

pub mod constants;
pub mod runtime;

pub use runtime::{ConversionPreferences, LexicalPreferences};
