//! Token model for the line pipeline

pub mod token;

pub use token::{NumberFormat, RenderError, Token};
