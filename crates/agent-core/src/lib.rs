//! Core types shared by the tool crates
//!
//! Every tool reports failures through [`Error`], whatever crate it lives in.

pub mod error;

pub use error::{Error, Result};
