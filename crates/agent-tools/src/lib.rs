//! Tool-call framework
//!
//! This crate provides the contract between an agent and the tools it can
//! call: the [`Tool`] trait, the advertised [`ToolDefinition`], and a
//! [`ToolRegistry`] that dispatches calls by name.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, ToolDefinition};
