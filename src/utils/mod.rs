//! Shared helpers for paths, tools and terminal output

pub mod paths;
pub mod terminal;
pub mod tools;
