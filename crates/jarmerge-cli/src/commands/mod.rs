//! Command implementations.

pub mod merge;
