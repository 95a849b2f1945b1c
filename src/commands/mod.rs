//! Command implementations for rootvsix CLI

pub mod completions;
pub mod install;
pub mod uninstall;
pub mod version;
pub mod versions;
