//! CLI command implementations.

pub mod backends;
pub mod common;
pub mod endurance;
pub mod experiment;
pub mod path;
pub mod projection;
pub mod relay;
pub mod skeleton;
pub mod version;
