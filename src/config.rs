//! Configuration loader and schema types.
//!
//! Exposes the settings schema that drives the player and helpers to load it
//! from disk and the environment.

mod load;
mod schema;

pub use load::resolve_config_path;
pub use schema::*;

#[cfg(test)]
mod tests;
