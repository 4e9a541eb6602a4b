//! Adjustment model: factor set, presets and the resolver.

pub mod params;
pub mod presets;
pub mod resolve;
