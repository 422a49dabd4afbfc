//! Renderer state consumed while splitting: attributes and coordinate systems.

pub use self::attributes::{Attributes, Orientation, ShadingNeeds};
pub use self::coordinate_systems::{spaces, CoordinateSystems, RenderContext};

mod attributes;
mod coordinate_systems;
