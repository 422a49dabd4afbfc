use crate::math::{Real, Transform};
use crate::surface::SplitError;
use std::collections::HashMap;

/// Names of the coordinate systems every render context knows about.
pub mod spaces {
    /// The world coordinate system.
    pub const WORLD: &str = "world";
    /// The coordinate system of the surface being split.
    pub const OBJECT: &str = "object";
    /// The camera coordinate system.
    pub const CAMERA: &str = "camera";
    /// The coordinate system surfaces are split in. This is the camera space.
    pub const CURRENT: &str = "current";
}

/// The renderer-wide lookup of named coordinate systems.
///
/// Splitting only ever reads from it, so a single context can be shared by concurrent
/// splits of independent surfaces.
pub trait RenderContext: Sync {
    /// The transform carrying points from the `from` space to the `to` space.
    ///
    /// `object_to_world` is the object transform of the surface asking, used to resolve the
    /// `"object"` space.
    fn space_to_space(
        &self,
        from: &str,
        to: &str,
        object_to_world: &Transform<Real>,
    ) -> Result<Transform<Real>, SplitError>;
}

/// A render context backed by a table of named coordinate systems.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateSystems {
    camera_to_world: Transform<Real>,
    named: HashMap<String, Transform<Real>>,
}

impl Default for CoordinateSystems {
    fn default() -> Self {
        Self::new(Transform::identity())
    }
}

impl CoordinateSystems {
    /// A context whose camera (and current) space is placed in the world by `camera_to_world`.
    pub fn new(camera_to_world: Transform<Real>) -> Self {
        Self {
            camera_to_world,
            named: HashMap::new(),
        }
    }

    /// Registers a user coordinate system, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, space_to_world: Transform<Real>) {
        let _ = self.named.insert(name.into(), space_to_world);
    }

    /// The transform carrying points from the `name` space to the world space.
    pub fn space_to_world(
        &self,
        name: &str,
        object_to_world: &Transform<Real>,
    ) -> Result<Transform<Real>, SplitError> {
        match name {
            spaces::WORLD => Ok(Transform::identity()),
            spaces::OBJECT => Ok(*object_to_world),
            spaces::CAMERA | spaces::CURRENT => Ok(self.camera_to_world),
            _ => self
                .named
                .get(name)
                .copied()
                .ok_or_else(|| SplitError::UnknownSpace(name.to_string())),
        }
    }
}

impl RenderContext for CoordinateSystems {
    fn space_to_space(
        &self,
        from: &str,
        to: &str,
        object_to_world: &Transform<Real>,
    ) -> Result<Transform<Real>, SplitError> {
        if from == to {
            return Ok(Transform::identity());
        }

        let from_to_world = self.space_to_world(from, object_to_world)?;
        let world_to_to = self
            .space_to_world(to, object_to_world)?
            .try_inverse()
            .ok_or_else(|| SplitError::SingularTransform {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        Ok(world_to_to * from_to_world)
    }
}
