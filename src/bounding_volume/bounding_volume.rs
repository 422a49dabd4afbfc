/// Trait of bounding volumes.
///
/// Bounding volumes are coarse approximations of surfaces used for culling and
/// for deciding whether a surface is small enough to be diced. Two bounding
/// volumes must be mergeable into a bigger bounding volume.
pub trait BoundingVolume {
    /// Checks if this bounding volume contains another one.
    fn contains(&self, _: &Self) -> bool;

    /// Merges this bounding volume with another one. The merge is done in-place.
    fn merge(&mut self, _: &Self);

    /// Merges this bounding volume with another one.
    fn merged(&self, _: &Self) -> Self;
}
