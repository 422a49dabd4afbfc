use crate::math::*;

/// Computes the normal of a planar polygon from its vertices.
///
/// Starting from the first vertex, the first later vertex farther than
/// [`DEFAULT_EPSILON`] from it gives a first edge direction; the next vertex both
/// farther than [`DEFAULT_EPSILON`] and giving a different direction gives the second.
/// The normal is their normalized cross product, following the right-hand rule for
/// counter-clockwise vertices.
///
/// Returns `None` if the polygon is degenerate.
pub fn facet_normal<I>(pts: I) -> Option<UnitVector<Real>>
where
    I: IntoIterator<Item = Point<Real>>,
{
    let mut it = pts.into_iter();
    let origin = it.next()?;
    let mut dirs = it.map(|pt| pt - origin);

    let a = dirs.find(|dir| dir.norm() > DEFAULT_EPSILON)?;
    let b = dirs.find(|dir| dir.norm() > DEFAULT_EPSILON && *dir != a)?;

    UnitVector::try_new(a.cross(&b), 0.0)
}
