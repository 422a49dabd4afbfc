use crate::bounding_volume::Aabb;
use crate::context::{spaces, Orientation, RenderContext, ShadingNeeds};
use crate::math::{Point, Real, Vector, DEGENERACY_TOLERANCE};
use crate::primvar::{
    names, synthesize_phantom_corner, PrimVarSet, PrimVarValues, PrimitiveVariable,
    StorageClass,
};
use crate::surface::{
    BilinearPatch, PhantomClip, SplitError, Surface, SurfaceFlags, Topology, ValidationError,
};
use crate::utils;
use arrayvec::ArrayVec;

/// Texture inputs synthesized from object-space positions: name, flag, coordinate axis.
const TEXTURE_INPUTS: [(&str, ShadingNeeds, usize); 4] = [
    (names::S, ShadingNeeds::S, 0),
    (names::T, ShadingNeeds::T, 1),
    (names::U, ShadingNeeds::U, 0),
    (names::V, ShadingNeeds::V, 1),
];

/// The split algorithm shared by every polygonal surface.
///
/// A polygon is split into bilinear patches fanning out from its first vertex. Each patch
/// covers two consecutive polygon edges; when a single vertex remains, the patch is a
/// triangle whose fourth corner is extrapolated (a *phantom* corner) so the result is a
/// parallelogram, flagged [`SurfaceFlags::PHANTOM_FOURTH_VERTEX`].
pub trait PolygonBase: Surface {
    /// The number of vertices of this polygon.
    fn num_vertices(&self) -> usize;

    /// The index, into the per-vertex primitive variables, of the `i`-th polygon vertex.
    fn vertex_index(&self, i: usize) -> usize;

    /// The index of this polygon's face, used to read `uniform` variables.
    fn face_index(&self) -> usize;

    /// The primitive variables this polygon reads its data from.
    fn primvars(&self) -> &PrimVarSet;

    /// The position of the `i`-th polygon vertex in the current space.
    #[inline]
    fn vertex(&self, i: usize) -> Point<Real> {
        let positions = self.primvars().positions().unwrap_or_default();
        positions[self.vertex_index(i)]
    }

    /// The vertices of this polygon, in order.
    fn vertices(&self) -> Vec<Point<Real>> {
        (0..self.num_vertices()).map(|i| self.vertex(i)).collect()
    }

    /// The tight axis-aligned bound of this polygon's vertices.
    fn polygon_bound(&self) -> Aabb {
        Aabb::from_points((0..self.num_vertices()).map(|i| self.vertex(i)))
    }

    /// The topology of this polygon.
    fn polygon_topology(&self) -> Topology {
        Topology {
            surface_type: self.surface_type(),
            num_vertices: self.num_vertices(),
            primvars: self.primvars().signature(),
        }
    }

    /// Are all the consecutive vertices of this polygon within [`DEGENERACY_TOLERANCE`]
    /// of each other?
    fn is_fully_degenerate(&self) -> bool {
        (1..self.num_vertices())
            .all(|i| (self.vertex(i) - self.vertex(i - 1)).norm() <= DEGENERACY_TOLERANCE)
    }

    /// The facet normal of this polygon, accounting for its orientation.
    ///
    /// Returns the zero vector if the polygon is degenerate.
    fn facet_normal(&self) -> Vector<Real> {
        let orientation = self.state().attributes.orientation;
        oriented_facet_normal(&self.vertices(), orientation)
    }

    /// Splits this polygon into `⌈(n - 2) / 2⌉` bilinear patches.
    ///
    /// Patch corners are taken in the order `(A, B, D, C)`, the row-major corner order of
    /// a bilinear patch, where `A` is the first polygon vertex, `B` the trailing vertex of
    /// the previous patch, and `C`, `D` the next two polygon vertices.
    fn split_into_patches(&self, ctx: &dyn RenderContext) -> Result<Vec<BilinearPatch>, SplitError> {
        let n = self.num_vertices();
        debug_assert!(n >= 3, "a polygon needs at least 3 vertices");

        let state = self.state();
        let needs = state.attributes.shading_needs;
        let primvars = self.primvars();

        let normal = if !primvars.contains(names::N) && needs.contains(ShadingNeeds::N) {
            Some(self.facet_normal())
        } else {
            None
        };

        let texture_inputs: ArrayVec<_, 4> = TEXTURE_INPUTS
            .iter()
            .filter(|(name, need, _)| needs.contains(*need) && !primvars.contains(name))
            .collect();
        let current_to_object = if texture_inputs.is_empty() {
            None
        } else {
            Some(ctx.space_to_space(spaces::CURRENT, spaces::OBJECT, &state.object_to_world)?)
        };

        let ia = 0;
        let mut ib = 1;
        let mut patches = Vec::with_capacity((n - 1) / 2);

        for ic in (2..n).step_by(2) {
            let id = if ic + 1 < n { ic + 1 } else { ic };
            let phantom = ic == id;
            let corners = [ia, ib, id, ic].map(|i| self.vertex_index(i));

            let mut vars = primvars
                .iter()
                .map(|var| -> Result<PrimitiveVariable, SplitError> {
                    match var.class() {
                        StorageClass::Constant => Ok(var.gather(&[0])),
                        StorageClass::Uniform => Ok(var.gather(&[self.face_index()])),
                        StorageClass::Varying | StorageClass::Vertex => {
                            let mut corner_var = var.gather(&corners);
                            if phantom {
                                synthesize_phantom_corner(&mut corner_var)?;
                            }
                            Ok(corner_var)
                        }
                    }
                })
                .collect::<Result<PrimVarSet, SplitError>>()?;

            if let Some(normal) = normal {
                vars.insert(PrimitiveVariable::new(
                    names::N,
                    StorageClass::Varying,
                    PrimVarValues::Normal(vec![normal; 4]),
                ))?;
            }

            let positions: [Point<Real>; 4] = match vars.positions() {
                Some(&[p0, p1, p2, p3]) => [p0, p1, p2, p3],
                _ => return Err(ValidationError::MissingPosition.into()),
            };

            if let Some(current_to_object) = &current_to_object {
                let object_positions = positions.map(|p| current_to_object.transform_point(&p));

                for (name, _, axis) in &texture_inputs {
                    let values = object_positions.iter().map(|p| p[*axis]).collect();
                    vars.insert(PrimitiveVariable::new(
                        *name,
                        StorageClass::Varying,
                        PrimVarValues::Float(values),
                    ))?;
                }
            }

            let mut child_state = state.child();
            let clip = if phantom {
                child_state.flags.insert(SurfaceFlags::PHANTOM_FOURTH_VERTEX);
                Some(PhantomClip::new([positions[1], positions[2]], positions[0]))
            } else {
                None
            };

            patches.push(BilinearPatch::from_parts(child_state, vars, clip));
            ib = id;
        }

        Ok(patches)
    }
}

/// The facet normal of a polygon, negated for left-handed orientations.
///
/// Returns the zero vector if the polygon is degenerate.
fn oriented_facet_normal(vertices: &[Point<Real>], orientation: Orientation) -> Vector<Real> {
    match utils::facet_normal(vertices.iter().copied()) {
        Some(n) => match orientation {
            Orientation::RightHanded => n.into_inner(),
            Orientation::LeftHanded => -n.into_inner(),
        },
        None => {
            log::debug!("Degenerate polygon: no facet normal could be derived, using zero.");
            Vector::zeros()
        }
    }
}
