use crate::bounding_volume::Aabb;
use crate::context::RenderContext;
use crate::primvar::{names, ClassSizes, PrimVarSet};
use crate::surface::{
    PolygonBase, SplitDirection, SplitError, Surface, SurfaceState, SurfaceType, Topology,
    TypedSurface, ValidationError,
};

/// A planar polygon owning its primitive variables.
///
/// The polygon is described by its `P` variable, one point per vertex, and must be
/// convex for its split to cover it exactly.
#[derive(Clone, Debug)]
pub struct Polygon {
    state: SurfaceState,
    primvars: PrimVarSet,
}

impl Polygon {
    /// Builds a new polygon from its primitive variables.
    ///
    /// The number of vertices is the number of values of `P`. Fails if there are less than
    /// three vertices or if any variable is sized inconsistently with its storage class.
    pub fn new(state: SurfaceState, primvars: PrimVarSet) -> Result<Self, ValidationError> {
        let num_vertices = primvars
            .get(names::P)
            .ok_or(ValidationError::MissingPosition)?
            .len();

        if num_vertices < 3 {
            return Err(ValidationError::TooFewVertices(num_vertices));
        }

        primvars.validate(&ClassSizes::polygon(num_vertices))?;
        Ok(Self { state, primvars })
    }
}

impl PolygonBase for Polygon {
    #[inline]
    fn num_vertices(&self) -> usize {
        self.primvars.get(names::P).map(|p| p.len()).unwrap_or(0)
    }

    #[inline]
    fn vertex_index(&self, i: usize) -> usize {
        i
    }

    #[inline]
    fn face_index(&self) -> usize {
        0
    }

    #[inline]
    fn primvars(&self) -> &PrimVarSet {
        &self.primvars
    }
}

impl Surface for Polygon {
    fn surface_type(&self) -> SurfaceType {
        SurfaceType::Polygon
    }

    fn as_typed_surface(&self) -> TypedSurface<'_> {
        TypedSurface::Polygon(self)
    }

    fn state(&self) -> &SurfaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    fn bound(&self) -> Aabb {
        self.polygon_bound()
    }

    fn topology(&self) -> Topology {
        self.polygon_topology()
    }

    fn split_along(
        &self,
        ctx: &dyn RenderContext,
        _: Option<SplitDirection>,
    ) -> Result<Vec<Box<dyn Surface>>, SplitError> {
        let patches = self.split_into_patches(ctx)?;
        Ok(patches
            .into_iter()
            .map(|patch| Box::new(patch) as Box<dyn Surface>)
            .collect())
    }

    fn is_degenerate(&self) -> bool {
        self.is_fully_degenerate()
    }
}
