use crate::bounding_volume::Aabb;
use crate::context::RenderContext;
use crate::primvar::{names, ClassSizes, PrimVarSet};
use crate::surface::{
    PolygonBase, SplitDirection, SplitError, Surface, SurfaceState, SurfaceType, Topology,
    TypedSurface, ValidationError,
};
use alloc::sync::Arc;

/// The vertex pool shared by all the faces of a polygon mesh.
///
/// Per-vertex variables hold one value per pool point, `uniform` variables one value per
/// face, and `constant` variables a single value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonPoints {
    primvars: PrimVarSet,
    num_faces: usize,
}

impl PolygonPoints {
    /// Creates a new vertex pool for a mesh of `num_faces` faces.
    pub fn new(primvars: PrimVarSet, num_faces: usize) -> Result<Self, ValidationError> {
        let num_points = primvars
            .get(names::P)
            .ok_or(ValidationError::MissingPosition)?
            .len();
        primvars.validate(&ClassSizes::mesh(num_points, num_faces))?;

        Ok(Self {
            primvars,
            num_faces,
        })
    }

    /// The primitive variables of this pool.
    #[inline]
    pub fn primvars(&self) -> &PrimVarSet {
        &self.primvars
    }

    /// The number of points in this pool.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.primvars.get(names::P).map(|p| p.len()).unwrap_or(0)
    }

    /// The number of faces sharing this pool.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// Builds one [`PointsPolygon`] per face, `faces[i]` listing the point indices of face `i`.
    pub fn faces(
        self: &Arc<Self>,
        state: &SurfaceState,
        faces: &[Vec<usize>],
    ) -> Result<Vec<PointsPolygon>, ValidationError> {
        faces
            .iter()
            .enumerate()
            .map(|(face_index, indices)| {
                PointsPolygon::new(state.clone(), self.clone(), indices.clone(), face_index)
            })
            .collect()
    }
}

/// One face of a polygon mesh, reading its data through indices into a shared vertex pool.
#[derive(Clone, Debug)]
pub struct PointsPolygon {
    state: SurfaceState,
    points: Arc<PolygonPoints>,
    indices: Vec<usize>,
    face_index: usize,
}

impl PointsPolygon {
    /// Creates the face `face_index` of the mesh whose vertex pool is `points`.
    pub fn new(
        state: SurfaceState,
        points: Arc<PolygonPoints>,
        indices: Vec<usize>,
        face_index: usize,
    ) -> Result<Self, ValidationError> {
        if indices.len() < 3 {
            return Err(ValidationError::TooFewVertices(indices.len()));
        }

        let len = points.num_points();
        if let Some(&index) = indices.iter().find(|i| **i >= len) {
            return Err(ValidationError::IndexOutOfBounds { index, len });
        }

        if face_index >= points.num_faces() {
            return Err(ValidationError::FaceOutOfBounds {
                index: face_index,
                len: points.num_faces(),
            });
        }

        Ok(Self {
            state,
            points,
            indices,
            face_index,
        })
    }

    /// The shared vertex pool of this face.
    #[inline]
    pub fn points(&self) -> &Arc<PolygonPoints> {
        &self.points
    }

    /// The point indices of this face.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl PolygonBase for PointsPolygon {
    #[inline]
    fn num_vertices(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    fn vertex_index(&self, i: usize) -> usize {
        self.indices[i]
    }

    #[inline]
    fn face_index(&self) -> usize {
        self.face_index
    }

    #[inline]
    fn primvars(&self) -> &PrimVarSet {
        &self.points.primvars
    }
}

impl Surface for PointsPolygon {
    fn surface_type(&self) -> SurfaceType {
        SurfaceType::PointsPolygon
    }

    fn as_typed_surface(&self) -> TypedSurface<'_> {
        TypedSurface::PointsPolygon(self)
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
        Ok(self
            .split_into_patches(ctx)?
            .into_iter()
            .map(|patch| Box::new(patch) as Box<dyn Surface>)
            .collect())
    }

    fn is_degenerate(&self) -> bool {
        self.is_fully_degenerate()
    }
}
