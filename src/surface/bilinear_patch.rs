use crate::bounding_volume::Aabb;
use crate::context::RenderContext;
use crate::math::{Point, Real, DEFAULT_EPSILON, DEGENERACY_TOLERANCE};
use crate::primvar::{ClassSizes, PrimVarSet, StorageClass};
use crate::surface::{
    SplitDirection, SplitError, Surface, SurfaceFlags, SurfaceState, SurfaceType, Topology,
    TypedSurface, ValidationError,
};

/// Corner pairs averaged into the children of a split along `u`.
const U_HALVES: [[(usize, usize); 4]; 2] = [
    [(0, 0), (0, 1), (2, 2), (2, 3)],
    [(0, 1), (1, 1), (2, 3), (3, 3)],
];

/// Corner pairs averaged into the children of a split along `v`.
const V_HALVES: [[(usize, usize); 4]; 2] = [
    [(0, 0), (1, 1), (0, 2), (1, 3)],
    [(0, 2), (1, 3), (2, 2), (3, 3)],
];

/// Tolerance of the phantom clip side test, relative to the clip triangle's size.
const CLIP_TOLERANCE: Real = 1.0e-5;

/// The edge beyond which the samples of a quad with a phantom fourth corner are discarded.
///
/// The edge joins the two triangle vertices adjacent to the phantom corner. Samples on the
/// side of `kept` are part of the original triangle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhantomClip {
    /// The clip edge endpoints.
    pub edge: [Point<Real>; 2],
    /// A point of the triangle strictly on the kept side of the edge.
    pub kept: Point<Real>,
}

impl PhantomClip {
    /// Creates a new phantom clip.
    pub fn new(edge: [Point<Real>; 2], kept: Point<Real>) -> Self {
        Self { edge, kept }
    }

    /// The signed position of `pt` relative to the clip edge.
    ///
    /// This is `1` at `kept`, `0` on the line through the edge, and negative on the
    /// discarded side. Returns `None` if the clip triangle is degenerate.
    pub fn side(&self, pt: &Point<Real>) -> Option<Real> {
        let [p, q] = self.edge;
        let dir = q - p;
        let n = dir.cross(&(self.kept - p));
        let n2 = n.norm_squared();

        if n2 <= DEFAULT_EPSILON * DEFAULT_EPSILON {
            return None;
        }

        Some(dir.cross(&(pt - p)).dot(&n) / n2)
    }

    /// Is `pt` strictly on the kept side of the edge?
    ///
    /// Every point is kept if the clip triangle is degenerate.
    pub fn keeps(&self, pt: &Point<Real>) -> bool {
        self.side(pt).map(|s| s > CLIP_TOLERANCE).unwrap_or(true)
    }
}

/// A bilinear patch, defined by four corners in row-major order.
///
/// Corners `0` and `1` span the first row, `2` and `3` the second one. Every per-vertex
/// primitive variable holds exactly four values, one per corner.
#[derive(Clone, Debug)]
pub struct BilinearPatch {
    state: SurfaceState,
    primvars: PrimVarSet,
    clip: Option<PhantomClip>,
}

impl BilinearPatch {
    /// Creates a new bilinear patch from its primitive variables.
    pub fn new(state: SurfaceState, primvars: PrimVarSet) -> Result<Self, ValidationError> {
        primvars.validate(&ClassSizes::bilinear_patch())?;
        Ok(Self::from_parts(state, primvars, None))
    }

    /// Creates a new bilinear patch from already validated primitive variables.
    pub(crate) fn from_parts(
        mut state: SurfaceState,
        primvars: PrimVarSet,
        clip: Option<PhantomClip>,
    ) -> Self {
        state
            .flags
            .set(SurfaceFlags::PHANTOM_FOURTH_VERTEX, clip.is_some());
        Self {
            state,
            primvars,
            clip,
        }
    }

    /// The primitive variables of this patch.
    #[inline]
    pub fn primvars(&self) -> &PrimVarSet {
        &self.primvars
    }

    /// The four corners of this patch, in row-major order.
    pub fn corners(&self) -> [Point<Real>; 4] {
        match self.primvars.positions() {
            Some(&[p0, p1, p2, p3]) => [p0, p1, p2, p3],
            _ => [Point::origin(); 4],
        }
    }

    /// The clip edge of this patch, if its fourth corner is a phantom.
    #[inline]
    pub fn phantom_clip(&self) -> Option<&PhantomClip> {
        self.clip.as_ref()
    }

    fn half(
        &self,
        pairs: &[(usize, usize); 4],
    ) -> Result<BilinearPatch, SplitError> {
        let primvars = self
            .primvars
            .iter()
            .map(|var| match var.class() {
                StorageClass::Constant | StorageClass::Uniform => Ok(var.clone()),
                StorageClass::Varying | StorageClass::Vertex => var.lerp_pairs(pairs, 0.5),
            })
            .collect::<Result<PrimVarSet, SplitError>>()?;

        Ok(Self::from_parts(self.state.child(), primvars, self.clip))
    }
}

impl Surface for BilinearPatch {
    fn surface_type(&self) -> SurfaceType {
        SurfaceType::BilinearPatch
    }

    fn as_typed_surface(&self) -> TypedSurface<'_> {
        TypedSurface::BilinearPatch(self)
    }

    fn state(&self) -> &SurfaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    fn bound(&self) -> Aabb {
        Aabb::from_points(self.corners())
    }

    fn topology(&self) -> Topology {
        Topology {
            surface_type: SurfaceType::BilinearPatch,
            num_vertices: 4,
            primvars: self.primvars.signature(),
        }
    }

    /// Halves the longest parametric direction, measured along the two edges spanning it.
    fn split_direction(&self) -> Option<SplitDirection> {
        let [p0, p1, p2, p3] = self.corners();
        let u_length = (p1 - p0).norm() + (p3 - p2).norm();
        let v_length = (p2 - p0).norm() + (p3 - p1).norm();

        if u_length >= v_length {
            Some(SplitDirection::U)
        } else {
            Some(SplitDirection::V)
        }
    }

    fn split_along(
        &self,
        _: &dyn RenderContext,
        direction: Option<SplitDirection>,
    ) -> Result<Vec<Box<dyn Surface>>, SplitError> {
        let halves = match direction.or_else(|| self.split_direction()) {
            Some(SplitDirection::V) => &V_HALVES,
            _ => &U_HALVES,
        };

        let mut children: Vec<Box<dyn Surface>> = Vec::with_capacity(2);
        for pairs in halves {
            children.push(Box::new(self.half(pairs)?));
        }

        log::trace!(
            "Split bilinear patch along {:?} ({} variables).",
            direction,
            self.primvars.len()
        );
        Ok(children)
    }

    fn is_degenerate(&self) -> bool {
        let [p0, p1, p2, p3] = self.corners();
        [p1, p2, p3]
            .iter()
            .all(|p| (p - p0).norm() <= DEGENERACY_TOLERANCE)
    }

    fn is_fully_clipped(&self) -> bool {
        match &self.clip {
            Some(clip) => !self.corners().iter().any(|p| clip.keeps(p)),
            None => false,
        }
    }
}
