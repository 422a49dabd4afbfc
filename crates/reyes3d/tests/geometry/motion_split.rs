use reyes3d::bounding_volume::{Aabb, BoundingVolume};
use reyes3d::context::{Attributes, CoordinateSystems, RenderContext};
use reyes3d::math::{Real, Transform};
use reyes3d::motion::{KeyframedTransform, MotionSurface};
use reyes3d::na::{Point3, Vector3};
use reyes3d::primvar::{PrimVarSet, PrimVarValues, PrimitiveVariable, StorageClass};
use reyes3d::surface::{
    BilinearPatch, MotionMismatch, Polygon, SharedSurface, SplitDirection, SplitError, Surface,
    SurfaceState, SurfaceType, Topology, TypedSurface,
};
use std::sync::Arc;

fn quad(z: Real, width: Real) -> SharedSurface {
    let pts = vec![
        Point3::new(0.0, 0.0, z),
        Point3::new(width, 0.0, z),
        Point3::new(width, 1.0, z),
        Point3::new(0.0, 1.0, z),
    ];
    let p = PrimitiveVariable::new("P", StorageClass::Vertex, PrimVarValues::Point(pts));
    let state = SurfaceState::new(Arc::new(Attributes::default()));
    SharedSurface::new(Polygon::new(state, PrimVarSet::from_vars([p]).unwrap()).unwrap())
}

fn state() -> SurfaceState {
    SurfaceState::new(Arc::new(Attributes::default()))
}

#[test]
fn congruent_quads_split_in_lock_step() {
    let ctx = CoordinateSystems::default();
    let motion = MotionSurface::new(state(), [(0.0, quad(0.0, 1.0)), (1.0, quad(2.0, 1.0))]).unwrap();
    assert!(motion.bound().contains(&motion.slots()[0].1.bound()));
    assert!(motion.bound().contains(&motion.slots()[1].1.bound()));

    let children = motion.split(&ctx).unwrap();
    assert_eq!(children.len(), 1);

    let patch_motion = children[0].as_motion().unwrap();
    assert_eq!(patch_motion.slots().len(), 2);
    let corners: Vec<_> = patch_motion
        .slots()
        .iter()
        .map(|(_, s)| s.as_bilinear_patch().unwrap().corners())
        .collect();
    for (p0, p1) in corners[0].iter().zip(corners[1].iter()) {
        assert_eq!(p0.xy(), p1.xy());
        assert_eq!(p1.z - p0.z, 2.0);
    }

    // The patches split again, both along the direction of the first sample.
    let halves = patch_motion.split(&ctx).unwrap();
    assert_eq!(halves.len(), 2);
    for half in &halves {
        let half = half.as_motion().unwrap();
        assert_eq!(half.times().collect::<Vec<_>>(), [0.0, 1.0]);
        assert!(half.slots()[1].1.as_surface::<BilinearPatch>().is_some());
    }
}

#[test]
fn lock_step_split_follows_the_first_sample() {
    let ctx = CoordinateSystems::default();
    // Same topology, but the second sample is so wide it would split along `u` on its own
    // while the first one splits along `v`.
    let motion = MotionSurface::new(state(), [(0.0, quad(0.0, 0.1)), (1.0, quad(0.0, 10.0))]).unwrap();
    let patch = motion.split(&ctx).unwrap().remove(0);
    assert_eq!(patch.split_direction(), Some(SplitDirection::V));

    let halves = patch.split(&ctx).unwrap();
    let narrow = halves[0].as_motion().unwrap().slots()[0].1.bound();
    let wide = halves[0].as_motion().unwrap().slots()[1].1.bound();
    assert_eq!(narrow.maxs.y, 0.5);
    assert_eq!(wide.maxs.y, 0.5);
}

/// A surface splitting into a fixed number of copies of itself.
#[derive(Debug)]
struct Fan {
    state: SurfaceState,
    children: usize,
}

impl Surface for Fan {
    fn surface_type(&self) -> SurfaceType {
        SurfaceType::Custom
    }

    fn as_typed_surface(&self) -> TypedSurface<'_> {
        TypedSurface::Custom(self)
    }

    fn state(&self) -> &SurfaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    fn bound(&self) -> Aabb {
        Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    fn topology(&self) -> Topology {
        Topology {
            surface_type: SurfaceType::Custom,
            num_vertices: 4,
            primvars: Vec::new(),
        }
    }

    fn split_along(
        &self,
        _: &dyn RenderContext,
        _: Option<SplitDirection>,
    ) -> Result<Vec<Box<dyn Surface>>, SplitError> {
        Ok((0..self.children)
            .map(|_| {
                Box::new(Fan {
                    state: self.state.child(),
                    children: self.children,
                }) as Box<dyn Surface>
            })
            .collect())
    }
}

#[test]
fn samples_splitting_differently_are_a_mismatch() {
    let ctx = CoordinateSystems::default();
    let fan = |children| {
        SharedSurface::new(Fan {
            state: state(),
            children,
        })
    };

    let motion = MotionSurface::new(state(), [(0.0, fan(2)), (0.5, fan(2)), (1.0, fan(3))]).unwrap();
    let err = motion.split(&ctx).unwrap_err();

    assert_eq!(
        err,
        SplitError::MotionMismatch(MotionMismatch::ChildCount {
            time: 1.0,
            expected: 2,
            found: 3,
        })
    );
    assert!(err.to_string().starts_with("motion blur mismatch"));
}

#[test]
fn keyframed_sweep_pads_the_bound() {
    let sweep = KeyframedTransform::new([
        (0.0, Transform::identity()),
        (1.0, Transform::new_translation(&Vector3::new(0.0, 0.0, 4.0))),
    ])
    .unwrap();

    let motion = MotionSurface::new(state(), [(0.0, quad(0.0, 1.0)), (1.0, quad(0.0, 1.0))])
        .unwrap()
        .with_sweep(Arc::new(sweep));

    assert_eq!(
        motion.bound(),
        Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 4.0))
    );

    // Children share the padding of their parent.
    let ctx = CoordinateSystems::default();
    let children = motion.split(&ctx).unwrap();
    assert_eq!(children[0].bound().maxs.z, 4.0);
}
