use reyes3d::context::{Attributes, CoordinateSystems, Orientation, ShadingNeeds};
use reyes3d::motion::MotionSurface;
use reyes3d::na::{Point3, Vector3};
use reyes3d::pipeline::{ExtentDiceTest, SplitParameters, SplitPipeline};
use reyes3d::primvar::{PrimVarSet, PrimVarValues, PrimitiveVariable, StorageClass};
use reyes3d::surface::{
    PointsPolygon, PolygonPoints, SharedSurface, Surface, SurfaceFlags, SurfaceState,
};
use std::sync::Arc;

fn state(needs: ShadingNeeds) -> SurfaceState {
    SurfaceState::new(Arc::new(Attributes::new(Orientation::RightHanded, needs)))
}

/// Two faces of a mesh: a unit square and a triangle.
fn mesh(needs: ShadingNeeds) -> Vec<PointsPolygon> {
    let pts = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ];
    let vars = PrimVarSet::from_vars([PrimitiveVariable::new(
        "P",
        StorageClass::Vertex,
        PrimVarValues::Point(pts),
    )])
    .unwrap();
    let points = Arc::new(PolygonPoints::new(vars, 2).unwrap());
    points
        .faces(&state(needs), &[vec![0, 1, 2, 3], vec![1, 4, 2]])
        .unwrap()
}

#[test]
fn mesh_faces_are_split_to_diceable_patches() {
    let ctx = CoordinateSystems::default();
    let pipeline = SplitPipeline::new(SplitParameters::default(), ExtentDiceTest::new(0.5), &ctx);
    let roots = mesh(ShadingNeeds::N)
        .into_iter()
        .map(|face| Box::new(face) as Box<dyn Surface>);

    let (emitted, stats) = pipeline.run_all(roots).unwrap();

    assert!(!emitted.is_empty());
    assert_eq!(stats.emitted(), emitted.len());
    assert_eq!(stats.eye_split_limited, 0);
    for surface in &emitted {
        let patch = surface.as_bilinear_patch().unwrap();
        assert!(patch.flags().contains(SurfaceFlags::DICEABLE));
        assert!(patch.bound().max_extent() <= 0.5);
        let normals = patch.primvars().get("N").unwrap().values().as_normals().unwrap();
        assert_eq!(normals, &[Vector3::z(); 4]);
    }
}

#[test]
fn phantom_quarters_are_culled() {
    let ctx = CoordinateSystems::default();
    let triangle = mesh(ShadingNeeds::empty()).remove(1);
    let run = |params: SplitParameters| {
        SplitPipeline::new(params, ExtentDiceTest::new(0.5), &ctx)
            .run(Box::new(triangle.clone()))
            .unwrap()
    };

    let (culled, culled_stats) = run(SplitParameters::default());
    let (kept, kept_stats) = run(SplitParameters {
        cull_phantom_clipped: false,
        ..SplitParameters::default()
    });

    assert!(culled_stats.clipped > 0);
    assert_eq!(kept_stats.clipped, 0);
    assert_eq!(culled.len() + culled_stats.clipped, kept.len());
    for surface in &culled {
        assert!(!surface.is_fully_clipped());
    }
}

#[test]
fn motion_surfaces_are_split_to_diceable_motion_children() {
    let ctx = CoordinateSystems::default();
    let pipeline = SplitPipeline::new(SplitParameters::default(), ExtentDiceTest::new(0.6), &ctx);

    let faces = mesh(ShadingNeeds::empty());
    let slots = [
        (0.0, SharedSurface::new(faces[0].clone())),
        (1.0, SharedSurface::new(faces[0].clone())),
    ];
    let motion = MotionSurface::new(state(ShadingNeeds::empty()), slots).unwrap();

    let (emitted, _) = pipeline.run(Box::new(motion)).unwrap();
    assert_eq!(emitted.len(), 4);
    for surface in &emitted {
        let motion = surface.as_motion().unwrap();
        assert!(motion.flags().contains(SurfaceFlags::DICEABLE));
        assert_eq!(motion.slots().len(), 2);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_run_matches_sequential_run() {
    let ctx = CoordinateSystems::default();
    let pipeline = SplitPipeline::new(SplitParameters::default(), ExtentDiceTest::new(0.25), &ctx);
    let roots = || {
        mesh(ShadingNeeds::empty())
            .into_iter()
            .map(|face| Box::new(face) as Box<dyn Surface>)
            .collect::<Vec<_>>()
    };

    let (sequential, sequential_stats) = pipeline.run_all(roots()).unwrap();
    let (parallel, parallel_stats) = pipeline.par_run_all(roots()).unwrap();

    assert_eq!(sequential_stats, parallel_stats);
    let bounds = |surfaces: &[SharedSurface]| surfaces.iter().map(|s| s.bound()).collect::<Vec<_>>();
    assert_eq!(bounds(&sequential), bounds(&parallel));
}
