use oorandom::Rand32;
use reyes3d::bounding_volume::BoundingVolume;
use reyes3d::context::{Attributes, CoordinateSystems};
use reyes3d::math::{Point, Real};
use reyes3d::pipeline::{ExtentDiceTest, SplitParameters, SplitPipeline};
use reyes3d::primvar::{PrimVarSet, PrimVarValues, PrimitiveVariable, StorageClass};
use reyes3d::surface::{Polygon, Surface, SurfaceFlags, SurfaceState};
use std::sync::Arc;

/// A convex polygon with `n` vertices on a circle of the given radius, in counter-clockwise order.
fn random_convex_polygon(rng: &mut Rand32, n: usize, radius: Real) -> Polygon {
    let mut angles: Vec<Real> = (0..n)
        .map(|_| rng.rand_float() as Real * core::f32::consts::TAU as Real)
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let pts = angles
        .iter()
        .map(|a| Point::new(a.cos() * radius, a.sin() * radius, 0.0))
        .collect();
    let vars = PrimVarSet::from_vars([
        PrimitiveVariable::new("P", StorageClass::Vertex, PrimVarValues::Point(pts)),
        PrimitiveVariable::new(
            "id",
            StorageClass::Varying,
            PrimVarValues::Integer((0..n as i32).collect()),
        ),
    ])
    .unwrap();

    Polygon::new(SurfaceState::new(Arc::new(Attributes::default())), vars).unwrap()
}

#[test]
fn split_child_count_and_containment() {
    let ctx = CoordinateSystems::default();
    let mut rng = Rand32::new(42);

    for _ in 0..200 {
        let n = rng.rand_range(3..16) as usize;
        let polygon = random_convex_polygon(&mut rng, n, 10.0);
        let bound = polygon.bound();

        let children = polygon.split(&ctx).unwrap();
        assert_eq!(children.len(), (n - 1) / 2);

        for (k, child) in children.iter().enumerate() {
            let patch = child.as_bilinear_patch().unwrap();
            let is_last = k + 1 == children.len();
            let phantom = n % 2 == 1 && is_last;
            assert_eq!(
                patch.flags().contains(SurfaceFlags::PHANTOM_FOURTH_VERTEX),
                phantom
            );

            // Non-phantom corners are polygon vertices.
            if !phantom {
                assert!(bound.contains(&child.bound()));
            }

            let ids = patch.primvars().get("id").unwrap().values();
            let PrimVarValues::Integer(ids) = ids else {
                panic!("`id` should stay an integer variable");
            };
            assert_eq!(ids[0], 0);
            assert_eq!(ids[1], 2 * k as i32 + 1);
        }
    }
}

#[test]
fn pipeline_output_is_diceable() {
    let ctx = CoordinateSystems::default();
    let pipeline = SplitPipeline::new(SplitParameters::default(), ExtentDiceTest::new(2.0), &ctx);
    let mut rng = Rand32::new(7);

    for _ in 0..20 {
        let n = rng.rand_range(3..9) as usize;
        let polygon = random_convex_polygon(&mut rng, n, 5.0);
        let (emitted, stats) = pipeline.run(Box::new(polygon)).unwrap();

        assert_eq!(stats.emitted(), emitted.len());
        for surface in &emitted {
            assert!(surface.flags().contains(SurfaceFlags::DICEABLE));
            assert!(surface.bound().max_extent() <= 2.0);
        }
    }
}
