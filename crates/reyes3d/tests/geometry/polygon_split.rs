use reyes3d::context::{Attributes, CoordinateSystems, Orientation, ShadingNeeds};
use reyes3d::math::{Color, Real, Transform};
use reyes3d::na::{Point3, Vector3};
use reyes3d::primvar::{PrimVarKind, PrimVarSet, PrimVarValues, PrimitiveVariable, StorageClass};
use reyes3d::surface::{
    BilinearPatch, Polygon, PrimVarOperation, SplitError, Surface, SurfaceFlags, SurfaceState,
};
use std::sync::Arc;

fn positions(pts: &[[Real; 3]]) -> PrimitiveVariable {
    PrimitiveVariable::new(
        "P",
        StorageClass::Vertex,
        PrimVarValues::Point(pts.iter().map(|p| Point3::from(*p)).collect()),
    )
}

fn patches(children: &[Box<dyn Surface>]) -> Vec<&BilinearPatch> {
    children
        .iter()
        .map(|c| c.as_bilinear_patch().unwrap())
        .collect()
}

#[test]
fn pentagon_emits_one_quad_and_one_phantom_quad() {
    let ctx = CoordinateSystems::default();
    let pts = [
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [3.0, 1.0, 0.0],
        [1.0, 2.0, 0.0],
        [-1.0, 1.0, 0.0],
    ];
    let state = SurfaceState::new(Arc::new(Attributes::default()));
    let pentagon = Polygon::new(state, PrimVarSet::from_vars([positions(&pts)]).unwrap()).unwrap();

    let children = pentagon.split(&ctx).unwrap();
    let children = patches(&children);
    assert_eq!(children.len(), 2);

    // Corners (A, B, D, C): (0, 1, 3, 2), then (0, 3, phantom, 4).
    let p = |i: usize| Point3::from(pts[i]);
    assert_eq!(children[0].corners(), [p(0), p(1), p(3), p(2)]);
    assert!(!children[0].flags().contains(SurfaceFlags::PHANTOM_FOURTH_VERTEX));
    assert!(children[0].phantom_clip().is_none());

    let phantom = p(4) + (p(3) - p(0));
    assert_eq!(children[1].corners(), [p(0), p(3), p(4), phantom]);
    assert!(children[1].flags().contains(SurfaceFlags::PHANTOM_FOURTH_VERTEX));
    let clip = children[1].phantom_clip().unwrap();
    assert_eq!(clip.edge, [p(3), p(4)]);
    assert_eq!(clip.kept, p(0));
}

#[test]
fn triangle_data_is_completed_and_copied() {
    let ctx = CoordinateSystems::default();
    let c = [
        Color::new(1.0, 0.0, 0.0),
        Color::new(0.0, 1.0, 0.0),
        Color::new(0.0, 0.0, 1.0),
    ];
    let vars = PrimVarSet::from_vars([
        positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
        PrimitiveVariable::new("Cs", StorageClass::Varying, PrimVarValues::Color(c.to_vec())),
        PrimitiveVariable::new("id", StorageClass::Uniform, PrimVarValues::Integer(vec![42])),
        PrimitiveVariable::new(
            "texname",
            StorageClass::Constant,
            PrimVarValues::String(vec!["brick".to_string()]),
        ),
    ])
    .unwrap();
    let state = SurfaceState::new(Arc::new(Attributes::default()));
    let tri = Polygon::new(state, vars).unwrap();

    let children = tri.split(&ctx).unwrap();
    let patch = patches(&children)[0];

    assert_eq!(
        patch.primvars().get("Cs").unwrap().values(),
        &PrimVarValues::Color(vec![c[0], c[1], c[2], c[1] - c[0] + c[2]])
    );
    assert_eq!(
        patch.primvars().get("id").unwrap().values(),
        &PrimVarValues::Integer(vec![42])
    );
    assert_eq!(
        patch.primvars().get("texname").unwrap().values(),
        &PrimVarValues::String(vec!["brick".to_string()])
    );
    let names: Vec<_> = patch.primvars().iter().map(|v| v.name()).collect();
    assert_eq!(names, ["P", "Cs", "id", "texname"]);
}

#[test]
fn texture_coordinates_are_synthesized_in_object_space() {
    let object_to_world = Transform::new_translation(&Vector3::new(1.0, 0.0, 0.0));
    let ctx = CoordinateSystems::new(Transform::identity());
    let attributes = Attributes::new(Orientation::RightHanded, ShadingNeeds::S | ShadingNeeds::T);
    let state = SurfaceState::new(Arc::new(attributes)).with_object_to_world(object_to_world);

    let vars = PrimVarSet::from_vars([
        positions(&[
            [1.0, 0.0, 0.0],
            [3.0, 0.0, 0.0],
            [3.0, 2.0, 0.0],
            [1.0, 2.0, 0.0],
        ]),
        // An explicit `t` is never overwritten.
        PrimitiveVariable::new(
            "t",
            StorageClass::Varying,
            PrimVarValues::Float(vec![5.0, 6.0, 7.0, 8.0]),
        ),
    ])
    .unwrap();
    let quad = Polygon::new(state, vars).unwrap();

    let children = quad.split(&ctx).unwrap();
    let patch = patches(&children)[0];

    // Corners (0, 1, 3, 2), shifted by the inverse object translation.
    let s = patch.primvars().get("s").unwrap().values().as_floats().unwrap();
    assert_eq!(s, &[0.0, 2.0, 0.0, 2.0]);
    let t = patch.primvars().get("t").unwrap().values().as_floats().unwrap();
    assert_eq!(t, &[5.0, 6.0, 8.0, 7.0]);
    assert!(patch.primvars().get("u").is_none());
    assert!(patch.primvars().get("N").is_none());
}

#[test]
fn string_vertex_data_cannot_be_extrapolated() {
    let ctx = CoordinateSystems::default();
    let vars = PrimVarSet::from_vars([
        positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
        PrimitiveVariable::new(
            "label",
            StorageClass::Varying,
            PrimVarValues::String(vec!["a".into(), "b".into(), "c".into()]),
        ),
    ])
    .unwrap();
    let state = SurfaceState::new(Arc::new(Attributes::default()));
    let tri = Polygon::new(state, vars).unwrap();

    assert_eq!(
        tri.split(&ctx).unwrap_err(),
        SplitError::UnsupportedVariableKind {
            name: "label".to_string(),
            kind: PrimVarKind::String,
            operation: PrimVarOperation::PhantomSynthesis,
        }
    );
}

#[test]
fn string_vertex_data_cannot_be_interpolated() {
    let ctx = CoordinateSystems::default();
    let vars = PrimVarSet::from_vars([
        positions(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]),
        PrimitiveVariable::new(
            "label",
            StorageClass::Vertex,
            PrimVarValues::String(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
        ),
    ])
    .unwrap();
    let state = SurfaceState::new(Arc::new(Attributes::default()));
    let quad = Polygon::new(state, vars).unwrap();

    // Gathering corners is fine, halving the resulting patch is not.
    let children = quad.split(&ctx).unwrap();
    assert_eq!(
        children[0].split(&ctx).unwrap_err(),
        SplitError::UnsupportedVariableKind {
            name: "label".to_string(),
            kind: PrimVarKind::String,
            operation: PrimVarOperation::Interpolation,
        }
    );
}
