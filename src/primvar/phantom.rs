use crate::primvar::PrimitiveVariable;
use crate::surface::{PrimVarOperation, SplitError};

/// Extrapolates the fourth corner of a triangle-derived quad.
///
/// Given the per-vertex values `[v0, v1, v2, _]` of a quad whose last corner does not
/// exist on the parent polygon, sets `v3 = v1 - v0 + v2` so the values describe a
/// parallelogram. Strings have no subtraction and are reported as
/// [`SplitError::UnsupportedVariableKind`].
pub fn synthesize_phantom_corner(var: &mut PrimitiveVariable) -> Result<(), SplitError> {
    debug_assert!(
        var.class().is_per_vertex(),
        "phantom data only exists for varying and vertex variables"
    );
    debug_assert_eq!(var.len(), 4, "phantom data is synthesized on quads only");

    var.values_mut()
        .complete_parallelogram()
        .map_err(|kind| var.unsupported(kind, PrimVarOperation::PhantomSynthesis))
}
