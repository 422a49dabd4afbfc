use crate::math::Real;
use crate::primvar::{PrimVarKind, StorageClass};
use core::fmt;

/// A surface or primitive variable that does not satisfy the preconditions of splitting.
///
/// These are reported by the validating constructors of every surface type, before any
/// split is attempted.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// A polygon needs at least three vertices.
    #[error("a polygon needs at least 3 vertices, found {0}")]
    TooFewVertices(usize),
    /// A primitive variable holds a number of values inconsistent with its storage class.
    #[error("the {class} primitive variable `{name}` holds {found} values, expected {expected}")]
    PrimVarSize {
        /// The name of the offending variable.
        name: String,
        /// Its storage class.
        class: StorageClass,
        /// The number of values its class requires on this surface.
        expected: usize,
        /// The number of values it actually holds.
        found: usize,
    },
    /// The surface carries no `P` primitive variable.
    #[error("the surface has no `P` primitive variable")]
    MissingPosition,
    /// The `P` primitive variable is not a per-vertex point variable.
    #[error("`P` must be a vertex or varying point variable, found a {class} {kind} variable")]
    InvalidPosition {
        /// The storage class of `P`.
        class: StorageClass,
        /// The data kind of `P`.
        kind: PrimVarKind,
    },
    /// Two primitive variables share the same name.
    #[error("the primitive variable `{0}` is defined twice")]
    DuplicateName(String),
    /// A polygon references a point outside of its vertex pool.
    #[error("vertex index {index} is out of bounds for a pool of {len} points")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The number of points in the pool.
        len: usize,
    },
    /// A polygon's face index is outside of its mesh.
    #[error("face index {index} is out of bounds for a mesh of {len} faces")]
    FaceOutOfBounds {
        /// The offending face index.
        index: usize,
        /// The number of faces in the mesh.
        len: usize,
    },
    /// A motion surface needs at least one time slot.
    #[error("a motion surface needs at least one time slot")]
    EmptyMotion,
    /// Motion sample times must be strictly increasing.
    #[error("motion sample times must be strictly increasing, found {previous} then {next}")]
    UnorderedTimes {
        /// The time of the previous slot.
        previous: Real,
        /// The time of the slot that follows it.
        next: Real,
    },
    /// The time slots of a motion surface do not share the same topology.
    #[error("motion blur mismatch: {0}")]
    Motion(MotionMismatch),
}

/// The time samples of a motion-blurred surface did not split in lock-step.
///
/// This indicates an unsound motion-blur split rather than bad geometry.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum MotionMismatch {
    /// A time sample produced a different number of children than the first one.
    #[error("the sample at time {time} split into {found} children, expected {expected}")]
    ChildCount {
        /// The time of the mismatching sample.
        time: Real,
        /// The number of children of the first sample.
        expected: usize,
        /// The number of children of this sample.
        found: usize,
    },
    /// A time sample does not have the same topology as the first one.
    #[error("the sample at time {time} does not match the topology of the first sample")]
    Topology {
        /// The time of the mismatching sample.
        time: Real,
    },
    /// A child of a time sample does not have the same topology as the matching child of
    /// the first sample.
    #[error("child {child} of the sample at time {time} does not match the topology of the first sample's child")]
    ChildTopology {
        /// The time of the mismatching sample.
        time: Real,
        /// The index of the mismatching child.
        child: usize,
    },
}

/// The primitive variable operation that could not be carried out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrimVarOperation {
    /// Extrapolating the fourth corner of a triangle-derived quad.
    PhantomSynthesis,
    /// Interpolating values at a split boundary.
    Interpolation,
}

impl fmt::Display for PrimVarOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrimVarOperation::PhantomSynthesis => f.write_str("phantom synthesis"),
            PrimVarOperation::Interpolation => f.write_str("interpolation"),
        }
    }
}

/// Errors that can occur while splitting a surface.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum SplitError {
    /// A primitive variable has a data kind the requested operation is not defined for.
    ///
    /// The variable is never dropped silently: the whole split fails instead.
    #[error("unsupported variable kind: cannot apply {operation} to the {kind} variable `{name}`")]
    UnsupportedVariableKind {
        /// The name of the variable.
        name: String,
        /// Its data kind.
        kind: PrimVarKind,
        /// The operation that failed.
        operation: PrimVarOperation,
    },
    /// The time samples of a motion surface did not split in lock-step.
    #[error("motion blur mismatch: {0}")]
    MotionMismatch(#[from] MotionMismatch),
    /// A coordinate-system transform needed by the split could not be inverted.
    #[error("the transform from `{from}` space to `{to}` space is singular")]
    SingularTransform {
        /// The source space.
        from: String,
        /// The destination space.
        to: String,
    },
    /// A coordinate system needed by the split is not known to the render context.
    #[error("unknown coordinate system `{0}`")]
    UnknownSpace(String),
    /// A surface produced by the split failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
