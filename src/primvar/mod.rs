//! Primitive variables: named, typed, classed per-primitive data.

pub use self::phantom::synthesize_phantom_corner;
pub use self::primitive_variable::PrimitiveVariable;
pub use self::primvar_set::PrimVarSet;
pub use self::primvar_values::{PrimVarKind, PrimVarValues};
pub use self::storage_class::{ClassSizes, StorageClass};

mod phantom;
mod primitive_variable;
mod primvar_set;
mod primvar_values;
mod storage_class;

/// Names of the primitive variables the splitter reads or synthesizes.
pub mod names {
    /// Vertex positions, a `vertex` class point variable.
    pub const P: &str = "P";
    /// Shading normals.
    pub const N: &str = "N";
    /// First texture coordinate.
    pub const S: &str = "s";
    /// Second texture coordinate.
    pub const T: &str = "t";
    /// First surface parameter.
    pub const U: &str = "u";
    /// Second surface parameter.
    pub const V: &str = "v";
}
