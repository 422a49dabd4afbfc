use core::fmt;

/// How many values a primitive variable holds, and how they behave under subdivision.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageClass {
    /// One value for the whole primitive, copied unchanged.
    Constant,
    /// One value per face, copied from the parent face.
    Uniform,
    /// One value per corner, interpolated linearly under subdivision.
    Varying,
    /// One value per control vertex, interpolated with the surface basis.
    ///
    /// For the flat primitives handled here the basis is bilinear, so `vertex`
    /// data behaves exactly like `varying` data.
    Vertex,
}

impl StorageClass {
    /// Does this class store one value per corner?
    #[inline]
    pub fn is_per_vertex(self) -> bool {
        matches!(self, StorageClass::Varying | StorageClass::Vertex)
    }

    /// The number of values a variable of this class must hold on a primitive
    /// described by `sizes`.
    #[inline]
    pub fn expected_len(self, sizes: &ClassSizes) -> usize {
        match self {
            StorageClass::Constant => 1,
            StorageClass::Uniform => sizes.uniform,
            StorageClass::Varying => sizes.varying,
            StorageClass::Vertex => sizes.vertex,
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            StorageClass::Constant => "constant",
            StorageClass::Uniform => "uniform",
            StorageClass::Varying => "varying",
            StorageClass::Vertex => "vertex",
        };
        f.write_str(name)
    }
}

/// The value counts expected for each storage class on a given primitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClassSizes {
    /// Number of faces.
    pub uniform: usize,
    /// Number of interpolation corners.
    pub varying: usize,
    /// Number of control vertices.
    pub vertex: usize,
}

impl ClassSizes {
    /// Sizes for a single polygon with `num_vertices` vertices.
    pub fn polygon(num_vertices: usize) -> Self {
        Self {
            uniform: 1,
            varying: num_vertices,
            vertex: num_vertices,
        }
    }

    /// Sizes for a shared vertex pool of `num_points` points used by `num_faces` faces.
    pub fn mesh(num_points: usize, num_faces: usize) -> Self {
        Self {
            uniform: num_faces,
            varying: num_points,
            vertex: num_points,
        }
    }

    /// Sizes for a bilinear patch.
    pub fn bilinear_patch() -> Self {
        Self::polygon(4)
    }
}
