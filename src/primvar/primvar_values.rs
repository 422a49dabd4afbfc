use crate::math::{Color, HPoint, Point, Real, Transform, Vector};
use core::fmt;

/// The data type of a primitive variable.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimVarKind {
    /// A scalar float.
    Float,
    /// A scalar integer.
    Integer,
    /// A 3D point.
    Point,
    /// A 3D direction.
    Vector,
    /// A 3D surface normal.
    Normal,
    /// An RGB color.
    Color,
    /// A 4x4 matrix.
    Matrix,
    /// A character string.
    String,
    /// A homogeneous 4D point.
    HPoint,
}

impl fmt::Display for PrimVarKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PrimVarKind::Float => "float",
            PrimVarKind::Integer => "integer",
            PrimVarKind::Point => "point",
            PrimVarKind::Vector => "vector",
            PrimVarKind::Normal => "normal",
            PrimVarKind::Color => "color",
            PrimVarKind::Matrix => "matrix",
            PrimVarKind::String => "string",
            PrimVarKind::HPoint => "hpoint",
        };
        f.write_str(name)
    }
}

/// The values of a primitive variable, tagged by their data kind.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum PrimVarValues {
    /// Scalar floats.
    Float(Vec<Real>),
    /// Scalar integers.
    Integer(Vec<i32>),
    /// Points.
    Point(Vec<Point<Real>>),
    /// Directions.
    Vector(Vec<Vector<Real>>),
    /// Normals.
    Normal(Vec<Vector<Real>>),
    /// Colors.
    Color(Vec<Color<Real>>),
    /// Matrices.
    Matrix(Vec<Transform<Real>>),
    /// Strings.
    String(Vec<String>),
    /// Homogeneous points.
    HPoint(Vec<HPoint<Real>>),
}

/// Values that can be linearly combined under subdivision.
trait Affine: Clone {
    /// The fourth corner of the parallelogram `v0, v1, v2`: `v1 - v0 + v2`.
    fn parallelogram(v0: &Self, v1: &Self, v2: &Self) -> Self;
    /// Linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
    fn lerp(a: &Self, b: &Self, t: Real) -> Self;
}

impl Affine for Real {
    fn parallelogram(v0: &Self, v1: &Self, v2: &Self) -> Self {
        (v1 - v0) + v2
    }

    fn lerp(a: &Self, b: &Self, t: Real) -> Self {
        a + (b - a) * t
    }
}

/// Integers wrap around on overflow. Interpolation is carried out in `f64`, which holds
/// every `i32` exactly, and rounds half away from zero.
impl Affine for i32 {
    fn parallelogram(v0: &Self, v1: &Self, v2: &Self) -> Self {
        v1.wrapping_sub(*v0).wrapping_add(*v2)
    }

    fn lerp(a: &Self, b: &Self, t: Real) -> Self {
        let (a, b) = (*a as f64, *b as f64);
        (a + (b - a) * t as f64).round() as i32
    }
}

impl Affine for Point<Real> {
    fn parallelogram(v0: &Self, v1: &Self, v2: &Self) -> Self {
        v2 + (v1 - v0)
    }

    fn lerp(a: &Self, b: &Self, t: Real) -> Self {
        a + (b - a) * t
    }
}

impl Affine for Vector<Real> {
    fn parallelogram(v0: &Self, v1: &Self, v2: &Self) -> Self {
        (v1 - v0) + v2
    }

    fn lerp(a: &Self, b: &Self, t: Real) -> Self {
        a.lerp(b, t)
    }
}

impl Affine for HPoint<Real> {
    fn parallelogram(v0: &Self, v1: &Self, v2: &Self) -> Self {
        (v1 - v0) + v2
    }

    fn lerp(a: &Self, b: &Self, t: Real) -> Self {
        a.lerp(b, t)
    }
}

impl Affine for Transform<Real> {
    fn parallelogram(v0: &Self, v1: &Self, v2: &Self) -> Self {
        (v1 - v0) + v2
    }

    fn lerp(a: &Self, b: &Self, t: Real) -> Self {
        a + (b - a) * t
    }
}

fn complete<T: Affine>(values: &mut [T]) {
    values[3] = T::parallelogram(&values[0], &values[1], &values[2]);
}

fn lerp_pairs<T: Affine>(values: &[T], pairs: &[(usize, usize)], t: Real) -> Vec<T> {
    pairs
        .iter()
        .map(|&(a, b)| {
            if a == b {
                values[a].clone()
            } else {
                T::lerp(&values[a], &values[b], t)
            }
        })
        .collect()
}

macro_rules! map_values {
    ($values: expr, $v: ident => $e: expr) => {
        match $values {
            PrimVarValues::Float($v) => PrimVarValues::Float($e),
            PrimVarValues::Integer($v) => PrimVarValues::Integer($e),
            PrimVarValues::Point($v) => PrimVarValues::Point($e),
            PrimVarValues::Vector($v) => PrimVarValues::Vector($e),
            PrimVarValues::Normal($v) => PrimVarValues::Normal($e),
            PrimVarValues::Color($v) => PrimVarValues::Color($e),
            PrimVarValues::Matrix($v) => PrimVarValues::Matrix($e),
            PrimVarValues::String($v) => PrimVarValues::String($e),
            PrimVarValues::HPoint($v) => PrimVarValues::HPoint($e),
        }
    };
}

impl PrimVarValues {
    /// The data kind of these values.
    pub fn kind(&self) -> PrimVarKind {
        match self {
            PrimVarValues::Float(_) => PrimVarKind::Float,
            PrimVarValues::Integer(_) => PrimVarKind::Integer,
            PrimVarValues::Point(_) => PrimVarKind::Point,
            PrimVarValues::Vector(_) => PrimVarKind::Vector,
            PrimVarValues::Normal(_) => PrimVarKind::Normal,
            PrimVarValues::Color(_) => PrimVarKind::Color,
            PrimVarValues::Matrix(_) => PrimVarKind::Matrix,
            PrimVarValues::String(_) => PrimVarKind::String,
            PrimVarValues::HPoint(_) => PrimVarKind::HPoint,
        }
    }

    /// The number of values.
    pub fn len(&self) -> usize {
        match self {
            PrimVarValues::Float(v) => v.len(),
            PrimVarValues::Integer(v) => v.len(),
            PrimVarValues::Point(v) => v.len(),
            PrimVarValues::Vector(v) => v.len(),
            PrimVarValues::Normal(v) => v.len(),
            PrimVarValues::Color(v) => v.len(),
            PrimVarValues::Matrix(v) => v.len(),
            PrimVarValues::String(v) => v.len(),
            PrimVarValues::HPoint(v) => v.len(),
        }
    }

    /// Is this set of values empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the values at the given indices, in order.
    ///
    /// Panics if an index is out of bounds.
    pub fn gather(&self, indices: &[usize]) -> Self {
        map_values!(self, v => indices.iter().map(|&i| v[i].clone()).collect())
    }

    /// Builds one value per `(a, b)` pair by interpolating from `self[a]` to `self[b]` at `t`.
    ///
    /// Pairs with `a == b` copy the value unchanged. Strings cannot be interpolated: their
    /// kind is returned as the error.
    pub fn lerp_pairs(&self, pairs: &[(usize, usize)], t: Real) -> Result<Self, PrimVarKind> {
        let result = match self {
            PrimVarValues::Float(v) => PrimVarValues::Float(lerp_pairs(v, pairs, t)),
            PrimVarValues::Integer(v) => PrimVarValues::Integer(lerp_pairs(v, pairs, t)),
            PrimVarValues::Point(v) => PrimVarValues::Point(lerp_pairs(v, pairs, t)),
            PrimVarValues::Vector(v) => PrimVarValues::Vector(lerp_pairs(v, pairs, t)),
            PrimVarValues::Normal(v) => PrimVarValues::Normal(lerp_pairs(v, pairs, t)),
            PrimVarValues::Color(v) => PrimVarValues::Color(lerp_pairs(v, pairs, t)),
            PrimVarValues::Matrix(v) => PrimVarValues::Matrix(lerp_pairs(v, pairs, t)),
            PrimVarValues::HPoint(v) => PrimVarValues::HPoint(lerp_pairs(v, pairs, t)),
            PrimVarValues::String(_) => return Err(PrimVarKind::String),
        };

        Ok(result)
    }

    /// Overwrites the fourth value with the parallelogram completion `v1 - v0 + v2`.
    ///
    /// Panics if there are less than four values. Strings have no subtraction: their kind
    /// is returned as the error and the values are left untouched.
    pub fn complete_parallelogram(&mut self) -> Result<(), PrimVarKind> {
        match self {
            PrimVarValues::Float(v) => complete(v),
            PrimVarValues::Integer(v) => complete(v),
            PrimVarValues::Point(v) => complete(v),
            PrimVarValues::Vector(v) => complete(v),
            PrimVarValues::Normal(v) => complete(v),
            PrimVarValues::Color(v) => complete(v),
            PrimVarValues::Matrix(v) => complete(v),
            PrimVarValues::HPoint(v) => complete(v),
            PrimVarValues::String(_) => return Err(PrimVarKind::String),
        }

        Ok(())
    }

    /// The values as points, if they are points.
    pub fn as_points(&self) -> Option<&[Point<Real>]> {
        match self {
            PrimVarValues::Point(v) => Some(v),
            _ => None,
        }
    }

    /// The values as floats, if they are floats.
    pub fn as_floats(&self) -> Option<&[Real]> {
        match self {
            PrimVarValues::Float(v) => Some(v),
            _ => None,
        }
    }

    /// The values as normals, if they are normals.
    pub fn as_normals(&self) -> Option<&[Vector<Real>]> {
        match self {
            PrimVarValues::Normal(v) => Some(v),
            _ => None,
        }
    }
}
