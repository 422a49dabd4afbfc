use crate::math::{Point, Real};
use crate::primvar::{names, ClassSizes, PrimVarKind, PrimitiveVariable, StorageClass};
use crate::surface::ValidationError;
use indexmap::IndexMap;

/// The insertion-ordered set of primitive variables attached to a surface.
///
/// Names are unique. Iteration follows insertion order, which is also the order in which
/// children of a split receive their variables.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrimVarSet {
    vars: IndexMap<String, PrimitiveVariable>,
}

impl PrimVarSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list of variables, rejecting duplicate names.
    pub fn from_vars(vars: impl IntoIterator<Item = PrimitiveVariable>) -> Result<Self, ValidationError> {
        let mut set = Self::new();
        for var in vars {
            set.insert(var)?;
        }
        Ok(set)
    }

    /// Adds a variable at the end of the set.
    ///
    /// Fails if a variable with the same name already exists.
    pub fn insert(&mut self, var: PrimitiveVariable) -> Result<(), ValidationError> {
        if self.vars.contains_key(var.name()) {
            return Err(ValidationError::DuplicateName(var.name().to_string()));
        }

        let _ = self.vars.insert(var.name().to_string(), var);
        Ok(())
    }

    /// The variable named `name`, if any.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&PrimitiveVariable> {
        self.vars.get(name)
    }

    /// Does this set define a variable named `name`?
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// The number of variables in this set.
    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Is this set empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterates through the variables in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PrimitiveVariable> {
        self.vars.values()
    }

    /// The positions stored in the `P` variable, if it exists and holds points.
    pub fn positions(&self) -> Option<&[Point<Real>]> {
        self.get(names::P)?.values().as_points()
    }

    /// Checks that every variable is sized consistently with `sizes`, and that `P` is a
    /// per-vertex point variable.
    pub fn validate(&self, sizes: &ClassSizes) -> Result<(), ValidationError> {
        let p = self.get(names::P).ok_or(ValidationError::MissingPosition)?;

        if !p.class().is_per_vertex() || p.kind() != PrimVarKind::Point {
            return Err(ValidationError::InvalidPosition {
                class: p.class(),
                kind: p.kind(),
            });
        }

        for var in self.iter() {
            var.validate(sizes)?;
        }

        Ok(())
    }

    /// The ordered `(name, class, kind)` signature of this set.
    pub fn signature(&self) -> Vec<(String, StorageClass, PrimVarKind)> {
        self.iter()
            .map(|var| (var.name().to_string(), var.class(), var.kind()))
            .collect()
    }
}

impl FromIterator<PrimitiveVariable> for PrimVarSet {
    /// Collects variables into a set. A later variable replaces an earlier one with the
    /// same name, keeping the position of the earlier one.
    fn from_iter<I: IntoIterator<Item = PrimitiveVariable>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|var| (var.name().to_string(), var))
                .collect(),
        }
    }
}
