use crate::math::Real;
use crate::primvar::{ClassSizes, PrimVarKind, PrimVarValues, StorageClass};
use crate::surface::{PrimVarOperation, SplitError, ValidationError};

/// A named, typed and classed set of values attached to a surface.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveVariable {
    name: String,
    class: StorageClass,
    values: PrimVarValues,
}

impl PrimitiveVariable {
    /// Creates a new primitive variable.
    ///
    /// The number of values is checked against a surface by [`Self::validate`], usually
    /// when the variable is attached through a validating surface constructor.
    pub fn new(name: impl Into<String>, class: StorageClass, values: PrimVarValues) -> Self {
        Self {
            name: name.into(),
            class,
            values,
        }
    }

    /// The name of this variable.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The storage class of this variable.
    #[inline]
    pub fn class(&self) -> StorageClass {
        self.class
    }

    /// The data kind of this variable.
    #[inline]
    pub fn kind(&self) -> PrimVarKind {
        self.values.kind()
    }

    /// The values of this variable.
    #[inline]
    pub fn values(&self) -> &PrimVarValues {
        &self.values
    }

    /// The number of values of this variable.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Does this variable hold no value at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks that this variable holds exactly as many values as its class requires on a
    /// surface described by `sizes`.
    pub fn validate(&self, sizes: &ClassSizes) -> Result<(), ValidationError> {
        let expected = self.class.expected_len(sizes);

        if self.len() != expected {
            return Err(ValidationError::PrimVarSize {
                name: self.name.clone(),
                class: self.class,
                expected,
                found: self.len(),
            });
        }

        Ok(())
    }

    /// A new variable with the same name, class and kind, holding the values at `indices`.
    pub fn gather(&self, indices: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            class: self.class,
            values: self.values.gather(indices),
        }
    }

    /// A new variable with the same name, class and kind, holding one value per `(a, b)`
    /// pair, interpolated from `self[a]` to `self[b]` at `t`.
    pub fn lerp_pairs(&self, pairs: &[(usize, usize)], t: Real) -> Result<Self, SplitError> {
        let values = self
            .values
            .lerp_pairs(pairs, t)
            .map_err(|kind| self.unsupported(kind, PrimVarOperation::Interpolation))?;

        Ok(Self {
            name: self.name.clone(),
            class: self.class,
            values,
        })
    }

    pub(crate) fn values_mut(&mut self) -> &mut PrimVarValues {
        &mut self.values
    }

    pub(crate) fn unsupported(&self, kind: PrimVarKind, operation: PrimVarOperation) -> SplitError {
        SplitError::UnsupportedVariableKind {
            name: self.name.clone(),
            kind,
            operation,
        }
    }
}
