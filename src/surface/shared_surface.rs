use crate::surface::{Surface, TypedSurface};
use alloc::sync::Arc;
use core::fmt;
use core::ops::Deref;

/// A reference-counted, shareable surface.
///
/// A surface may be referenced by several in-flight computations (for example the time
/// slots of a motion surface) before being dropped after its single split. Cloning a
/// `SharedSurface` only increments a reference count.
#[derive(Clone)]
pub struct SharedSurface(pub Arc<dyn Surface>);

impl Deref for SharedSurface {
    type Target = dyn Surface;
    fn deref(&self) -> &dyn Surface {
        &*self.0
    }
}

impl AsRef<dyn Surface> for SharedSurface {
    fn as_ref(&self) -> &dyn Surface {
        &*self.0
    }
}

impl fmt::Debug for SharedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let typed_surface: TypedSurface = (*self.0).as_typed_surface();
        write!(f, "SharedSurface ( Arc<{typed_surface:?}> )")
    }
}

impl From<Box<dyn Surface>> for SharedSurface {
    fn from(surface: Box<dyn Surface>) -> Self {
        Self(Arc::from(surface))
    }
}

impl SharedSurface {
    /// Wraps any surface type into a `SharedSurface`.
    pub fn new(surface: impl Surface) -> Self {
        Self(Arc::new(surface))
    }

    /// Do `self` and `other` point to the same surface?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
