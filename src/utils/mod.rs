//! Various unsorted geometrical operators.

pub use self::facet_normal::facet_normal;

mod facet_normal;
