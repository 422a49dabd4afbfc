/// The winding of a surface's vertices when seen from its front side.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Counter-clockwise winding in a left-handed coordinate system.
    LeftHanded,
    /// Counter-clockwise winding in a right-handed coordinate system.
    #[default]
    RightHanded,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
/// The surface inputs read by the shaders bound to a surface.
///
/// The splitter synthesizes any of these that a surface does not define explicitly.
pub struct ShadingNeeds(u8);

bitflags::bitflags! {
    impl ShadingNeeds: u8 {
        /// The shading normal `N`.
        const N = 1;
        /// The texture coordinate `s`.
        const S = 1 << 1;
        /// The texture coordinate `t`.
        const T = 1 << 2;
        /// The surface parameter `u`.
        const U = 1 << 3;
        /// The surface parameter `v`.
        const V = 1 << 4;
        /// Every texture parametrization input.
        const TEXTURE = Self::S.bits() | Self::T.bits() | Self::U.bits() | Self::V.bits();
    }
}

/// The attribute set shared by every surface created under the same attribute state.
///
/// Attributes are immutable while splitting and shared by reference between a surface and
/// all of its children.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    /// The winding of the vertices of the surfaces.
    pub orientation: Orientation,
    /// The surface inputs the bound shaders read.
    pub shading_needs: ShadingNeeds,
}

impl Attributes {
    /// Attributes with the given orientation and shading needs.
    pub fn new(orientation: Orientation, shading_needs: ShadingNeeds) -> Self {
        Self {
            orientation,
            shading_needs,
        }
    }
}
