/// Parameters controlling a [`SplitPipeline`](super::SplitPipeline).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SplitParameters {
    /// The number of consecutive splits that failed to shrink a surface's bound after
    /// which the surface is emitted as is.
    ///
    /// This bounds the recursion on surfaces the dice test never accepts, such as
    /// surfaces crossing the eye plane.
    pub eye_split_limit: u32,
    /// Discard quads lying entirely beyond their phantom clip edge instead of emitting them.
    pub cull_phantom_clipped: bool,
}

impl Default for SplitParameters {
    fn default() -> Self {
        Self {
            eye_split_limit: 10,
            cull_phantom_clipped: true,
        }
    }
}

impl SplitParameters {
    /// Sets the eye-split limit.
    #[must_use]
    pub fn with_eye_split_limit(mut self, eye_split_limit: u32) -> Self {
        self.eye_split_limit = eye_split_limit;
        self
    }
}
