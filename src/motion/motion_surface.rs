use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::context::RenderContext;
use crate::math::Real;
use crate::motion::{NoSweep, SweepPadding};
use crate::surface::{
    MotionMismatch, SharedSurface, SplitDirection, SplitError, Surface, SurfaceFlags,
    SurfaceState, SurfaceType, Topology, TypedSurface, ValidationError,
};
use alloc::sync::Arc;
use smallvec::SmallVec;

/// The time samples of a motion surface. Most scenes use two, at shutter open and close.
type Slots = SmallVec<[(Real, SharedSurface); 2]>;

/// One logical surface sampled at several, strictly increasing, times.
///
/// All the samples share the same topology, and are split in lock-step so that the
/// children of a motion surface are motion surfaces themselves.
#[derive(Clone, Debug)]
pub struct MotionSurface {
    state: SurfaceState,
    slots: Slots,
    sweep: Arc<dyn SweepPadding>,
}

impl MotionSurface {
    /// Creates a motion surface from its `(time, sample)` slots.
    ///
    /// Fails if there are no slots, if the times are not strictly increasing, or if a
    /// sample does not have the same topology as the first one.
    pub fn new(
        state: SurfaceState,
        slots: impl IntoIterator<Item = (Real, SharedSurface)>,
    ) -> Result<Self, ValidationError> {
        let slots: Slots = slots.into_iter().collect();
        let (_, first) = slots.first().ok_or(ValidationError::EmptyMotion)?;
        let topology = first.topology();

        for w in slots.windows(2) {
            if !(w[1].0 > w[0].0) {
                return Err(ValidationError::UnorderedTimes {
                    previous: w[0].0,
                    next: w[1].0,
                });
            }
        }

        if let Some((time, _)) = slots.iter().find(|(_, s)| s.topology() != topology) {
            return Err(ValidationError::Motion(MotionMismatch::Topology { time: *time }));
        }

        Ok(Self {
            state,
            slots,
            sweep: Arc::new(NoSweep),
        })
    }

    /// Sets the padding applied to the bound of this surface.
    #[must_use]
    pub fn with_sweep(mut self, sweep: Arc<dyn SweepPadding>) -> Self {
        self.sweep = sweep;
        self
    }

    /// The `(time, sample)` slots of this surface.
    #[inline]
    pub fn slots(&self) -> &[(Real, SharedSurface)] {
        &self.slots
    }

    /// The sample times of this surface.
    pub fn times(&self) -> impl ExactSizeIterator<Item = Real> + '_ {
        self.slots.iter().map(|(t, _)| *t)
    }

    /// The sweep padding of this surface.
    #[inline]
    pub fn sweep(&self) -> &Arc<dyn SweepPadding> {
        &self.sweep
    }

    fn samples(&self) -> impl Iterator<Item = &SharedSurface> {
        self.slots.iter().map(|(_, s)| s)
    }
}

impl Surface for MotionSurface {
    fn surface_type(&self) -> SurfaceType {
        SurfaceType::Motion
    }

    fn as_typed_surface(&self) -> TypedSurface<'_> {
        TypedSurface::Motion(self)
    }

    fn state(&self) -> &SurfaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    fn bound(&self) -> Aabb {
        let union = self
            .samples()
            .fold(Aabb::new_invalid(), |acc, s| acc.merged(&s.bound()));
        self.sweep.pad(&union)
    }

    /// The topology shared by every sample, tagged as a motion surface.
    fn topology(&self) -> Topology {
        let mut topology = self.slots[0].1.topology();
        topology.surface_type = SurfaceType::Motion;
        topology
    }

    /// The direction the first sample would be split along.
    fn split_direction(&self) -> Option<SplitDirection> {
        self.slots[0].1.split_direction()
    }

    fn split_along(
        &self,
        ctx: &dyn RenderContext,
        direction: Option<SplitDirection>,
    ) -> Result<Vec<Box<dyn Surface>>, SplitError> {
        let direction = direction.or_else(|| self.split_direction());

        let mut columns: Vec<Slots> = Vec::new();
        let mut first_topologies = Vec::new();

        for (k, (time, sample)) in self.slots.iter().enumerate() {
            let children = sample.split_along(ctx, direction)?;

            if k == 0 {
                first_topologies = children.iter().map(|c| c.topology()).collect();
                columns.resize_with(children.len(), SmallVec::new);
            } else if children.len() != columns.len() {
                return Err(MotionMismatch::ChildCount {
                    time: *time,
                    expected: columns.len(),
                    found: children.len(),
                }
                .into());
            }

            for (i, child) in children.into_iter().enumerate() {
                if k > 0 && child.topology() != first_topologies[i] {
                    return Err(MotionMismatch::ChildTopology {
                        time: *time,
                        child: i,
                    }
                    .into());
                }

                columns[i].push((*time, SharedSurface::from(child)));
            }
        }

        log::trace!(
            "Split motion surface with {} samples into {} children.",
            self.slots.len(),
            columns.len()
        );

        Ok(columns
            .into_iter()
            .map(|slots| {
                let mut state = self.state.child();
                let phantom = slots
                    .iter()
                    .all(|(_, s)| s.flags().contains(SurfaceFlags::PHANTOM_FOURTH_VERTEX));
                state.flags.set(SurfaceFlags::PHANTOM_FOURTH_VERTEX, phantom);

                Box::new(MotionSurface {
                    state,
                    slots,
                    sweep: self.sweep.clone(),
                }) as Box<dyn Surface>
            })
            .collect())
    }

    fn is_degenerate(&self) -> bool {
        self.samples().all(|s| s.is_degenerate())
    }

    fn is_fully_clipped(&self) -> bool {
        self.samples().all(|s| s.is_fully_clipped())
    }
}
