use crate::bounding_volume::BoundingVolume;
use crate::context::RenderContext;
use crate::pipeline::{DiceTest, SplitParameters};
use crate::surface::{SharedSurface, SplitError, Surface, SurfaceFlags, TypedSurface};
use core::ops::AddAssign;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Counters describing what a [`SplitPipeline`] run did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Number of surfaces split.
    pub splits: usize,
    /// Number of surfaces emitted as dice-able.
    pub diceable: usize,
    /// Number of surfaces emitted after reaching the eye-split limit.
    pub eye_split_limited: usize,
    /// Number of degenerate surfaces discarded.
    pub degenerate: usize,
    /// Number of quads discarded for lying beyond their phantom clip edge.
    pub clipped: usize,
}

impl SplitStats {
    /// The number of surfaces emitted.
    pub fn emitted(&self) -> usize {
        self.diceable + self.eye_split_limited
    }
}

impl AddAssign for SplitStats {
    fn add_assign(&mut self, rhs: Self) {
        self.splits += rhs.splits;
        self.diceable += rhs.diceable;
        self.eye_split_limited += rhs.eye_split_limited;
        self.degenerate += rhs.degenerate;
        self.clipped += rhs.clipped;
    }
}

/// Recursively splits surfaces until a [`DiceTest`] accepts them.
///
/// Each surface popped from the work stack is, in order:
/// 1. discarded if degenerate;
/// 2. discarded if it lies entirely beyond its phantom clip edge;
/// 3. flagged [`SurfaceFlags::DICEABLE`] and emitted if the dice test accepts it;
/// 4. emitted as is if its eye-split counter exceeds the limit;
/// 5. split otherwise, children whose bound contains the parent's bound getting their
///    eye-split counter incremented.
///
/// Splitting a polygon into patches never counts as an eye split: a quad's single patch
/// always shares its bound.
pub struct SplitPipeline<'a, D> {
    params: SplitParameters,
    dice_test: D,
    ctx: &'a dyn RenderContext,
}

impl<'a, D: DiceTest> SplitPipeline<'a, D> {
    /// Creates a new pipeline splitting surfaces in the coordinate systems of `ctx`.
    pub fn new(params: SplitParameters, dice_test: D, ctx: &'a dyn RenderContext) -> Self {
        Self {
            params,
            dice_test,
            ctx,
        }
    }

    /// The parameters of this pipeline.
    pub fn params(&self) -> &SplitParameters {
        &self.params
    }

    /// Splits `root` down to dice-able surfaces, returned in depth-first order.
    pub fn run(
        &self,
        root: Box<dyn Surface>,
    ) -> Result<(Vec<SharedSurface>, SplitStats), SplitError> {
        let mut stats = SplitStats::default();
        let mut output = Vec::new();
        let mut stack = vec![root];

        while let Some(mut surface) = stack.pop() {
            if surface.is_degenerate() {
                log::debug!("Discarding degenerate {:?}.", surface.surface_type());
                stats.degenerate += 1;
                continue;
            }

            if self.params.cull_phantom_clipped && surface.is_fully_clipped() {
                log::debug!("Discarding {:?} beyond its phantom clip edge.", surface.surface_type());
                stats.clipped += 1;
                continue;
            }

            if self.dice_test.is_diceable(&*surface) {
                surface.state_mut().flags.insert(SurfaceFlags::DICEABLE);
                stats.diceable += 1;
                output.push(SharedSurface::from(surface));
                continue;
            }

            if surface.eye_splits() > self.params.eye_split_limit {
                log::warn!(
                    "{:?} exceeded the eye-split limit ({}), emitting it undiced.",
                    surface.surface_type(),
                    self.params.eye_split_limit
                );
                stats.eye_split_limited += 1;
                output.push(SharedSurface::from(surface));
                continue;
            }

            let bound = surface.bound();
            let refines = !is_polygon_like(&*surface);
            let mut children = surface.split(self.ctx)?;
            stats.splits += 1;

            if refines {
                for child in &mut children {
                    if child.bound().contains(&bound) {
                        child.state_mut().eye_splits += 1;
                    }
                }
            }

            // Reversed so that children are processed in split order.
            stack.extend(children.into_iter().rev());
        }

        Ok((output, stats))
    }

    /// Runs the pipeline on every surface of `roots`, concatenating the results.
    pub fn run_all(
        &self,
        roots: impl IntoIterator<Item = Box<dyn Surface>>,
    ) -> Result<(Vec<SharedSurface>, SplitStats), SplitError> {
        let mut output = Vec::new();
        let mut stats = SplitStats::default();

        for root in roots {
            let (emitted, root_stats) = self.run(root)?;
            output.extend(emitted);
            stats += root_stats;
        }

        Ok((output, stats))
    }

    /// Runs the pipeline on every surface of `roots` in parallel.
    ///
    /// The result is the same as [`SplitPipeline::run_all`], in the same order.
    #[cfg(feature = "parallel")]
    pub fn par_run_all(
        &self,
        roots: Vec<Box<dyn Surface>>,
    ) -> Result<(Vec<SharedSurface>, SplitStats), SplitError> {
        let results = roots
            .into_par_iter()
            .map(|root| self.run(root))
            .collect::<Result<Vec<_>, SplitError>>()?;

        let mut output = Vec::new();
        let mut stats = SplitStats::default();
        for (emitted, root_stats) in results {
            output.extend(emitted);
            stats += root_stats;
        }

        Ok((output, stats))
    }
}

/// Is `surface` a polygon, or a motion surface sampling polygons?
fn is_polygon_like(surface: &dyn Surface) -> bool {
    match surface.as_typed_surface() {
        TypedSurface::Polygon(_) | TypedSurface::PointsPolygon(_) => true,
        TypedSurface::Motion(motion) => motion
            .slots()
            .first()
            .is_some_and(|(_, sample)| is_polygon_like(&**sample)),
        TypedSurface::BilinearPatch(_) | TypedSurface::Custom(_) => false,
    }
}
