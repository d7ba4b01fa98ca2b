//! Single-flight tile animation driven by explicit ticks.

use std::time::Duration;

use tileslide_core::TileId;

use crate::Point;

/// An in-flight tile animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    tile: TileId,
    start: Point,
    target: Point,
    duration: Duration,
    elapsed: Duration,
}

impl Motion {
    /// The animated tile.
    #[must_use]
    pub const fn tile(&self) -> TileId {
        self.tile
    }

    /// The tile's position when the motion started.
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// Where the tile ends up.
    #[must_use]
    pub const fn target(&self) -> Point {
        self.target
    }

    /// Total duration of the motion.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns `elapsed / duration`, unclamped. A zero-length motion is always complete.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32
    }
}

/// What a tick did to the in-flight motion.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum MotionStep {
    /// The tile moved to an intermediate position.
    Progress {
        /// The animated tile.
        tile: TileId,
        /// Its interpolated position.
        position: Point,
    },
    /// The tile reached its target; the scheduler is idle again.
    Finished {
        /// The animated tile.
        tile: TileId,
        /// Its final position, exactly the motion's target.
        position: Point,
    },
}

/// Drives at most one tile animation at a time.
///
/// The scheduler does not own a clock. Each call to [`MotionScheduler::tick`] advances
/// the in-flight motion by the given time delta and reports the sampled position. The
/// tick on which progress reaches 1 reports [`MotionStep::Finished`] and is the only
/// way the scheduler becomes idle again.
#[derive(Debug, Clone, Default)]
pub struct MotionScheduler {
    current: Option<Motion>,
}

impl MotionScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a motion is in flight.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the in-flight motion, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Motion> {
        self.current.as_ref()
    }

    /// Starts moving `tile` from `start` to `target` over `duration`.
    ///
    /// A zero `duration` finishes on the next tick.
    ///
    /// # Panics
    ///
    /// Panics if a motion is already in flight.
    pub fn animate(&mut self, tile: TileId, start: Point, target: Point, duration: Duration) {
        if let Some(current) = &self.current {
            panic!(
                "cannot animate {tile} while {} is still moving",
                current.tile
            );
        }
        self.current = Some(Motion {
            tile,
            start,
            target,
            duration,
            elapsed: Duration::ZERO,
        });
    }

    /// Advances the in-flight motion by `delta`.
    ///
    /// Returns `None` while idle.
    pub fn tick(&mut self, delta: Duration) -> Option<MotionStep> {
        let motion = self.current.as_mut()?;
        motion.elapsed = motion.elapsed.saturating_add(delta);
        let progress = motion.progress();
        if progress >= 1.0 {
            let Motion { tile, target, .. } = self.current.take()?;
            return Some(MotionStep::Finished {
                tile,
                position: target,
            });
        }
        Some(MotionStep::Progress {
            tile: motion.tile,
            position: motion.start.lerp(motion.target, progress),
        })
    }
}
