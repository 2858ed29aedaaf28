// anim/mod.rs
//
// Owned animation-task list. Each task holds its own elapsed time,
// duration and easing; the game advances the list once per tick and
// removes finished tasks. Level unload clears the list, so no task can
// outlive the screen that spawned it.

pub mod easing;

use crate::stacks::StackRuntime;
use easing::{ease, Easing};

/// Eased glide of a released stack to its discrete target row.
/// Completion commits the row selection.
#[derive(Debug, Clone)]
pub struct SettleAnim {
    /// Index of the stack being settled.
    pub stack: usize,
    from_y: f32,
    to_y: f32,
    /// Row selection to commit when the glide lands.
    pub target_index: usize,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl SettleAnim {
    pub fn new(stack: usize, from_y: f32, to_y: f32, target_index: usize, duration: f32) -> Self {
        Self {
            stack,
            from_y,
            to_y,
            target_index,
            elapsed: 0.0,
            duration,
            easing: Easing::QuadOut,
        }
    }

    /// Advance and return the current vertical position.
    fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        if self.done() {
            // Land exactly on target: no residual interpolation error.
            self.to_y
        } else {
            ease(self.from_y, self.to_y, self.elapsed / self.duration, self.easing)
        }
    }

    fn done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Staggered pop-in of one star on the win dialog.
#[derive(Debug, Clone)]
pub struct StarRevealAnim {
    /// 1-based star ordinal, for the host's display.
    pub ordinal: u32,
    delay: f32,
    elapsed: f32,
}

/// All animation tasks for the current screen.
#[derive(Debug, Default)]
pub struct AnimationState {
    settles: Vec<SettleAnim>,
    star_reveals: Vec<StarRevealAnim>,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_settle(&mut self, anim: SettleAnim) {
        // A stack settles toward one target at a time
        self.settles.retain(|a| a.stack != anim.stack);
        self.settles.push(anim);
    }

    /// Drop any settle in flight for `stack` (re-grabbed mid-glide).
    pub fn cancel_settle(&mut self, stack: usize) {
        self.settles.retain(|a| a.stack != stack);
    }

    pub fn has_settles(&self) -> bool {
        !self.settles.is_empty()
    }

    /// Advance settle glides, writing positions into `stacks`.
    /// Returns `(stack, target_index)` for each glide that landed this tick.
    pub fn tick_settles(&mut self, dt: f32, stacks: &mut [StackRuntime]) -> Vec<(usize, usize)> {
        let mut landed = Vec::new();
        self.settles.retain_mut(|anim| {
            let y = anim.tick(dt);
            if let Some(stack) = stacks.get_mut(anim.stack) {
                stack.pos.y = y;
            }
            if anim.done() {
                landed.push((anim.stack, anim.target_index));
                false
            } else {
                true
            }
        });
        landed
    }

    /// Queue one reveal task per earned star, `stagger` seconds apart.
    pub fn add_star_reveals(&mut self, count: u32, stagger: f32) {
        for i in 0..count {
            self.star_reveals.push(StarRevealAnim {
                ordinal: i + 1,
                delay: stagger * (i + 1) as f32,
                elapsed: 0.0,
            });
        }
    }

    /// Advance star reveals; returns ordinals whose delay elapsed this tick.
    pub fn tick_star_reveals(&mut self, dt: f32) -> Vec<u32> {
        let mut revealed = Vec::new();
        self.star_reveals.retain_mut(|anim| {
            anim.elapsed += dt;
            if anim.elapsed >= anim.delay {
                revealed.push(anim.ordinal);
                false
            } else {
                true
            }
        });
        revealed
    }

    pub fn clear(&mut self) {
        self.settles.clear();
        self.star_reveals.clear();
    }
}
