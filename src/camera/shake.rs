//! Procedural camera shake
//!
//! A shake runs for a fixed duration. Its strength falls off with the square
//! of progress, so it fades out faster toward the end. Each step yields a
//! fresh random offset which the camera adds onto its position.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shake lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ShakeState {
    #[default]
    Idle,
    Shaking {
        /// Peak offset length per axis
        magnitude: f32,
        /// Total run time (seconds)
        duration: f32,
        /// Time spent shaking so far (seconds)
        timer: f32,
    },
}

/// Shake generator owned by a camera
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shake {
    state: ShakeState,
    /// Offset produced by the most recent step
    offset: Vec2,
}

impl Shake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a shake
    ///
    /// A duration that is not strictly positive (NaN included) is ignored:
    /// progress would be undefined.
    pub fn start(&mut self, duration: f32, magnitude: f32) {
        if duration.is_nan() || duration <= 0.0 {
            log::debug!("Ignoring shake with invalid duration {duration}");
            return;
        }
        self.state = ShakeState::Shaking {
            magnitude,
            duration,
            timer: 0.0,
        };
    }

    /// Stop immediately
    pub fn stop(&mut self) {
        self.state = ShakeState::Idle;
    }

    pub fn state(&self) -> ShakeState {
        self.state
    }

    pub fn is_shaking(&self) -> bool {
        matches!(self.state, ShakeState::Shaking { .. })
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Decayed magnitude at a given progress in [0, 1]
    #[inline]
    pub fn decayed_magnitude(magnitude: f32, progress: f32) -> f32 {
        magnitude * (1.0 - progress * progress)
    }

    /// Advance by `dt` seconds and return the offset to add to the camera
    ///
    /// Returns `None` while idle. The final step (the one that reaches the
    /// duration) still returns an offset, which is zero since the magnitude
    /// has fully decayed.
    pub fn step<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<Vec2> {
        let ShakeState::Shaking {
            magnitude,
            duration,
            timer,
        } = self.state
        else {
            return None;
        };

        let mut timer = timer + dt;
        if timer >= duration {
            timer = duration;
            self.state = ShakeState::Idle;
            log::debug!("Shake finished after {duration}s");
        } else {
            self.state = ShakeState::Shaking {
                magnitude,
                duration,
                timer,
            };
        }

        let progress = timer / duration;
        let strength = Self::decayed_magnitude(magnitude, progress);
        self.offset = Vec2::new(
            rng.random_range(-1.0f32..=1.0),
            rng.random_range(-1.0f32..=1.0),
        ) * strength;

        Some(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_idle_yields_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shake = Shake::new();
        assert!(!shake.is_shaking());
        assert_eq!(shake.step(0.1, &mut rng), None);
    }

    #[test]
    fn test_shake_runs_for_duration() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut shake = Shake::new();
        shake.start(1.0, 10.0);
        assert!(shake.is_shaking());

        for _ in 0..3 {
            let offset = shake.step(0.25, &mut rng).unwrap();
            assert!(offset.x.abs() <= 10.0 && offset.y.abs() <= 10.0);
            assert!(shake.is_shaking());
        }

        let last = shake.step(0.25, &mut rng).unwrap();
        assert!(!shake.is_shaking());
        assert_eq!(last, Vec2::ZERO);
        assert_eq!(shake.step(0.25, &mut rng), None);
    }

    #[test]
    fn test_decay_curve() {
        assert_eq!(Shake::decayed_magnitude(10.0, 0.0), 10.0);
        assert_eq!(Shake::decayed_magnitude(10.0, 0.5), 7.5);
        assert_eq!(Shake::decayed_magnitude(10.0, 1.0), 0.0);
    }

    #[test]
    fn test_offset_bounded_by_decayed_magnitude() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut shake = Shake::new();
        shake.start(1.0, 10.0);
        let offset = shake.step(0.5, &mut rng).unwrap();
        assert!(offset.x.abs() <= 7.5 && offset.y.abs() <= 7.5);
    }

    #[test]
    fn test_zero_duration_ignored() {
        let mut shake = Shake::new();
        shake.start(0.0, 10.0);
        assert!(!shake.is_shaking());
    }

    #[test]
    fn test_nan_duration_ignored() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut shake = Shake::new();
        shake.start(f32::NAN, 10.0);
        assert!(!shake.is_shaking());
        assert_eq!(shake.step(0.1, &mut rng), None);
    }

    #[test]
    fn test_restart_resets_timer() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut shake = Shake::new();
        shake.start(1.0, 10.0);
        shake.step(0.75, &mut rng);
        shake.start(1.0, 4.0);
        assert_eq!(
            shake.state(),
            ShakeState::Shaking {
                magnitude: 4.0,
                duration: 1.0,
                timer: 0.0
            }
        );
    }
}
