//! Per-run frame context
//!
//! Everything a frame needs that is not owned by a scene: the global time
//! multiplier, the seeded RNG behind camera shake, and a frame counter. The
//! frame driver owns one context per run and passes it into every update.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::DEFAULT_TIME_SCALE;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Multiplier applied to every elapsed time (slow-mo, fast-forward)
    pub time_scale: f32,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Frames started so far
    pub frame: u64,
}

impl FrameContext {
    pub fn new(seed: u64) -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
        }
    }

    /// Context from settings; without a configured seed one is taken from the clock
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let mut ctx = Self::new(seed);
        ctx.time_scale = settings.time_scale;
        log::info!("Frame context seeded with {seed}, time scale {}", ctx.time_scale);
        ctx
    }

    /// Scaled delta for `elapsed_secs` of wall time
    #[inline]
    pub fn delta(&self, elapsed_secs: f32) -> f32 {
        elapsed_secs * self.time_scale
    }

    /// Start a frame: bump the counter and return the scaled delta
    pub fn begin_frame(&mut self, elapsed_secs: f32) -> f32 {
        self.frame += 1;
        self.delta(elapsed_secs)
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
