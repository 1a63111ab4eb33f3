//! Baseline opacity animation.
//!
//! When enabled, each particle's opacity bounces between
//! [`OpacityAnimation::minimum_value`] and the configured maximum
//! (`particles.opacity.value`). The result is the *baseline* opacity that
//! [`resolve`](crate::state::resolve) merges with any bubble override.
//!
//! ```ignore
//! let mut state = OpacityState::new(&config.particles.opacity, &mut rng);
//! // every frame:
//! state.step(&config.particles.opacity);
//! particle.opacity = state.value();
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::OpacityConfig;

/// Opacity animation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityAnimation {
    pub enable: bool,
    /// Lower bound the opacity turns around at.
    pub minimum_value: f64,
    /// Change per frame is `speed / 100`.
    pub speed: f64,
    /// All particles animate at the same rate when true; otherwise each gets
    /// a random fraction of the speed.
    pub sync: bool,
}

impl Default for OpacityAnimation {
    fn default() -> Self {
        Self { enable: false, minimum_value: 0.0, speed: 2.0, sync: false }
    }
}

/// Per-particle animated opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityState {
    value: f64,
    velocity: f64,
    increasing: bool,
}

impl OpacityState {
    /// Start at the configured maximum, heading down.
    pub fn new<R: Rng + ?Sized>(config: &OpacityConfig, rng: &mut R) -> Self {
        let animation = &config.animation;
        let mut velocity = animation.speed / 100.0;
        if !animation.sync {
            velocity *= rng.gen::<f64>();
        }
        Self { value: config.value, velocity, increasing: false }
    }

    /// Current baseline opacity.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Advance one frame. Does nothing while the animation is disabled.
    pub fn step(&mut self, config: &OpacityConfig) {
        let animation = &config.animation;
        if !animation.enable {
            return;
        }

        if self.increasing {
            if self.value >= config.value {
                self.increasing = false;
            }
            self.value += self.velocity;
        } else {
            if self.value <= animation.minimum_value {
                self.increasing = true;
            }
            self.value -= self.velocity;
        }

        if self.value < 0.0 {
            self.value = 0.0;
        }
    }
}
