//! A session's particles, their drawers, and the shared line color cache.
//!
//! [`Scene`] is the per-container state the renderers need across frames.
//! Motion, bubble computation and pointer tracking stay with the caller:
//! update particles through [`Scene::particles_mut`], pass the current
//! [`Pointer`] and a bubble function to [`Scene::draw`].
//!
//! Spawned particles take their shape from `particles.shape.type`; when the
//! opacity animation is enabled their baseline opacity is driven by the scene.
//!
//! ```ignore
//! let mut scene = Scene::new(DrawConfig::from_json(json)?);
//! scene.spawn(Particle::new(DVec2::new(10.0, 10.0), 4.0).with_color(Rgb::new(255, 255, 255)), &mut rng);
//!
//! // each frame:
//! let stats = scene.draw(&mut canvas, &pointer, |_, _| BubbleOverride::NONE, &mut rng);
//! ```

use rand::Rng;

use crate::animation::OpacityState;
use crate::config::DrawConfig;
use crate::drawer::ParticleDrawer;
use crate::grab::{draw_grab_line, LineColorCache};
use crate::particle::Particle;
use crate::pointer::Pointer;
use crate::state::BubbleOverride;
use crate::surface::Surface;

/// Counts from one [`Scene::draw`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Particles visited.
    pub particles: usize,
    /// Grab lines drawn.
    pub grab_lines: usize,
}

/// One spawned particle with its per-particle render state.
#[derive(Debug, Clone)]
struct Entry {
    particle: Particle,
    drawer: ParticleDrawer,
    opacity: OpacityState,
}

/// Particles plus the state that persists between frames.
#[derive(Debug, Clone)]
pub struct Scene {
    config: DrawConfig,
    particles: Vec<Entry>,
    line_color: LineColorCache,
}

impl Scene {
    pub fn new(config: DrawConfig) -> Self {
        Self { config, particles: Vec::new(), line_color: LineColorCache::new() }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Replace the configuration. The cached line color is re-resolved on
    /// the next grab line; existing particles keep their shapes.
    pub fn set_config(&mut self, config: DrawConfig) {
        self.config = config;
        self.line_color.reset();
    }

    /// Add a particle, creating its drawer and opacity animation. Returns its index.
    ///
    /// The particle's shape is replaced by the configured one; an unknown
    /// shape name leaves it with no shape, so it draws nothing.
    pub fn spawn<R: Rng + ?Sized>(&mut self, mut particle: Particle, rng: &mut R) -> usize {
        particle.shape = self.config.particles.shape.kind();

        let opacity = OpacityState::new(&self.config.particles.opacity, rng);
        if self.config.particles.opacity.animation.enable {
            particle.opacity = opacity.value();
        }

        let drawer = ParticleDrawer::new(&particle, &self.config, rng);
        self.particles.push(Entry { particle, drawer, opacity });
        self.particles.len() - 1
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index).map(|e| &e.particle)
    }

    /// Mutable access for the motion integrator.
    pub fn particles_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut().map(|e| &mut e.particle)
    }

    pub fn line_color(&self) -> &LineColorCache {
        &self.line_color
    }

    /// Draw every particle in insertion order, each followed by its grab line.
    ///
    /// With the opacity animation enabled, each particle's baseline opacity
    /// is stepped once before it is drawn.
    pub fn draw<S, R, B>(&mut self, surface: &mut S, pointer: &Pointer, bubble: B, rng: &mut R) -> FrameStats
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
        B: Fn(usize, &Particle) -> BubbleOverride,
    {
        let opacity_config = &self.config.particles.opacity;
        let mut stats = FrameStats::default();

        for (index, entry) in self.particles.iter_mut().enumerate() {
            if opacity_config.animation.enable {
                entry.opacity.step(opacity_config);
                entry.particle.opacity = entry.opacity.value();
            }

            let particle = &entry.particle;
            let over = bubble(index, particle);
            entry.drawer.draw(surface, particle, &over, &self.config);
            stats.particles += 1;

            if draw_grab_line(surface, particle, pointer, &self.config, &mut self.line_color, rng).is_some() {
                stats.grab_lines += 1;
            }
        }
        stats
    }
}
