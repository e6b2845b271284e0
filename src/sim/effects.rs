//! Crash burst particles and flash timer
//!
//! Purely visual. Advanced once per rendered frame with the frame's elapsed
//! time, never from the physics tick, so they keep animating while the
//! player is dead and the tick is idle.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Maximum particles alive at once
pub const MAX_PARTICLES: usize = 128;
/// Particles spawned per crash
const BURST_COUNT: usize = 24;

/// A particle for visual effects (screen space, pixels)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Spawn a ring of debris around `center`. Same seed, same burst.
pub fn spawn_crash_burst(particles: &mut Vec<Particle>, center: Vec2, seed: u64) {
    let mut rng = Pcg32::seed_from_u64(seed);
    for i in 0..BURST_COUNT {
        let base = std::f32::consts::TAU * (i as f32 / BURST_COUNT as f32);
        let angle: f32 = base + rng.random_range(-0.2f32..0.2);
        let speed: f32 = rng.random_range(120.0..360.0);
        particles.push(Particle {
            pos: center,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: rng.random_range(0.6..1.0),
            size: rng.random_range(3.0..7.0),
        });
    }

    // Drop the oldest if over budget
    if particles.len() > MAX_PARTICLES {
        let excess = particles.len() - MAX_PARTICLES;
        particles.drain(..excess);
    }
}

/// Advance particles and the crash flash by `dt` seconds
pub fn update_effects(state: &mut GameState, dt: f32) {
    state.flash = (state.flash - dt).max(0.0);

    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.96;
        particle.life -= dt * 1.5;
        particle.size *= 0.99;
    }
    state.particles.retain(|p| p.life > 0.0);
}
