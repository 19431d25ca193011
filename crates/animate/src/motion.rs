//! Closed-form motions. Every value is recomputed from `t`, never integrated.

use glam::Vec3;
use shoreline_compose::WATER_LEVEL;
use shoreline_scene::FIREFLY_COUNT;
use std::f32::consts::FRAC_PI_2;

/// `base + amplitude * sin(frequency * t + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Wave {
    pub const fn sine(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self {
            base,
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    /// Same wave shifted a quarter turn, i.e. a cosine.
    pub const fn cosine(base: f32, amplitude: f32, frequency: f32) -> Self {
        Self {
            base,
            amplitude,
            frequency,
            phase: FRAC_PI_2,
        }
    }

    pub fn at(&self, t: f32) -> f32 {
        self.base + self.amplitude * (self.frequency * t + self.phase).sin()
    }
}

/// Circular orbit in the ground plane plus an independent vertical bob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second; negative runs clockwise seen from above.
    pub angular_velocity: f32,
    pub phase: f32,
    pub bob: Wave,
}

impl Orbit {
    pub fn angle_at(&self, t: f32) -> f32 {
        self.angular_velocity * t + self.phase
    }

    pub fn position_at(&self, t: f32) -> Vec3 {
        let theta = self.angle_at(t);
        Vec3::new(
            self.radius * theta.cos(),
            self.bob.at(t),
            self.radius * theta.sin(),
        )
    }
}

/// Out-of-sync sway: instance `i` swings `amplitude * sin(frequency * t + i)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Sway {
    pub fn angle_at(&self, t: f32, index: usize) -> f32 {
        self.amplitude * (self.frequency * t + index as f32).sin()
    }
}

/// Water surface bobbing about its resting level.
pub const WATER_BOB: Wave = Wave::sine(WATER_LEVEL, 0.1, 0.5);

pub const FIREFLY_ORBITS: [Orbit; FIREFLY_COUNT] = [
    Orbit {
        radius: 6.0,
        angular_velocity: 0.5,
        phase: 0.0,
        bob: Wave::sine(1.5, 0.5, 2.0),
    },
    Orbit {
        radius: 8.0,
        angular_velocity: -0.3,
        phase: 0.0,
        bob: Wave::sine(2.0, 0.8, 1.5),
    },
    Orbit {
        radius: 7.0,
        angular_velocity: 0.4,
        phase: 0.0,
        bob: Wave::cosine(1.8, 0.6, 1.8),
    },
];

/// Palm lean about the local Z axis; a sideways tilt, not a yaw.
pub const PALM_SWAY: Sway = Sway {
    amplitude: 0.05,
    frequency: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn water_starts_at_rest() {
        assert_eq!(WATER_BOB.at(0.0), WATER_LEVEL);
    }

    #[test]
    fn water_returns_to_rest_after_half_period() {
        let t = PI / WATER_BOB.frequency;
        assert_relative_eq!(WATER_BOB.at(t), WATER_LEVEL, epsilon = 1e-6);
        let peak = WATER_BOB.at(0.5 * t);
        assert_relative_eq!(peak, WATER_LEVEL + 0.1, epsilon = 1e-6);
    }

    #[test]
    fn cosine_wave_starts_at_crest() {
        let w = Wave::cosine(1.8, 0.6, 1.8);
        assert_relative_eq!(w.at(0.0), 2.4, epsilon = 1e-6);
    }

    #[test]
    fn orbits_keep_their_radius() {
        for orbit in FIREFLY_ORBITS {
            for t in [0.0, 0.7, 13.0, 250.5] {
                let p = orbit.position_at(t);
                let r = (p.x * p.x + p.z * p.z).sqrt();
                assert_relative_eq!(r, orbit.radius, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn one_firefly_runs_the_other_way() {
        let reversed = FIREFLY_ORBITS
            .iter()
            .filter(|o| o.angular_velocity < 0.0)
            .count();
        assert_eq!(reversed, 1);
    }

    #[test]
    fn sway_is_phase_shifted_per_index() {
        assert_eq!(PALM_SWAY.angle_at(0.0, 0), 0.0);
        assert_ne!(PALM_SWAY.angle_at(0.0, 1), PALM_SWAY.angle_at(0.0, 2));
        assert!(PALM_SWAY.angle_at(3.3, 1).abs() <= 0.05);
    }
}
