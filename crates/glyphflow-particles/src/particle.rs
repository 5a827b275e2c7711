//! Glyph particles: simulation state, text-to-particle factory and GPU instance data

use crate::rng::ParticleRng;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use glyphflow_core::{Color, Surface};
use std::f32::consts::TAU;

/// Lowest printable ASCII code, mapped to norm 0
pub const PRINTABLE_MIN: u32 = 32;
/// Highest printable ASCII code, mapped to norm 1
pub const PRINTABLE_MAX: u32 = 126;

/// One particle per visible character.
///
/// `character`, `code`, `norm`, `mass` and `hue` are fixed at creation and
/// only readable; the physics models mutate `position` and `velocity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    character: char,
    code: u32,
    norm: f32,
    mass: f32,
    hue: f32,
}

impl Particle {
    pub fn new(character: char, position: Vec2, velocity: Vec2) -> Self {
        let code = character as u32;
        let norm = char_norm(code);
        Self {
            position,
            velocity,
            character,
            code,
            norm,
            mass: 0.5 + (1.0 - norm) * 0.5,
            hue: norm * 360.0,
        }
    }

    /// Create a particle with the initial velocity derived from its code:
    /// speed `norm * 2` at angle `norm * 2pi`.
    pub fn spawn(character: char, position: Vec2) -> Self {
        let mut p = Self::new(character, position, Vec2::ZERO);
        p.velocity = Vec2::from_angle(p.norm * TAU) * (p.norm * 2.0);
        p
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    /// Code mapped from the printable range into [0, 1]
    pub fn norm(&self) -> f32 {
        self.norm
    }

    /// In [0.5, 1.0]; low codes are heavier
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Degrees, for the render sink only
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Opacity used when drawing the glyph
    pub fn alpha(&self) -> f32 {
        0.7 + self.norm * 0.3
    }

    pub fn color(&self) -> Color {
        Color::from_hsla(self.hue, 0.7, 0.6, self.alpha())
    }

    pub fn speed_squared(&self) -> f32 {
        self.velocity.length_squared()
    }
}

/// Map a character code linearly from [32, 126] into [0, 1], clamping codes
/// outside the printable range.
pub fn char_norm(code: u32) -> f32 {
    let span = (PRINTABLE_MAX - PRINTABLE_MIN) as f32;
    ((code as f32 - PRINTABLE_MIN as f32) / span).clamp(0.0, 1.0)
}

/// True for characters that produce a particle (anything that is not
/// whitespace once trimmed)
pub fn is_visible(c: char) -> bool {
    !(c.is_whitespace() || c == '\u{feff}')
}

/// Build the particle sequence for `text`, one particle per visible
/// character in order, placed uniformly at random within `surface`.
///
/// A degenerate surface places every particle at the origin.
pub fn spawn_particles(text: &str, surface: Surface, rng: &mut ParticleRng) -> Vec<Particle> {
    let degenerate = surface.is_degenerate();
    let particles: Vec<Particle> = text
        .chars()
        .filter(|&c| is_visible(c))
        .map(|c| {
            let position = if degenerate {
                Vec2::ZERO
            } else {
                Vec2::new(
                    rng.range(0.0, surface.width),
                    rng.range(0.0, surface.height),
                )
            };
            Particle::spawn(c, position)
        })
        .collect();

    if degenerate && !particles.is_empty() {
        log::warn!(
            "surface {}x{} is degenerate; {} particles placed at the origin",
            surface.width,
            surface.height,
            particles.len()
        );
    }
    particles
}

/// GPU instance data for one glyph. 32 bytes, 16-byte rows.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlyphInstance {
    /// Position, hue and alpha packed into vec4
    pub pos_hue_alpha: [f32; 4], // xy = position, z = hue, w = alpha
    /// Character code point and padding
    pub code: [u32; 4], // x = code point
}

impl GlyphInstance {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            pos_hue_alpha: [p.position.x, p.position.y, p.hue, p.alpha()],
            code: [p.code, 0, 0, 0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_maps_printable_range() {
        assert_eq!(char_norm(32), 0.0);
        assert_eq!(char_norm(126), 1.0);
        assert!((char_norm(79) - 0.5).abs() < 1e-6);
        assert_eq!(char_norm(10), 0.0);
        assert_eq!(char_norm(0x4E2D), 1.0);
    }

    #[test]
    fn mass_and_hue_follow_norm() {
        let bang = Particle::new('!', Vec2::ZERO, Vec2::ZERO);
        assert!(bang.mass() <= 1.0 && bang.mass() > 0.99);
        let tilde = Particle::new('~', Vec2::ZERO, Vec2::ZERO);
        assert_eq!(tilde.mass(), 0.5);
        assert_eq!(tilde.hue(), 360.0);
        assert!((tilde.alpha() - 1.0).abs() < 1e-6);
        let emoji = Particle::new('\u{1F600}', Vec2::ZERO, Vec2::ZERO);
        assert_eq!(emoji.norm(), 1.0);
        assert_eq!(emoji.mass(), 0.5);
    }

    #[test]
    fn spawn_velocity_from_norm() {
        let p = Particle::spawn('~', Vec2::ZERO);
        // norm 1: speed 2 at angle 2pi
        assert!((p.velocity.length() - 2.0).abs() < 1e-5);
        assert!((p.velocity.x - 2.0).abs() < 1e-4);
        assert!(p.velocity.y.abs() < 1e-4);

        let low = Particle::spawn('!', Vec2::ZERO);
        assert!((low.velocity.length() - low.norm() * 2.0).abs() < 1e-5);
    }

    #[test]
    fn factory_skips_whitespace() {
        let mut rng = ParticleRng::new(1);
        let surface = Surface::new(100.0, 50.0);
        let particles = spawn_particles("a b\tc\n\u{feff}d ", surface, &mut rng);
        let chars: String = particles.iter().map(|p| p.character()).collect();
        assert_eq!(chars, "abcd");
        for p in &particles {
            assert!((0.0..100.0).contains(&p.position.x));
            assert!((0.0..50.0).contains(&p.position.y));
        }
    }

    #[test]
    fn factory_empty_text() {
        let mut rng = ParticleRng::new(1);
        assert!(spawn_particles("", Surface::default(), &mut rng).is_empty());
        assert!(spawn_particles("  \n\t ", Surface::default(), &mut rng).is_empty());
    }

    #[test]
    fn factory_degenerate_surface_uses_origin() {
        let mut rng = ParticleRng::new(1);
        let particles = spawn_particles("xyz", Surface::new(0.0, -5.0), &mut rng);
        assert_eq!(particles.len(), 3);
        assert!(particles.iter().all(|p| p.position == Vec2::ZERO));
    }

    #[test]
    fn glyph_instance_layout() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 32);
        assert_eq!(std::mem::align_of::<GlyphInstance>(), 4);
        let p = Particle::new('A', Vec2::new(3.0, 4.0), Vec2::ZERO);
        let inst = GlyphInstance::from_particle(&p);
        assert_eq!(inst.pos_hue_alpha[0], 3.0);
        assert_eq!(inst.code[0], 'A' as u32);
    }
}
