//! Render sink contract: what a renderer receives once per executed tick

use crate::particle::{GlyphInstance, Particle};
use glyphflow_core::{Color, Surface};

/// Everything a sink needs to paint one frame.
///
/// The sink first covers the whole surface with the background at
/// `fade_alpha` opacity (leaving fading trails), then draws each glyph at its
/// position in the color given by its hue and alpha.
pub struct FrameView<'a> {
    pub surface: Surface,
    pub fade_alpha: f32,
    pub particles: &'a [Particle],
    /// Same particles packed for instanced drawing
    pub instances: &'a [GlyphInstance],
    pub tick: u64,
}

impl<'a> FrameView<'a> {
    /// The per-glyph draw tuples `(x, y, character, color)`
    pub fn glyphs(&self) -> impl Iterator<Item = (f32, f32, char, Color)> + 'a {
        let particles: &'a [Particle] = self.particles;
        particles
            .iter()
            .map(|p| (p.position.x, p.position.y, p.character(), p.color()))
    }

    /// Background fill painted before the glyphs
    pub fn fade_color(&self) -> Color {
        Color::new(0.0, 0.0, 0.0, self.fade_alpha)
    }
}

/// A downstream renderer. The engine never draws; it hands frames here.
pub trait RenderSink {
    fn present(&mut self, frame: &FrameView<'_>);
}

/// A sink that ignores every frame
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &FrameView<'_>) {}
}

/// Rasterizes frames into a `columns` x `rows` character grid scaled over
/// the surface. Later glyphs overwrite earlier ones in the same cell.
pub struct GridSink {
    pub columns: usize,
    pub rows: usize,
    cells: Vec<char>,
    /// Number of frames presented
    pub frames: u64,
}

impl GridSink {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![' '; columns * rows],
            frames: 0,
        }
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        if column < self.columns && row < self.rows {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }

    /// The grid as lines of text
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.columns + 1) * self.rows);
        for row in self.cells.chunks(self.columns.max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

impl RenderSink for GridSink {
    fn present(&mut self, frame: &FrameView<'_>) {
        self.cells.fill(' ');
        self.frames += 1;
        if self.columns == 0 || self.rows == 0 || frame.surface.is_degenerate() {
            return;
        }
        let sx = self.columns as f32 / frame.surface.width;
        let sy = self.rows as f32 / frame.surface.height;
        for (x, y, c, _) in frame.glyphs() {
            if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
                continue;
            }
            let column = (x * sx) as usize;
            let row = (y * sy) as usize;
            if column < self.columns && row < self.rows {
                self.cells[row * self.columns + column] = c;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn view<'a>(particles: &'a [Particle], surface: Surface) -> FrameView<'a> {
        FrameView {
            surface,
            fade_alpha: 0.1,
            particles,
            instances: &[],
            tick: 1,
        }
    }

    #[test]
    fn glyphs_carry_color_and_alpha() {
        let particles = [Particle::new('~', Vec2::new(1.0, 2.0), Vec2::ZERO)];
        let frame = view(&particles, Surface::default());
        let glyphs: Vec<_> = frame.glyphs().collect();
        assert_eq!(glyphs.len(), 1);
        let (x, y, c, color) = glyphs[0];
        assert_eq!((x, y, c), (1.0, 2.0, '~'));
        assert!((color.a - particles[0].alpha()).abs() < 1e-6);
        assert!((frame.fade_color().a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn grid_sink_places_glyphs() {
        let particles = [
            Particle::new('a', Vec2::new(0.0, 0.0), Vec2::ZERO),
            Particle::new('z', Vec2::new(95.0, 45.0), Vec2::ZERO),
            Particle::new('!', Vec2::new(-5.0, 10.0), Vec2::ZERO),
        ];
        let mut sink = GridSink::new(10, 5);
        sink.present(&view(&particles, Surface::new(100.0, 50.0)));
        assert_eq!(sink.cell(0, 0), Some('a'));
        assert_eq!(sink.cell(9, 4), Some('z'));
        assert_eq!(sink.frames, 1);
        assert_eq!(sink.to_text().lines().count(), 5);
        assert!(!sink.to_text().contains('!'));
    }

    #[test]
    fn grid_sink_clears_between_frames() {
        let mut sink = GridSink::new(4, 4);
        let first = [Particle::new('x', Vec2::new(10.0, 10.0), Vec2::ZERO)];
        sink.present(&view(&first, Surface::new(40.0, 40.0)));
        assert_eq!(sink.cell(1, 1), Some('x'));
        sink.present(&view(&[], Surface::new(40.0, 40.0)));
        assert_eq!(sink.cell(1, 1), Some(' '));
    }
}
