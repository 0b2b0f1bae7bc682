use super::surface::Rgba;
use crate::config::MIN_DENOMINATOR;
use crate::simulation::{saturate, Concentration, Grid, Particle};

/// Maps a cell state to a color
pub trait Palette<C> {
    fn color(&self, cell: C) -> Rgba;
}

impl<C, F: Fn(C) -> Rgba> Palette<C> for F {
    fn color(&self, cell: C) -> Rgba {
        self(cell)
    }
}

/// Near-black backdrop behind empty cells
pub const BACKGROUND: Rgba = Rgba::opaque(13, 13, 20);

#[derive(Clone, Copy, Debug, Default)]
pub struct SandPalette;

impl Palette<Particle> for SandPalette {
    fn color(&self, cell: Particle) -> Rgba {
        match cell {
            Particle::Empty => BACKGROUND,
            Particle::Sand => Rgba::from_hex(0xf0e68c),
            Particle::Water => Rgba::from_hex(0x1e90ff),
            Particle::Stone => Rgba::from_hex(0x808080),
        }
    }
}

/// Live cells black on white
#[derive(Clone, Copy, Debug, Default)]
pub struct LifePalette;

impl Palette<bool> for LifePalette {
    fn color(&self, alive: bool) -> Rgba {
        if alive {
            Rgba::BLACK
        } else {
            Rgba::WHITE
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrayScottPalette {
    /// Dark at rest, cyan through white where B dominates
    Teal,
    /// Teal gradient over B stretched to the observed [lo, hi] range
    Contrast { lo: f32, hi: f32 },
}

impl GrayScottPalette {
    /// Contrast palette fitted to the B range of `grid`
    pub fn contrast_for(grid: &Grid<Concentration>) -> Self {
        let (lo, hi) = grid
            .cells()
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), c| (lo.min(c.b), hi.max(c.b)));
        if lo > hi {
            // Empty grid
            return GrayScottPalette::Contrast { lo: 0.0, hi: 1.0 };
        }
        GrayScottPalette::Contrast { lo, hi }
    }
}

impl Default for GrayScottPalette {
    fn default() -> Self {
        GrayScottPalette::Teal
    }
}

impl Palette<Concentration> for GrayScottPalette {
    fn color(&self, cell: Concentration) -> Rgba {
        let intensity = match *self {
            GrayScottPalette::Teal => 1.0 - saturate(cell.a - cell.b),
            GrayScottPalette::Contrast { lo, hi } => normalize(cell.b, lo, hi),
        };
        teal(intensity)
    }
}

/// `(f³, f, √f)` gradient
fn teal(f: f32) -> Rgba {
    Rgba::from_unit(f * f * f, f, f.sqrt())
}

/// Position of `v` within `[lo, hi]`, clamped to [0, 1]
pub fn normalize(v: f32, lo: f32, hi: f32) -> f32 {
    saturate((v - lo) / (hi - lo).max(MIN_DENOMINATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sand_colors() {
        assert_eq!(SandPalette.color(Particle::Sand), Rgba::opaque(0xf0, 0xe6, 0x8c));
        assert_eq!(SandPalette.color(Particle::Water), Rgba::opaque(0x1e, 0x90, 0xff));
        assert_eq!(SandPalette.color(Particle::Stone), Rgba::opaque(0x80, 0x80, 0x80));
        assert_eq!(SandPalette.color(Particle::Empty), BACKGROUND);
    }

    #[test]
    fn test_teal_endpoints() {
        assert_eq!(GrayScottPalette::Teal.color(Concentration::REST), Rgba::BLACK);
        assert_eq!(GrayScottPalette::Teal.color(Concentration::new(0.0, 1.0)), Rgba::WHITE);
    }

    #[test]
    fn test_normalize_flat_range_is_finite() {
        let v = normalize(0.5, 0.5, 0.5);
        assert!(v.is_finite());
        assert_eq!(v, 0.0);
        assert_eq!(normalize(0.75, 0.5, 1.0), 0.5);
    }

    #[test]
    fn test_contrast_on_uniform_grid() {
        let grid: Grid<Concentration> = Grid::new(6, 6);
        let palette = GrayScottPalette::contrast_for(&grid);
        assert_eq!(palette, GrayScottPalette::Contrast { lo: 0.0, hi: 0.0 });
        assert_eq!(palette.color(Concentration::REST), Rgba::BLACK);
    }

    #[test]
    fn test_contrast_stretches_range() {
        let mut grid: Grid<Concentration> = Grid::new(4, 1);
        grid.set(0, 0, Concentration::new(1.0, 0.2));
        grid.set(1, 0, Concentration::new(1.0, 0.4));
        let palette = GrayScottPalette::contrast_for(&grid);
        assert_eq!(palette, GrayScottPalette::Contrast { lo: 0.0, hi: 0.4 });
        assert_eq!(palette.color(Concentration::new(1.0, 0.4)), Rgba::WHITE);
    }

    #[test]
    fn test_closure_palette() {
        let palette = |alive: bool| if alive { Rgba::WHITE } else { Rgba::BLACK };
        assert_eq!(palette.color(true), Rgba::WHITE);
    }
}
