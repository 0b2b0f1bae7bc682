use rand::Rng;

use super::cell::{saturate, Concentration};
use super::grid::Grid;
use super::kernel::{Buffering, Kernel};
use super::neighborhood::{EdgePolicy, LAPLACIAN_3X3};
use crate::config::{
    GRAY_SCOTT_DA, GRAY_SCOTT_DB, GRAY_SCOTT_DT, GRAY_SCOTT_FEED, GRAY_SCOTT_KILL,
    GRAY_SCOTT_SEED_RADIUS,
};

/// Gray-Scott parameters. Read once per tick, free to change between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayScottParams {
    /// Diffusion rate of A
    pub da: f32,
    /// Diffusion rate of B
    pub db: f32,
    pub feed: f32,
    pub kill: f32,
    pub dt: f32,
}

impl Default for GrayScottParams {
    fn default() -> Self {
        Self {
            da: GRAY_SCOTT_DA,
            db: GRAY_SCOTT_DB,
            feed: GRAY_SCOTT_FEED,
            kill: GRAY_SCOTT_KILL,
            dt: GRAY_SCOTT_DT,
        }
    }
}

/// Named feed/kill regime
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub feed: f32,
    pub kill: f32,
}

impl GrayScottParams {
    /// Take feed and kill from `preset`, keeping diffusion and dt
    pub fn with_preset(self, preset: &Preset) -> Self {
        Self {
            feed: preset.feed,
            kill: preset.kill,
            ..self
        }
    }
}

/// Explicit-Euler Gray-Scott reaction-diffusion.
///
/// Only interior cells are integrated; the one-cell border is carried over
/// unchanged. Both channels are clamped to [0, 1] after every step.
#[derive(Clone, Debug, Default)]
pub struct GrayScott {
    pub params: GrayScottParams,
}

impl GrayScott {
    pub fn new(params: GrayScottParams) -> Self {
        Self { params }
    }

    /// Next state of one interior cell
    #[inline]
    fn react(&self, grid: &Grid<Concentration>, x: i64, y: i64, cell: Concentration) -> Concentration {
        let GrayScottParams { da, db, feed, kill, dt } = self.params;
        // Interior only, so the edge policy never kicks in
        let edge = EdgePolicy::Clamp;
        let lap_a = LAPLACIAN_3X3.apply(grid, x, y, edge, |c| c.a);
        let lap_b = LAPLACIAN_3X3.apply(grid, x, y, edge, |c| c.b);

        let Concentration { a, b } = cell;
        let abb = a * b * b;

        Concentration {
            a: saturate(a + (da * lap_a - abb + feed * (1.0 - a)) * dt),
            b: saturate(b + (db * lap_b + abb - (kill + feed) * b) * dt),
        }
    }
}

impl Kernel for GrayScott {
    type Cell = Concentration;

    const BUFFERING: Buffering = Buffering::Double;

    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid<Concentration>,
        scratch: &mut Grid<Concentration>,
        _rng: &mut R,
    ) {
        let (w, h) = (grid.width() as i64, grid.height() as i64);
        // Start from the current state so the border survives the swap
        scratch.copy_from(grid);

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = (y * w + x) as usize;
                scratch.cells_mut()[i] = self.react(grid, x, y, grid.cells()[i]);
            }
        }
    }

    fn seed<R: Rng + ?Sized>(&self, grid: &mut Grid<Concentration>, _rng: &mut R) {
        grid.clear();
        let (cx, cy) = (grid.width() as i64 / 2, grid.height() as i64 / 2);
        seed_disc(grid, cx, cy, GRAY_SCOTT_SEED_RADIUS, 1.0);
    }
}

/// Set B to `concentration` over a disc. Repeating it is harmless.
pub fn seed_disc(grid: &mut Grid<Concentration>, x: i64, y: i64, radius: u32, concentration: f32) {
    let b = saturate(concentration);
    grid.paint_disc(x, y, radius, |c| Concentration { b, ..c });
}
