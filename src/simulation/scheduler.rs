use std::sync::mpsc::{self, Receiver, Sender};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::cell::{saturate, Concentration};
use super::gray_scott::{seed_disc, GrayScott};
use super::grid::Grid;
use super::kernel::{Buffering, Kernel};
use crate::render::{Palette, Surface};

/// Edit to apply to the grid between ticks
pub enum Brush<C> {
    /// Overwrite the cell
    Set(C),
    /// Rewrite the cell from its current value
    Map(Box<dyn Fn(C) -> C + Send>),
}

impl<C: Copy> Brush<C> {
    fn apply(&self, cell: C) -> C {
        match self {
            Brush::Set(value) => *value,
            Brush::Map(f) => f(cell),
        }
    }
}

/// Queued paint operation.
///
/// Hosts that tick on another thread send these through
/// [`Simulation::patch_sender`]; they are applied all at once before the next
/// tick runs, never in the middle of a scan.
pub struct Patch<C> {
    pub x: i64,
    pub y: i64,
    pub footprint: Footprint,
    pub brush: Brush<C>,
}

/// Cells a [`Patch`] covers around its centre
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Footprint {
    /// Just the (clamped) centre cell
    Cell,
    /// `dx² + dy² < radius²`, same as [`Grid::paint_disc`]. Radius 0 is empty.
    Disc(u32),
}

impl<C: Copy> Patch<C> {
    pub fn cell(x: i64, y: i64, value: C) -> Self {
        Self {
            x,
            y,
            footprint: Footprint::Cell,
            brush: Brush::Set(value),
        }
    }

    pub fn region(x: i64, y: i64, radius: u32, value: C) -> Self {
        Self {
            x,
            y,
            footprint: Footprint::Disc(radius),
            brush: Brush::Set(value),
        }
    }

    pub fn apply(&self, grid: &mut Grid<C>) {
        match self.footprint {
            Footprint::Cell => grid.paint_cell(self.x, self.y, |c| self.brush.apply(c)),
            Footprint::Disc(radius) => grid.paint_disc(self.x, self.y, radius, |c| self.brush.apply(c)),
        }
    }
}

/// Grid, kernel and tick bookkeeping for one simulation instance.
///
/// `front` always holds the latest state. Double-buffered kernels write into
/// `back`, which is swapped to the front after the pass.
pub struct Simulation<K: Kernel, R = StdRng> {
    kernel: K,
    front: Grid<K::Cell>,
    back: Grid<K::Cell>,
    rng: R,
    paused: bool,
    ticks_per_frame: u32,
    tick_count: u64,
    patch_tx: Sender<Patch<K::Cell>>,
    patch_rx: Receiver<Patch<K::Cell>>,
}

impl<K: Kernel> Simulation<K, StdRng> {
    /// Create a simulation with a seeded RNG and the kernel's starting state
    pub fn new(kernel: K, width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(kernel, width, height, StdRng::seed_from_u64(seed))
    }
}

impl<K: Kernel, R: Rng> Simulation<K, R> {
    pub fn with_rng(kernel: K, width: usize, height: usize, rng: R) -> Self {
        let (patch_tx, patch_rx) = mpsc::channel();
        let mut sim = Self {
            kernel,
            front: Grid::new(width, height),
            back: Grid::new(width, height),
            rng,
            paused: false,
            ticks_per_frame: 1,
            tick_count: 0,
            patch_tx,
            patch_rx,
        };
        sim.reset();
        sim
    }

    /// Advance one tick, regardless of the pause flag
    pub fn tick(&mut self) {
        self.apply_patches();
        self.kernel.step(&mut self.front, &mut self.back, &mut self.rng);
        if K::BUFFERING == Buffering::Double {
            std::mem::swap(&mut self.front, &mut self.back);
        }
        self.tick_count += 1;
        log::trace!("tick {}", self.tick_count);
    }

    /// Run `ticks_per_frame` ticks unless paused. Returns how many ran.
    pub fn advance_frame(&mut self) -> u32 {
        if self.paused {
            // Queued paint still shows up while paused
            self.apply_patches();
            return 0;
        }
        for _ in 0..self.ticks_per_frame {
            self.tick();
        }
        self.ticks_per_frame
    }

    /// Draw the latest state. Does not touch simulation state.
    pub fn render<P, S>(&self, palette: &P, surface: &mut S)
    where
        P: Palette<K::Cell> + ?Sized,
        S: Surface + ?Sized,
    {
        let grid = &self.front;
        surface.blit(grid.width(), grid.height(), &|x, y| {
            palette.color(grid.cells()[y * grid.width() + x])
        });
    }

    /// Reinitialise to the kernel's starting state
    pub fn reset(&mut self) {
        self.drain_patches();
        self.kernel.seed(&mut self.front, &mut self.rng);
        self.back.copy_from(&self.front);
        self.tick_count = 0;
        log::debug!("reset {}x{} grid", self.front.width(), self.front.height());
    }

    /// Set every cell to the default state
    pub fn clear(&mut self) {
        self.drain_patches();
        self.front.clear();
        self.back.clear();
        self.tick_count = 0;
        log::debug!("cleared {}x{} grid", self.front.width(), self.front.height());
    }

    /// Reallocate both buffers and reseed
    pub fn resize(&mut self, width: usize, height: usize) {
        self.front.resize(width, height);
        self.back.resize(width, height);
        log::debug!("resized grid to {}x{}", width, height);
        self.reset();
    }

    pub fn paint_cell(&mut self, x: i64, y: i64, value: K::Cell) {
        Patch::cell(x, y, value).apply(&mut self.front);
    }

    pub fn paint_region(&mut self, x: i64, y: i64, radius: u32, value: K::Cell) {
        Patch::region(x, y, radius, value).apply(&mut self.front);
    }

    /// Sender for paint operations applied at the start of the next tick
    pub fn patch_sender(&self) -> Sender<Patch<K::Cell>> {
        self.patch_tx.clone()
    }

    fn apply_patches(&mut self) {
        while let Ok(patch) = self.patch_rx.try_recv() {
            patch.apply(&mut self.front);
        }
    }

    fn drain_patches(&mut self) {
        while self.patch_rx.try_recv().is_ok() {}
    }

    pub fn grid(&self) -> &Grid<K::Cell> {
        &self.front
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Parameters may change between ticks
    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame
    }

    pub fn set_ticks_per_frame(&mut self, ticks: u32) {
        self.ticks_per_frame = ticks;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl<R: Rng> Simulation<GrayScott, R> {
    /// Set B to `concentration` over a disc around `(x, y)`
    pub fn seed_region(&mut self, x: i64, y: i64, radius: u32, concentration: f32) {
        seed_disc(&mut self.front, x, y, radius, concentration);
    }
}

impl Patch<Concentration> {
    /// Queued form of [`Simulation::seed_region`]
    pub fn seed(x: i64, y: i64, radius: u32, concentration: f32) -> Self {
        let b = saturate(concentration);
        Self {
            x,
            y,
            footprint: Footprint::Disc(radius),
            brush: Brush::Map(Box::new(move |c| Concentration { b, ..c })),
        }
    }
}
