use rand::Rng;

use super::cell::Particle;
use super::grid::Grid;
use super::kernel::{Buffering, Kernel};
use super::neighborhood::EdgePolicy;

/// The world edge is impassable
const EDGE: EdgePolicy<Particle> = EdgePolicy::Solid(Particle::Stone);

/// Falling-sand automaton.
///
/// Rows are scanned bottom to top so a grain that falls is not seen again
/// further down the same pass. Within a row, cells that already received a
/// particle this tick are skipped, so sideways flow moves water at most one
/// cell per tick.
#[derive(Clone, Debug, Default)]
pub struct FallingSand {
    moved: Vec<bool>,
}

impl FallingSand {
    pub fn new() -> Self {
        Self::default()
    }

    fn update_sand<R: Rng + ?Sized>(&mut self, grid: &mut Grid<Particle>, x: i64, y: i64, rng: &mut R) {
        if self.try_move(grid, (x, y), (x, y + 1), Particle::yields_to_sand) {
            return;
        }
        let dir = bias(rng);
        for dx in [dir, -dir] {
            if self.try_move(grid, (x, y), (x + dx, y + 1), Particle::yields_to_sand) {
                return;
            }
        }
    }

    fn update_water<R: Rng + ?Sized>(&mut self, grid: &mut Grid<Particle>, x: i64, y: i64, rng: &mut R) {
        let is_empty = |p: Particle| p == Particle::Empty;
        if self.try_move(grid, (x, y), (x, y + 1), is_empty) {
            return;
        }
        let dir = bias(rng);
        for dx in [dir, -dir] {
            if self.try_move(grid, (x, y), (x + dx, y), is_empty) {
                return;
            }
        }
    }

    /// Swap `from` and `to` if the cell at `to` passes `accepts`
    fn try_move(
        &mut self,
        grid: &mut Grid<Particle>,
        from: (i64, i64),
        to: (i64, i64),
        accepts: impl Fn(Particle) -> bool,
    ) -> bool {
        if !accepts(grid.sample(to.0, to.1, EDGE)) {
            return false;
        }
        // Out-of-bounds reads as Stone, which nothing accepts
        let (Some(src), Some(dst)) = (grid.index(from.0, from.1), grid.index(to.0, to.1)) else {
            return false;
        };
        grid.cells_mut().swap(src, dst);
        self.moved[dst] = true;
        true
    }
}

/// Random horizontal direction, -1 or +1
#[inline]
fn bias<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    if rng.gen_bool(0.5) {
        -1
    } else {
        1
    }
}

impl Kernel for FallingSand {
    type Cell = Particle;

    const BUFFERING: Buffering = Buffering::InPlace;

    fn step<R: Rng + ?Sized>(&mut self, grid: &mut Grid<Particle>, _scratch: &mut Grid<Particle>, rng: &mut R) {
        let (w, h) = (grid.width() as i64, grid.height() as i64);
        self.moved.clear();
        self.moved.resize(grid.len(), false);

        for y in (0..h).rev() {
            for x in 0..w {
                let i = (y * w + x) as usize;
                let particle = grid.cells()[i];
                if self.moved[i] || !particle.is_mobile() {
                    continue;
                }
                match particle {
                    Particle::Sand => self.update_sand(grid, x, y, rng),
                    Particle::Water => self.update_water(grid, x, y, rng),
                    Particle::Empty | Particle::Stone => {}
                }
            }
        }
    }
}
