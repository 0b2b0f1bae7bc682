use rand::Rng;

use super::grid::Grid;
use super::kernel::{Buffering, Kernel};
use super::neighborhood::{EdgePolicy, Neighborhood};
use crate::config::LIFE_FILL_PROBABILITY;

/// Outer-totalistic birth/survival rule over the Moore neighborhood.
///
/// Bit `n` of `birth` (`survive`) is set when a dead (live) cell with `n`
/// live neighbors is alive next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeRule {
    pub birth: u16,
    pub survive: u16,
}

impl LifeRule {
    pub fn new(birth: &[u8], survive: &[u8]) -> Self {
        let mask = |counts: &[u8]| counts.iter().filter(|&&n| n <= 8).fold(0u16, |m, &n| m | 1 << n);
        Self {
            birth: mask(birth),
            survive: mask(survive),
        }
    }

    /// B3/S23
    pub fn conway() -> Self {
        Self::new(&[3], &[2, 3])
    }

    /// B36/S23
    pub fn highlife() -> Self {
        Self::new(&[3, 6], &[2, 3])
    }

    #[inline]
    pub fn next(&self, alive: bool, neighbors: usize) -> bool {
        let mask = if alive { self.survive } else { self.birth };
        neighbors <= 8 && mask & (1 << neighbors) != 0
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        Self::conway()
    }
}

/// Game of Life. Out-of-bounds neighbors count as dead unless `edge` wraps.
#[derive(Clone, Debug)]
pub struct Life {
    pub rule: LifeRule,
    pub edge: EdgePolicy<bool>,
}

impl Life {
    pub fn new(rule: LifeRule, edge: EdgePolicy<bool>) -> Self {
        Self { rule, edge }
    }

    /// Toroidal world
    pub fn wrapping(rule: LifeRule) -> Self {
        Self::new(rule, EdgePolicy::Wrap)
    }
}

impl Default for Life {
    fn default() -> Self {
        Self::new(LifeRule::conway(), EdgePolicy::Solid(false))
    }
}

impl Kernel for Life {
    type Cell = bool;

    const BUFFERING: Buffering = Buffering::Double;

    fn step<R: Rng + ?Sized>(&mut self, grid: &mut Grid<bool>, scratch: &mut Grid<bool>, _rng: &mut R) {
        let w = grid.width();
        for (i, next) in scratch.cells_mut().iter_mut().enumerate() {
            let (x, y) = ((i % w) as i64, (i / w) as i64);
            let neighbors = Neighborhood::Moore.count(grid, x, y, self.edge, |alive| alive);
            *next = self.rule.next(grid.cells()[i], neighbors);
        }
    }

    fn seed<R: Rng + ?Sized>(&self, grid: &mut Grid<bool>, rng: &mut R) {
        for cell in grid.cells_mut() {
            *cell = rng.gen_bool(LIFE_FILL_PROBABILITY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn run(kernel: &mut Life, grid: &mut Grid<bool>, ticks: usize) {
        let mut scratch = Grid::new(grid.width(), grid.height());
        let mut rng = StepRng::new(0, 0);
        for _ in 0..ticks {
            kernel.step(grid, &mut scratch, &mut rng);
            std::mem::swap(grid, &mut scratch);
        }
    }

    fn with_cells(width: usize, height: usize, alive: &[(i64, i64)]) -> Grid<bool> {
        let mut grid = Grid::new(width, height);
        for &(x, y) in alive {
            grid.set(x, y, true);
        }
        grid
    }

    fn alive(grid: &Grid<bool>) -> Vec<(usize, usize)> {
        (0..grid.len())
            .filter(|&i| grid.cells()[i])
            .map(|i| grid.coords(i))
            .collect()
    }

    #[test]
    fn test_conway_rule_table() {
        let rule = LifeRule::conway();
        assert!(rule.next(false, 3));
        assert!(!rule.next(false, 2));
        assert!(rule.next(true, 2));
        assert!(rule.next(true, 3));
        assert!(!rule.next(true, 1));
        assert!(!rule.next(true, 4));
        assert!(!rule.next(true, 9));
    }

    #[test]
    fn test_highlife_births_on_six() {
        assert!(LifeRule::highlife().next(false, 6));
        assert!(!LifeRule::conway().next(false, 6));
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = with_cells(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let start = grid.clone();
        let mut life = Life::default();

        run(&mut life, &mut grid, 1);
        assert_eq!(alive(&grid), vec![(2, 1), (2, 2), (2, 3)]);

        run(&mut life, &mut grid, 1);
        assert_eq!(grid, start);
    }

    #[test]
    fn test_block_is_still_life() {
        let mut grid = with_cells(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let start = grid.clone();
        run(&mut Life::default(), &mut grid, 5);
        assert_eq!(grid, start);
    }

    #[test]
    fn test_block_in_corner_is_stable_with_dead_edges() {
        let mut grid = with_cells(4, 4, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let start = grid.clone();
        run(&mut Life::default(), &mut grid, 3);
        assert_eq!(grid, start);
    }

    #[test]
    fn test_glider_wraps_on_torus() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut grid = with_cells(8, 8, &glider);
        let start = grid.clone();
        // A glider translates by (1, 1) every 4 generations, so 32 brings it home
        run(&mut Life::wrapping(LifeRule::conway()), &mut grid, 32);
        assert_eq!(grid, start);
    }

    #[test]
    fn test_glider_becomes_block_in_dead_corner() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut grid = with_cells(8, 8, &glider);
        run(&mut Life::default(), &mut grid, 40);
        assert_eq!(alive(&grid), vec![(6, 6), (7, 6), (6, 7), (7, 7)]);
    }

    #[test]
    fn test_seed_fills_by_probability() {
        let mut grid = Grid::new(10, 10);
        Life::default().seed(&mut grid, &mut StepRng::new(0, 0));
        assert_eq!(grid.count(|&c| c), 100);

        Life::default().seed(&mut grid, &mut StepRng::new(u64::MAX, 0));
        assert_eq!(grid.count(|&c| c), 0);
    }
}
