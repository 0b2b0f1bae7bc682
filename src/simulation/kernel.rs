use rand::Rng;

use super::grid::Grid;

/// Buffering discipline a kernel needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Buffering {
    /// Cells are moved within one grid during the scan. The scratch grid is
    /// left alone and no swap happens.
    InPlace,
    /// Every new cell depends on old neighbor values, so the next state is
    /// written to the scratch grid and the two are swapped after the pass.
    Double,
}

/// One discrete update rule over a whole grid
pub trait Kernel {
    type Cell: Copy + Default;

    const BUFFERING: Buffering;

    /// Advance one tick.
    ///
    /// `InPlace` kernels mutate `grid`. `Double` kernels read `grid` and
    /// overwrite every cell of `scratch`, which has the same dimensions.
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid<Self::Cell>,
        scratch: &mut Grid<Self::Cell>,
        rng: &mut R,
    );

    /// Fill `grid` with the kernel's starting state
    fn seed<R: Rng + ?Sized>(&self, grid: &mut Grid<Self::Cell>, _rng: &mut R) {
        grid.clear();
    }
}
