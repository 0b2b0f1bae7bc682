use super::grid::Grid;

/// How reads past the grid edge resolve
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgePolicy<C> {
    /// Use the nearest in-bounds cell
    Clamp,
    /// Toroidal wrap-around
    Wrap,
    /// Everything outside the grid reads as this value
    Solid(C),
}

impl<C: Copy + Default> Grid<C> {
    /// Read `(x, y)`, resolving out-of-bounds coordinates with `edge`.
    ///
    /// `Clamp` and `Wrap` on a zero-sized grid read as `C::default()`.
    #[inline]
    pub fn sample(&self, x: i64, y: i64, edge: EdgePolicy<C>) -> C {
        if let Some(cell) = self.get(x, y) {
            return cell;
        }
        let (w, h) = (self.width() as i64, self.height() as i64);
        match edge {
            EdgePolicy::Solid(value) => value,
            _ if self.is_empty() => C::default(),
            EdgePolicy::Clamp => self.cells()[(y.clamp(0, h - 1) * w + x.clamp(0, w - 1)) as usize],
            EdgePolicy::Wrap => self.cells()[(y.rem_euclid(h) * w + x.rem_euclid(w)) as usize],
        }
    }
}

/// Fixed neighbor offset lists
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighborhood {
    /// 4 orthogonal neighbors
    VonNeumann,
    /// 8 surrounding neighbors
    Moore,
}

const VON_NEUMANN: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

const MOORE: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Neighborhood {
    pub fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Neighborhood::VonNeumann => &VON_NEUMANN,
            Neighborhood::Moore => &MOORE,
        }
    }

    /// Count neighbors of `(x, y)` matching `pred`
    pub fn count<C: Copy + Default>(
        self,
        grid: &Grid<C>,
        x: i64,
        y: i64,
        edge: EdgePolicy<C>,
        pred: impl Fn(C) -> bool,
    ) -> usize {
        self.offsets()
            .iter()
            .filter(|(dx, dy)| pred(grid.sample(x + dx, y + dy, edge)))
            .count()
    }
}

/// Weighted 3x3 stencil, e.g. a discrete Laplacian
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stencil {
    /// (dx, dy, weight)
    pub taps: [(i64, i64, f32); 9],
}

/// Orthogonal 0.2, diagonal 0.05, centre -1. Weights sum to zero.
pub const LAPLACIAN_3X3: Stencil = Stencil {
    #[rustfmt::skip]
    taps: [
        (-1, -1, 0.05), (0, -1, 0.2), (1, -1, 0.05),
        (-1,  0, 0.2),  (0,  0, -1.0), (1,  0, 0.2),
        (-1,  1, 0.05), (0,  1, 0.2), (1,  1, 0.05),
    ],
};

impl Stencil {
    pub fn weight_sum(&self) -> f32 {
        self.taps.iter().map(|&(_, _, w)| w).sum()
    }

    /// Weighted sum of `channel` over the stencil centred on `(x, y)`
    #[inline]
    pub fn apply<C: Copy + Default>(
        &self,
        grid: &Grid<C>,
        x: i64,
        y: i64,
        edge: EdgePolicy<C>,
        channel: impl Fn(C) -> f32,
    ) -> f32 {
        self.taps
            .iter()
            .map(|&(dx, dy, w)| w * channel(grid.sample(x + dx, y + dy, edge)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laplacian_weights_sum_to_zero() {
        assert!(
            LAPLACIAN_3X3.weight_sum().abs() < 1e-6,
            "Laplacian weights should sum to 0, got {}",
            LAPLACIAN_3X3.weight_sum()
        );
    }

    #[test]
    fn test_laplacian_of_constant_field_is_zero() {
        let grid = Grid::filled(5, 5, 0.7f32);
        let lap = LAPLACIAN_3X3.apply(&grid, 2, 2, EdgePolicy::Clamp, |v| v);
        assert!(lap.abs() < 1e-6);
    }

    #[test]
    fn test_edge_policies() {
        let mut grid: Grid<u8> = Grid::new(3, 2);
        grid.set(2, 1, 5);
        grid.set(0, 0, 1);

        assert_eq!(grid.sample(3, 1, EdgePolicy::Clamp), 5);
        assert_eq!(grid.sample(-1, -1, EdgePolicy::Wrap), 5);
        assert_eq!(grid.sample(3, 2, EdgePolicy::Wrap), 1);
        assert_eq!(grid.sample(-1, 0, EdgePolicy::Solid(9)), 9);
        assert_eq!(grid.sample(0, 0, EdgePolicy::Solid(9)), 1);
    }

    #[test]
    fn test_neighbor_counts() {
        let grid: Grid<bool> = Grid::filled(3, 3, true);
        let solid = EdgePolicy::Solid(false);
        assert_eq!(Neighborhood::Moore.count(&grid, 1, 1, solid, |c| c), 8);
        assert_eq!(Neighborhood::Moore.count(&grid, 0, 0, solid, |c| c), 3);
        assert_eq!(Neighborhood::VonNeumann.count(&grid, 0, 0, solid, |c| c), 2);
        assert_eq!(Neighborhood::Moore.count(&grid, 0, 0, EdgePolicy::Wrap, |c| c), 8);
    }
}
