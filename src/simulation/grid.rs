/// Flat row-major grid of cells.
///
/// Cell `(x, y)` lives at `y * width + x`. Coordinates are signed so callers
/// can probe past the edges; anything outside `0..width` x `0..height` reads
/// as `None` and ignores writes.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<C> {
    width: usize,
    height: usize,
    cells: Vec<C>,
}

impl<C: Copy + Default> Grid<C> {
    /// Create a grid with every cell set to `C::default()`
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, C::default())
    }

    /// Reallocate to new dimensions, resetting every cell to the default
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, C::default());
    }

    /// Reset every cell to the default
    pub fn clear(&mut self) {
        self.fill(C::default());
    }
}

impl<C: Copy> Grid<C> {
    /// Create a grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: C) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Flat index of `(x, y)`, or `None` outside the grid
    #[inline]
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Coordinates of a flat index
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<C> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write a cell. Returns false (and does nothing) outside the grid.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, value: C) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, value: C) {
        self.cells.fill(value);
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    /// Number of cells matching `pred`
    pub fn count(&self, pred: impl Fn(&C) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(c)).count()
    }

    /// Copy `other` into `self`, reallocating if the dimensions differ
    pub fn copy_from(&mut self, other: &Grid<C>) {
        self.width = other.width;
        self.height = other.height;
        self.cells.clear();
        self.cells.extend_from_slice(&other.cells);
    }

    /// Apply `brush` to every cell of the disc `dx² + dy² < radius²` around
    /// `(cx, cy)`.
    ///
    /// The centre is clamped into the grid first; disc cells that still fall
    /// outside are skipped. Radius 0 paints nothing.
    pub fn paint_disc(&mut self, cx: i64, cy: i64, radius: u32, mut brush: impl FnMut(C) -> C) {
        if self.cells.is_empty() {
            return;
        }
        let (w, h) = (self.width as i64, self.height as i64);
        let cx = cx.clamp(0, w - 1);
        let cy = cy.clamp(0, h - 1);
        let r = radius as i64;
        let r_sq = (r as i128) * (r as i128);

        // Only visit the part of the bounding square that lies on the grid
        for y in (cy - r).max(0)..=(cy + r).min(h - 1) {
            let dy = (y - cy) as i128;
            for x in (cx - r).max(0)..=(cx + r).min(w - 1) {
                let dx = (x - cx) as i128;
                if dx * dx + dy * dy >= r_sq {
                    continue;
                }
                let i = y as usize * self.width + x as usize;
                self.cells[i] = brush(self.cells[i]);
            }
        }
    }

    /// Apply `brush` to a single cell, clamping the coordinates into the grid
    pub fn paint_cell(&mut self, x: i64, y: i64, brush: impl FnOnce(C) -> C) {
        if self.cells.is_empty() {
            return;
        }
        let x = x.clamp(0, self.width as i64 - 1);
        let y = y.clamp(0, self.height as i64 - 1);
        let i = y as usize * self.width + x as usize;
        self.cells[i] = brush(self.cells[i]);
    }
}
