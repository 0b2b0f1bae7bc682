use crate::simulation::Preset;

// ============================================
// Falling Sand
// ============================================

/// Grid dimensions (800x600 canvas at 5px per particle)
pub const SAND_GRID_WIDTH: usize = 160;
pub const SAND_GRID_HEIGHT: usize = 120;

/// Brush radius in cells (disc dx² + dy² < r²)
pub const SAND_BRUSH_RADIUS: u32 = 3;

pub const SAND_TICKS_PER_FRAME: u32 = 1;

// ============================================
// Gray-Scott Reaction-Diffusion
// ============================================

pub const GRAY_SCOTT_GRID_WIDTH: usize = 200;
pub const GRAY_SCOTT_GRID_HEIGHT: usize = 200;

/// Diffusion rates of A and B
pub const GRAY_SCOTT_DA: f32 = 1.0;
pub const GRAY_SCOTT_DB: f32 = 0.5;

pub const GRAY_SCOTT_FEED: f32 = 0.055;
pub const GRAY_SCOTT_KILL: f32 = 0.062;

/// Explicit Euler time step
pub const GRAY_SCOTT_DT: f32 = 1.0;

/// Radius of the B patch placed at the centre on reset
pub const GRAY_SCOTT_SEED_RADIUS: u32 = 20;

/// Radius of the B patch placed by the mouse
pub const GRAY_SCOTT_BRUSH_RADIUS: u32 = 5;

/// Iterations per rendered frame
pub const GRAY_SCOTT_TICKS_PER_FRAME: u32 = 10;

/// Feed/kill regimes. Small changes flip the pattern between spots, worms,
/// mazes and chaos.
pub const GRAY_SCOTT_PRESETS: &[Preset] = &[
    Preset { name: "default", feed: 0.055, kill: 0.062 },
    Preset { name: "soliton", feed: 0.03, kill: 0.062 },
    Preset { name: "worms", feed: 0.058, kill: 0.065 },
    Preset { name: "mazes", feed: 0.029, kill: 0.057 },
    Preset { name: "holes", feed: 0.039, kill: 0.058 },
    Preset { name: "chaos", feed: 0.026, kill: 0.051 },
    Preset { name: "moving-spots", feed: 0.014, kill: 0.047 },
];

// ============================================
// Game of Life
// ============================================

/// 800x600 canvas at 10px per cell
pub const LIFE_GRID_WIDTH: usize = 80;
pub const LIFE_GRID_HEIGHT: usize = 60;

/// Chance a cell starts alive on reset
pub const LIFE_FILL_PROBABILITY: f64 = 0.5;

/// Minimum wall time between generations
pub const LIFE_TICK_INTERVAL_MS: u64 = 100;

// ============================================
// Rendering
// ============================================

/// Floor for normalisation denominators so flat fields never divide by zero
pub const MIN_DENOMINATOR: f32 = 1e-6;

/// Upper bound for the ticks-per-frame control
pub const MAX_TICKS_PER_FRAME: u32 = 64;

/// Initial window size in logical pixels
pub const WINDOW_SIZE: (u32, u32) = (800, 600);
