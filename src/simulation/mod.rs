mod cell;
mod grid;
mod gray_scott;
mod kernel;
mod life;
mod neighborhood;
mod sand;
mod scheduler;

pub use cell::{saturate, Concentration, Particle};
pub use gray_scott::{seed_disc, GrayScott, GrayScottParams, Preset};
pub use grid::Grid;
pub use kernel::{Buffering, Kernel};
pub use life::{Life, LifeRule};
pub use neighborhood::{EdgePolicy, Neighborhood, Stencil, LAPLACIAN_3X3};
pub use sand::FallingSand;
pub use scheduler::{Brush, Footprint, Patch, Simulation};
