//! Discrete grid simulations: falling sand, Gray-Scott reaction-diffusion and
//! Game of Life, behind one tick/render scheduler.
//!
//! ```
//! use grid_sandbox::render::{PixelBuffer, SandPalette};
//! use grid_sandbox::simulation::{FallingSand, Particle, Simulation};
//!
//! let mut sim = Simulation::new(FallingSand::new(), 10, 10, 42);
//! sim.paint_cell(5, 0, Particle::Sand);
//! sim.tick();
//! assert_eq!(sim.grid().get(5, 1), Some(Particle::Sand));
//!
//! let mut frame = PixelBuffer::default();
//! sim.render(&SandPalette, &mut frame);
//! ```

pub mod config;
pub mod render;
pub mod simulation;
