mod app;
mod demo;
mod error;
mod gpu;

use winit::event_loop::{ControlFlow, EventLoop};

use app::App;
use demo::{Demo, DemoKind};
use error::ViewerError;

/// Usage: grid-sandbox [sand|life|gray-scott] [seed]
fn main() -> Result<(), ViewerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let kind: DemoKind = args.next().as_deref().unwrap_or("sand").parse()?;
    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>().map_err(|_| ViewerError::InvalidSeed(arg))?,
        None => rand::random(),
    };
    log::info!("Seed: {}", seed);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(Demo::new(kind, seed));
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
