use std::str::FromStr;
use std::time::{Duration, Instant};

use winit::keyboard::KeyCode;

use grid_sandbox::config::{
    GRAY_SCOTT_BRUSH_RADIUS, GRAY_SCOTT_GRID_HEIGHT, GRAY_SCOTT_GRID_WIDTH, GRAY_SCOTT_PRESETS,
    GRAY_SCOTT_TICKS_PER_FRAME, LIFE_GRID_HEIGHT, LIFE_GRID_WIDTH, LIFE_TICK_INTERVAL_MS,
    MAX_TICKS_PER_FRAME, SAND_BRUSH_RADIUS, SAND_GRID_HEIGHT, SAND_GRID_WIDTH,
    SAND_TICKS_PER_FRAME,
};
use grid_sandbox::render::{GrayScottPalette, LifePalette, PixelBuffer, SandPalette};
use grid_sandbox::simulation::{
    EdgePolicy, FallingSand, GrayScott, GrayScottParams, Life, Particle, Simulation,
};

use crate::error::ViewerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoKind {
    Sand,
    Life,
    GrayScott,
}

impl FromStr for DemoKind {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sand" | "falling-sand" => Ok(DemoKind::Sand),
            "life" | "game-of-life" => Ok(DemoKind::Life),
            "gray-scott" | "reaction-diffusion" => Ok(DemoKind::GrayScott),
            other => Err(ViewerError::UnknownDemo(other.to_string())),
        }
    }
}

/// Wall-clock gate between ticks
pub struct Pacer {
    interval: Duration,
    last: Instant,
}

impl Pacer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    fn ready(&mut self) -> bool {
        if self.last.elapsed() >= self.interval {
            self.last = Instant::now();
            true
        } else {
            false
        }
    }
}

/// One running simulation plus its interactive state
pub enum Demo {
    Sand {
        sim: Simulation<FallingSand>,
        tool: Particle,
    },
    Life {
        sim: Simulation<Life>,
        pacer: Pacer,
    },
    GrayScott {
        sim: Simulation<GrayScott>,
        preset: usize,
        contrast: bool,
    },
}

/// Run `$body` against whichever simulation is active
macro_rules! each_sim {
    ($demo:expr, $sim:ident => $body:expr) => {
        match $demo {
            Demo::Sand { sim: $sim, .. } => $body,
            Demo::Life { sim: $sim, .. } => $body,
            Demo::GrayScott { sim: $sim, .. } => $body,
        }
    };
}

impl Demo {
    pub fn new(kind: DemoKind, seed: u64) -> Self {
        match kind {
            DemoKind::Sand => {
                let mut sim = Simulation::new(FallingSand::new(), SAND_GRID_WIDTH, SAND_GRID_HEIGHT, seed);
                sim.set_ticks_per_frame(SAND_TICKS_PER_FRAME);
                Demo::Sand {
                    sim,
                    tool: Particle::Sand,
                }
            }
            DemoKind::Life => Demo::Life {
                sim: Simulation::new(Life::default(), LIFE_GRID_WIDTH, LIFE_GRID_HEIGHT, seed),
                pacer: Pacer::new(Duration::from_millis(LIFE_TICK_INTERVAL_MS)),
            },
            DemoKind::GrayScott => {
                let mut sim = Simulation::new(
                    GrayScott::new(GrayScottParams::default()),
                    GRAY_SCOTT_GRID_WIDTH,
                    GRAY_SCOTT_GRID_HEIGHT,
                    seed,
                );
                sim.set_ticks_per_frame(GRAY_SCOTT_TICKS_PER_FRAME);
                Demo::GrayScott {
                    sim,
                    preset: 0,
                    contrast: false,
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Demo::Sand { .. } => "Falling Sand",
            Demo::Life { .. } => "Game of Life",
            Demo::GrayScott { .. } => "Gray-Scott",
        }
    }

    pub fn grid_size(&self) -> (usize, usize) {
        each_sim!(self, sim => (sim.grid().width(), sim.grid().height()))
    }

    pub fn tick_count(&self) -> u64 {
        each_sim!(self, sim => sim.tick_count())
    }

    pub fn is_paused(&self) -> bool {
        each_sim!(self, sim => sim.is_paused())
    }

    /// Run this frame's ticks. Returns how many ran.
    pub fn advance(&mut self) -> u32 {
        match self {
            Demo::Life { sim, pacer } => {
                if sim.is_paused() || pacer.ready() {
                    sim.advance_frame()
                } else {
                    0
                }
            }
            Demo::Sand { sim, .. } => sim.advance_frame(),
            Demo::GrayScott { sim, .. } => sim.advance_frame(),
        }
    }

    pub fn render(&self, frame: &mut PixelBuffer) {
        match self {
            Demo::Sand { sim, .. } => sim.render(&SandPalette, frame),
            Demo::Life { sim, .. } => sim.render(&LifePalette, frame),
            Demo::GrayScott { sim, contrast, .. } => {
                let palette = if *contrast {
                    GrayScottPalette::contrast_for(sim.grid())
                } else {
                    GrayScottPalette::Teal
                };
                sim.render(&palette, frame);
            }
        }
    }

    /// Mouse interaction at grid cell `(x, y)`. `pressed` is true on the
    /// initial click, false while dragging.
    pub fn paint(&mut self, x: i64, y: i64, pressed: bool) {
        match self {
            Demo::Sand { sim, tool } => sim.paint_region(x, y, SAND_BRUSH_RADIUS, *tool),
            Demo::Life { sim, .. } => {
                if pressed && !sim.grid().is_empty() {
                    let (w, h) = (sim.grid().width() as i64, sim.grid().height() as i64);
                    let (x, y) = (x.clamp(0, w - 1), y.clamp(0, h - 1));
                    if let Some(alive) = sim.grid().get(x, y) {
                        sim.paint_cell(x, y, !alive);
                    }
                }
            }
            Demo::GrayScott { sim, .. } => sim.seed_region(x, y, GRAY_SCOTT_BRUSH_RADIUS, 1.0),
        }
    }

    pub fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => {
                let paused = each_sim!(self, sim => sim.toggle_pause());
                log::info!("{}", if paused { "Paused" } else { "Resumed" });
            }
            KeyCode::KeyN => each_sim!(self, sim => sim.tick()),
            KeyCode::KeyR => {
                each_sim!(self, sim => sim.reset());
                log::info!("Reset");
            }
            KeyCode::KeyC => {
                each_sim!(self, sim => sim.clear());
                log::info!("Cleared");
            }
            KeyCode::Equal | KeyCode::NumpadAdd => self.adjust_speed(1),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.adjust_speed(-1),
            _ => self.handle_demo_key(key_code),
        }
    }

    fn adjust_speed(&mut self, delta: i32) {
        let ticks = each_sim!(self, sim => {
            let ticks = sim.ticks_per_frame().saturating_add_signed(delta).clamp(1, MAX_TICKS_PER_FRAME);
            sim.set_ticks_per_frame(ticks);
            ticks
        });
        log::info!("Ticks per frame: {}", ticks);
    }

    fn handle_demo_key(&mut self, key_code: KeyCode) {
        match self {
            Demo::Sand { tool, .. } => {
                let selected = match key_code {
                    KeyCode::Digit1 => Particle::Sand,
                    KeyCode::Digit2 => Particle::Water,
                    KeyCode::Digit3 => Particle::Stone,
                    KeyCode::Digit4 => Particle::Empty,
                    _ => return,
                };
                *tool = selected;
                log::info!("Tool: {}", selected.name());
            }
            Demo::Life { sim, .. } => {
                if key_code == KeyCode::KeyW {
                    let life = sim.kernel_mut();
                    life.edge = match life.edge {
                        EdgePolicy::Wrap => EdgePolicy::Solid(false),
                        _ => EdgePolicy::Wrap,
                    };
                    log::info!("Edges: {}", if life.edge == EdgePolicy::Wrap { "wrap" } else { "dead" });
                }
            }
            Demo::GrayScott { sim, preset, contrast } => match key_code {
                KeyCode::KeyP => {
                    *preset = (*preset + 1) % GRAY_SCOTT_PRESETS.len();
                    let next = &GRAY_SCOTT_PRESETS[*preset];
                    let kernel = sim.kernel_mut();
                    kernel.params = kernel.params.with_preset(next);
                    log::info!("Preset: {} (feed {:.4}, kill {:.4})", next.name, next.feed, next.kill);
                }
                KeyCode::KeyM => {
                    *contrast = !*contrast;
                    log::info!("Palette: {}", if *contrast { "contrast" } else { "teal" });
                }
                _ => {}
            },
        }
    }

    pub fn controls(&self) -> &'static [&'static str] {
        match self {
            Demo::Sand { .. } => &["1/2/3/4: Sand, water, stone, eraser", "Mouse: Paint"],
            Demo::Life { .. } => &["W: Toggle wrapping edges", "Mouse: Toggle cell"],
            Demo::GrayScott { .. } => &["P: Next preset", "M: Toggle palette", "Mouse: Seed B"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo_names() {
        assert_eq!("sand".parse::<DemoKind>().ok(), Some(DemoKind::Sand));
        assert_eq!("game-of-life".parse::<DemoKind>().ok(), Some(DemoKind::Life));
        assert_eq!("gray-scott".parse::<DemoKind>().ok(), Some(DemoKind::GrayScott));
        assert!(matches!("boids".parse::<DemoKind>(), Err(ViewerError::UnknownDemo(name)) if name == "boids"));
    }

    #[test]
    fn test_sand_tool_selection_and_paint() {
        let mut demo = Demo::new(DemoKind::Sand, 1);
        demo.handle_key(KeyCode::Digit3);
        demo.paint(10, 10, true);
        let Demo::Sand { sim, tool } = &demo else {
            panic!("expected sand demo");
        };
        assert_eq!(*tool, Particle::Stone);
        assert_eq!(sim.grid().get(10, 10), Some(Particle::Stone));
    }

    #[test]
    fn test_life_click_toggles_once() {
        let mut demo = Demo::new(DemoKind::Life, 1);
        demo.handle_key(KeyCode::KeyC);
        demo.paint(4, 4, true);
        demo.paint(4, 4, false);
        let Demo::Life { sim, .. } = &demo else {
            panic!("expected life demo");
        };
        assert_eq!(sim.grid().get(4, 4), Some(true));
    }

    #[test]
    fn test_life_click_on_far_edge_toggles_edge_cell() {
        let mut demo = Demo::new(DemoKind::Life, 1);
        demo.handle_key(KeyCode::KeyC);
        let (w, h) = demo.grid_size();
        let (last_x, last_y) = (w as i64 - 1, h as i64 - 1);

        demo.paint(last_x, last_y, true);
        demo.paint(w as i64, h as i64, true);
        let Demo::Life { sim, .. } = &demo else {
            panic!("expected life demo");
        };
        assert_eq!(sim.grid().get(last_x, last_y), Some(false));
        assert_eq!(sim.grid().count(|&alive| alive), 0);
    }

    #[test]
    fn test_preset_cycle_changes_params() {
        let mut demo = Demo::new(DemoKind::GrayScott, 1);
        demo.handle_key(KeyCode::KeyP);
        let Demo::GrayScott { sim, preset, .. } = &demo else {
            panic!("expected gray-scott demo");
        };
        assert_eq!(*preset, 1);
        assert_eq!(sim.kernel().params.feed, GRAY_SCOTT_PRESETS[1].feed);
        assert_eq!(sim.kernel().params.kill, GRAY_SCOTT_PRESETS[1].kill);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut demo = Demo::new(DemoKind::Sand, 1);
        for _ in 0..5 {
            demo.handle_key(KeyCode::Minus);
        }
        let Demo::Sand { sim, .. } = &demo else {
            panic!("expected sand demo");
        };
        assert_eq!(sim.ticks_per_frame(), 1);
    }

    #[test]
    fn test_paused_demo_does_not_tick() {
        let mut demo = Demo::new(DemoKind::GrayScott, 1);
        demo.handle_key(KeyCode::Space);
        assert!(demo.is_paused());
        assert_eq!(demo.advance(), 0);
        demo.handle_key(KeyCode::KeyN);
        assert_eq!(demo.tick_count(), 1);
    }
}
