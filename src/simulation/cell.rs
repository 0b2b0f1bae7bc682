/// Falling-sand particle state.
///
/// One byte per cell. `Empty` is the default so a fresh grid is open air.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Particle {
    #[default]
    Empty = 0,
    Sand = 1,
    Water = 2,
    /// Immovable. Also what the world edge reads as.
    Stone = 3,
}

impl Particle {
    pub const ALL: [Particle; 4] = [
        Particle::Empty,
        Particle::Sand,
        Particle::Water,
        Particle::Stone,
    ];

    /// Whether the kernel ever moves this particle
    pub fn is_mobile(self) -> bool {
        matches!(self, Particle::Sand | Particle::Water)
    }

    /// Whether a falling sand grain can trade places with this cell
    pub fn yields_to_sand(self) -> bool {
        matches!(self, Particle::Empty | Particle::Water)
    }

    pub fn name(self) -> &'static str {
        match self {
            Particle::Empty => "eraser",
            Particle::Sand => "sand",
            Particle::Water => "water",
            Particle::Stone => "stone",
        }
    }
}

/// Gray-Scott chemical concentrations for one cell.
///
/// - a: substrate, 1.0 at rest
/// - b: catalyst, 0.0 at rest, seeded in patches
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Concentration {
    pub a: f32,
    pub b: f32,
}

impl Concentration {
    pub const REST: Concentration = Concentration { a: 1.0, b: 0.0 };

    pub fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }

    /// Whether both channels lie in [0, 1]
    pub fn is_saturated(&self) -> bool {
        (0.0..=1.0).contains(&self.a) && (0.0..=1.0).contains(&self.b)
    }
}

impl Default for Concentration {
    fn default() -> Self {
        Self::REST
    }
}

/// Clamp to [0, 1], mapping NaN to 0
#[inline]
pub fn saturate(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_size() {
        assert_eq!(std::mem::size_of::<Particle>(), 1);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Particle::default(), Particle::Empty);
        assert_eq!(Concentration::default(), Concentration::new(1.0, 0.0));
    }

    #[test]
    fn test_sand_displacement_rules() {
        assert!(Particle::Empty.yields_to_sand());
        assert!(Particle::Water.yields_to_sand());
        assert!(!Particle::Sand.yields_to_sand());
        assert!(!Particle::Stone.yields_to_sand());
    }

    #[test]
    fn test_only_sand_and_water_move() {
        let mobile: Vec<Particle> = Particle::ALL.into_iter().filter(|p| p.is_mobile()).collect();
        assert_eq!(mobile, vec![Particle::Sand, Particle::Water]);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(1.5), 1.0);
        assert_eq!(saturate(0.25), 0.25);
        assert_eq!(saturate(f32::NAN), 0.0);
        assert_eq!(saturate(f32::INFINITY), 1.0);
    }
}
