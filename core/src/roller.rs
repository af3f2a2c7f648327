use dicebag_types::{DieRoller, Sides};

/// Uniform rolls from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRoller;

impl DieRoller for RandomRoller {
    fn roll(&mut self, sides: Sides) -> u32 {
        rand::random_range(1..=sides.get())
    }
}
