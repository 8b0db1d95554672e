use glam::Vec2;
use stride::InputState;

/// Walks forward the whole run, optionally turning, and holds crouch for a window of ticks.
#[derive(Debug, Clone, Copy)]
pub struct Script {
    pub crouch_from: u32,
    pub crouch_until: u32,
    pub turn_rate: f32,
}

impl Script {
    pub fn input_at(&self, tick: u32) -> InputState {
        let crouch = (self.crouch_from..self.crouch_until).contains(&tick);
        InputState::new(Vec2::Y, Vec2::new(self.turn_rate, 0.0), crouch)
    }

    pub fn into_source(self) -> impl FnMut() -> InputState {
        let mut tick = 0;
        move || {
            let input = self.input_at(tick);
            tick += 1;
            input
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crouch_window_is_half_open() {
        let script = Script {
            crouch_from: 10,
            crouch_until: 20,
            turn_rate: 0.0,
        };

        assert!(!script.input_at(9).crouch_held());
        assert!(script.input_at(10).crouch_held());
        assert!(script.input_at(19).crouch_held());
        assert!(!script.input_at(20).crouch_held());
    }

    #[test]
    fn source_advances_per_sample() {
        let script = Script {
            crouch_from: 1,
            crouch_until: 2,
            turn_rate: 5.0,
        };
        let mut source = script.into_source();

        assert!(!source().crouch_held());
        assert!(source().crouch_held());
        assert!(!source().crouch_held());
        assert_eq!(source().look_delta, Vec2::new(5.0, 0.0));
    }
}
