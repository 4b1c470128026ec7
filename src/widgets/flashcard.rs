/// Active recall card: question on the front, answer on the back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlipState {
    pub flipped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAction {
    Flip,
    Reset,
}

pub fn reduce(state: FlipState, action: FlipAction) -> FlipState {
    match action {
        FlipAction::Flip => FlipState {
            flipped: !state.flipped,
        },
        FlipAction::Reset => FlipState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_toggles_between_faces() {
        let state = reduce(FlipState::default(), FlipAction::Flip);
        assert!(state.flipped);
        let state = reduce(state, FlipAction::Flip);
        assert!(!state.flipped);
    }

    #[test]
    fn test_reset_shows_question() {
        let state = reduce(FlipState { flipped: true }, FlipAction::Reset);
        assert_eq!(state, FlipState::default());
    }
}
