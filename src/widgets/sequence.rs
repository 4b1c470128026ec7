use crate::error::{ContentError, Result};
use crate::models::{SequenceContent, SequenceStep};
use rand::seq::SliceRandom;
use rand::Rng;

/// Steps in their canonical order.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub id: String,
    pub title: String,
    steps: Vec<SequenceStep>,
}

impl Sequence {
    pub fn new(content: SequenceContent) -> Result<Self> {
        let len = content.steps.len();
        let mut seen = vec![false; len];
        for step in &content.steps {
            let slot = (step.order as usize).checked_sub(1).filter(|i| *i < len);
            match slot {
                Some(i) if !seen[i] => seen[i] = true,
                _ => {
                    return Err(ContentError::InvalidSequence {
                        sequence: content.id,
                        len,
                    });
                }
            }
        }
        if len == 0 {
            return Err(ContentError::InvalidSequence {
                sequence: content.id,
                len,
            });
        }

        let mut steps = content.steps;
        steps.sort_by_key(|s| s.order);
        Ok(Self {
            id: content.id,
            title: content.title,
            steps,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn in_order(&self) -> SequenceState {
        SequenceState {
            steps: self.steps.clone(),
            cursor: 0,
            grabbed: false,
        }
    }

    /// Cosmetic Fisher-Yates shuffle of the steps.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> SequenceState {
        let mut state = self.in_order();
        state.steps.shuffle(rng);
        state
    }

    /// Arrange steps by target position, e.g. `[3, 1, 2]`. Unknown positions are skipped.
    pub fn arranged(&self, targets: &[u32]) -> SequenceState {
        let mut state = self.in_order();
        state.steps = targets
            .iter()
            .filter_map(|t| self.steps.iter().find(|s| s.order == *t).cloned())
            .collect();
        state
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    steps: Vec<SequenceStep>,
    cursor: usize,
    grabbed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceAction {
    Move { from: usize, to: usize },
    FocusUp,
    FocusDown,
    /// Pick up or drop the focused step; a held step travels with the focus.
    ToggleGrab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Unrevealed,
    Correct,
    Incorrect,
}

impl SequenceState {
    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn targets(&self) -> Vec<u32> {
        self.steps.iter().map(|s| s.order).collect()
    }

    pub fn is_correct(&self) -> bool {
        self.steps
            .iter()
            .enumerate()
            .all(|(p, step)| step.order as usize == p + 1)
    }

    pub fn position_status(&self, position: usize, revealed: bool) -> PositionStatus {
        if !revealed {
            return PositionStatus::Unrevealed;
        }
        match self.steps.get(position) {
            Some(step) if step.order as usize == position + 1 => PositionStatus::Correct,
            _ => PositionStatus::Incorrect,
        }
    }

    /// Zero-based positions currently holding the wrong step.
    pub fn misplaced(&self) -> Vec<usize> {
        self.steps
            .iter()
            .enumerate()
            .filter(|(p, step)| step.order as usize != p + 1)
            .map(|(p, _)| p)
            .collect()
    }
}

pub fn reduce(state: SequenceState, action: SequenceAction) -> SequenceState {
    let len = state.steps.len();
    match action {
        SequenceAction::Move { from, to } => {
            if from >= len || to >= len || from == to {
                return state;
            }
            let mut steps = state.steps;
            let step = steps.remove(from);
            steps.insert(to, step);
            SequenceState { steps, ..state }
        }
        SequenceAction::ToggleGrab => SequenceState {
            grabbed: !state.grabbed && len > 0,
            ..state
        },
        SequenceAction::FocusUp => {
            if state.cursor == 0 {
                return state;
            }
            shift_focus(state, -1)
        }
        SequenceAction::FocusDown => {
            if state.cursor + 1 >= len {
                return state;
            }
            shift_focus(state, 1)
        }
    }
}

fn shift_focus(state: SequenceState, delta: isize) -> SequenceState {
    let from = state.cursor;
    let to = from.saturating_add_signed(delta);
    let grabbed = state.grabbed;
    let mut state = if grabbed {
        reduce(state, SequenceAction::Move { from, to })
    } else {
        state
    };
    state.cursor = to;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sequence(n: u32) -> Sequence {
        Sequence::new(SequenceContent {
            id: "steps".to_string(),
            title: "Steps".to_string(),
            steps: (1..=n)
                .map(|i| SequenceStep {
                    id: format!("s{}", i),
                    text: format!("Step {}", i),
                    order: i,
                })
                .collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_identity_order_is_correct() {
        let seq = sequence(3);
        assert!(seq.arranged(&[1, 2, 3]).is_correct());
    }

    #[test]
    fn test_swapped_pair_flags_first_two_positions() {
        let seq = sequence(3);
        let state = seq.arranged(&[2, 1, 3]);
        assert!(!state.is_correct());
        assert_eq!(state.position_status(0, true), PositionStatus::Incorrect);
        assert_eq!(state.position_status(1, true), PositionStatus::Incorrect);
        assert_eq!(state.position_status(2, true), PositionStatus::Correct);
        assert_eq!(state.misplaced(), vec![0, 1]);
    }

    #[test]
    fn test_status_hidden_until_revealed() {
        let seq = sequence(3);
        let state = seq.arranged(&[2, 1, 3]);
        for p in 0..3 {
            assert_eq!(state.position_status(p, false), PositionStatus::Unrevealed);
        }
    }

    #[test]
    fn test_move_preserves_relative_order_of_others() {
        let seq = sequence(5);
        let state = seq.arranged(&[1, 2, 3, 4, 5]);
        let state = reduce(state, SequenceAction::Move { from: 0, to: 3 });
        assert_eq!(state.targets(), vec![2, 3, 4, 1, 5]);
        let state = reduce(state, SequenceAction::Move { from: 4, to: 0 });
        assert_eq!(state.targets(), vec![5, 2, 3, 4, 1]);
    }

    #[test]
    fn test_out_of_range_move_is_noop() {
        let seq = sequence(3);
        let state = seq.arranged(&[3, 1, 2]);
        let after = reduce(state.clone(), SequenceAction::Move { from: 7, to: 0 });
        assert_eq!(after, state);
    }

    #[test]
    fn test_six_step_shuffle_restored_by_moves() {
        let seq = sequence(6);
        let state = seq.arranged(&[3, 1, 4, 5, 2, 6]);
        assert!(!state.is_correct());

        // [3,1,4,5,2,6] -> [1,3,4,5,2,6] -> [1,2,3,4,5,6]
        let state = reduce(state, SequenceAction::Move { from: 1, to: 0 });
        let state = reduce(state, SequenceAction::Move { from: 4, to: 1 });
        assert_eq!(state.targets(), vec![1, 2, 3, 4, 5, 6]);
        assert!(state.is_correct());

        // Leave one transposition behind.
        let swapped = reduce(state, SequenceAction::Move { from: 3, to: 4 });
        assert_eq!(swapped.targets(), vec![1, 2, 3, 5, 4, 6]);
        assert!(!swapped.is_correct());
        assert_eq!(swapped.misplaced(), vec![3, 4]);
    }

    #[test]
    fn test_grabbed_step_travels_with_focus() {
        let seq = sequence(4);
        let state = seq.arranged(&[4, 1, 2, 3]);
        let state = reduce(state, SequenceAction::ToggleGrab);
        assert!(state.is_grabbed());
        let mut state = state;
        for _ in 0..3 {
            state = reduce(state, SequenceAction::FocusDown);
        }
        assert_eq!(state.cursor(), 3);
        assert!(state.is_correct());

        let state = reduce(state, SequenceAction::ToggleGrab);
        let state = reduce(state, SequenceAction::FocusUp);
        assert_eq!(state.cursor(), 2);
        assert!(state.is_correct());
    }

    #[test]
    fn test_focus_stays_in_bounds() {
        let seq = sequence(2);
        let state = reduce(seq.in_order(), SequenceAction::FocusUp);
        assert_eq!(state.cursor(), 0);
        let state = reduce(state, SequenceAction::FocusDown);
        let state = reduce(state, SequenceAction::FocusDown);
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let seq = sequence(6);
        let mut rng = StdRng::seed_from_u64(11);
        let state = seq.shuffled(&mut rng);
        let mut targets = state.targets();
        targets.sort();
        assert_eq!(targets, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_non_permutation_targets_rejected() {
        let bad = |orders: &[u32]| {
            Sequence::new(SequenceContent {
                id: "bad".to_string(),
                title: String::new(),
                steps: orders
                    .iter()
                    .map(|o| SequenceStep {
                        id: format!("s{}", o),
                        text: String::new(),
                        order: *o,
                    })
                    .collect(),
            })
        };
        assert!(matches!(bad(&[1, 1, 2]), Err(ContentError::InvalidSequence { .. })));
        assert!(matches!(bad(&[0, 1, 2]), Err(ContentError::InvalidSequence { .. })));
        assert!(matches!(bad(&[1, 2, 4]), Err(ContentError::InvalidSequence { .. })));
        assert!(matches!(bad(&[]), Err(ContentError::InvalidSequence { .. })));
        assert!(bad(&[2, 3, 1]).is_ok());
    }
}
