//! Interactive worksheet widgets.
//!
//! Each widget pairs validated, immutable content with a small state value.
//! `reduce` takes the content, the current state and one action and returns
//! the next state; nothing is shared between widgets.

pub mod answers;
pub mod choice;
pub mod decision_tree;
pub mod flashcard;
pub mod hotspot;
pub mod placement;
pub mod sequence;

pub use answers::{matches_answer, reduce_reveal, Answers, Reveal, RevealAction};
pub use choice::{ChoiceAction, ChoiceQuestion, ChoiceState};
pub use decision_tree::{DecisionTree, Outcome, WalkerAction, WalkerState};
pub use flashcard::{FlipAction, FlipState};
pub use hotspot::{HotspotAction, HotspotSet, HotspotState};
pub use placement::{Board, BoardKind, PlacementAction, PlacementState, SlotStatus};
pub use sequence::{PositionStatus, Sequence, SequenceAction, SequenceState};
