//! Drag-and-drop boards: labelling points on a diagram and matching
//! definitions to terms are the same widget with different content.
//!
//! Every item declares the slot it belongs in. For matching boards each
//! definition points at its own term's slot when the board is built.

use crate::error::{ContentError, Result};
use crate::models::{LabelingContent, MatchingContent};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    Matching,
    Labeling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: String,
    pub name: String,
    /// Correct answer shown next to a wrong placement after reveal.
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeable {
    pub id: String,
    pub text: String,
    pub correct_slot: String,
}

#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    pub title: String,
    pub kind: BoardKind,
    /// Free-form description of the diagram for labelling boards.
    pub diagram: Option<String>,
    slots: Vec<Slot>,
    items: Vec<Placeable>,
}

impl Board {
    pub fn new(
        id: String,
        title: String,
        kind: BoardKind,
        slots: Vec<Slot>,
        items: Vec<Placeable>,
    ) -> Result<Self> {
        let mut slot_ids = HashSet::new();
        for slot in &slots {
            if !slot_ids.insert(slot.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    scope: id,
                    id: slot.id.clone(),
                });
            }
        }
        let mut item_ids = HashSet::new();
        for item in &items {
            if !item_ids.insert(item.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    scope: id,
                    id: item.id.clone(),
                });
            }
            if !slot_ids.contains(item.correct_slot.as_str()) {
                return Err(ContentError::UnknownSlot {
                    board: id,
                    item: item.id.clone(),
                    slot: item.correct_slot.clone(),
                });
            }
        }
        Ok(Self {
            id,
            title,
            kind,
            diagram: None,
            slots,
            items,
        })
    }

    /// Terms become slots and definitions become the draggable items.
    pub fn from_matching(content: MatchingContent) -> Result<Self> {
        let slots = content
            .pairs
            .iter()
            .map(|pair| Slot {
                id: pair.id.clone(),
                name: pair.term.clone(),
                answer: pair.definition.clone(),
            })
            .collect();
        let items = content
            .pairs
            .into_iter()
            .map(|pair| Placeable {
                correct_slot: pair.id.clone(),
                id: pair.id,
                text: pair.definition,
            })
            .collect();
        Self::new(content.id, content.title, BoardKind::Matching, slots, items)
    }

    pub fn from_labeling(content: LabelingContent) -> Result<Self> {
        let slots = content
            .zones
            .into_iter()
            .map(|zone| Slot {
                name: match zone.location {
                    Some(location) => format!("Point {} ({})", zone.point, location),
                    None => format!("Point {}", zone.point),
                },
                id: zone.id,
                answer: zone.label,
            })
            .collect();
        let items = content
            .labels
            .into_iter()
            .map(|label| Placeable {
                id: label.id,
                text: label.text,
                correct_slot: label.correct_target,
            })
            .collect();
        let mut board = Self::new(
            content.id,
            content.title,
            BoardKind::Labeling,
            slots,
            items,
        )?;
        board.diagram = Some(content.diagram);
        Ok(board)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn items(&self) -> &[Placeable] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Placeable> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn initial_state(&self) -> PlacementState {
        PlacementState {
            placements: BTreeMap::new(),
            item_order: (0..self.items.len()).collect(),
            slot_cursor: 0,
            item_cursor: 0,
        }
    }

    /// Matching boards list their definitions in a random order so the
    /// answer is not simply read across.
    pub fn shuffled_state<R: Rng + ?Sized>(&self, rng: &mut R) -> PlacementState {
        let mut state = self.initial_state();
        if self.kind == BoardKind::Matching {
            state.item_order.shuffle(rng);
        }
        state
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementState {
    /// slot id -> item id
    placements: BTreeMap<String, String>,
    /// Display order of the item tray, as indices into the board's items.
    item_order: Vec<usize>,
    slot_cursor: usize,
    item_cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementAction {
    Place { item: String, slot: String },
    Clear { slot: String },
    Reset,
    SlotUp,
    SlotDown,
    ItemPrev,
    ItemNext,
    /// Place the item under the tray cursor into the focused slot.
    PlaceFocused,
    ClearFocused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Unrevealed,
    Empty,
    Correct,
    Incorrect,
}

impl PlacementState {
    pub fn placed_in(&self, slot: &str) -> Option<&str> {
        self.placements.get(slot).map(String::as_str)
    }

    pub fn slot_of(&self, item: &str) -> Option<&str> {
        self.placements
            .iter()
            .find(|(_, placed)| placed.as_str() == item)
            .map(|(slot, _)| slot.as_str())
    }

    pub fn is_placed(&self, item: &str) -> bool {
        self.slot_of(item).is_some()
    }

    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    pub fn slot_cursor(&self) -> usize {
        self.slot_cursor
    }

    pub fn item_cursor(&self) -> usize {
        self.item_cursor
    }

    /// Items in tray order.
    pub fn tray<'a>(&self, board: &'a Board) -> Vec<&'a Placeable> {
        self.item_order
            .iter()
            .filter_map(|i| board.items.get(*i))
            .collect()
    }

    pub fn slot_status(&self, board: &Board, slot: &str, revealed: bool) -> SlotStatus {
        if !revealed {
            return SlotStatus::Unrevealed;
        }
        match self.placed_in(slot).and_then(|item| board.item(item)) {
            None => SlotStatus::Empty,
            Some(item) if item.correct_slot == slot => SlotStatus::Correct,
            Some(_) => SlotStatus::Incorrect,
        }
    }

    pub fn correct_count(&self, board: &Board) -> usize {
        board
            .slots
            .iter()
            .filter(|s| self.slot_status(board, &s.id, true) == SlotStatus::Correct)
            .count()
    }
}

pub fn reduce(board: &Board, state: PlacementState, action: PlacementAction) -> PlacementState {
    match action {
        PlacementAction::Place { item, slot } => {
            if board.item(&item).is_none() || !board.slots.iter().any(|s| s.id == slot) {
                return state;
            }
            let mut placements = state.placements;
            placements.retain(|_, placed| *placed != item);
            placements.insert(slot, item);
            PlacementState {
                placements,
                ..state
            }
        }
        PlacementAction::Clear { slot } => {
            let mut placements = state.placements;
            placements.remove(&slot);
            PlacementState {
                placements,
                ..state
            }
        }
        PlacementAction::Reset => PlacementState {
            placements: BTreeMap::new(),
            ..state
        },
        PlacementAction::SlotUp => PlacementState {
            slot_cursor: state.slot_cursor.saturating_sub(1),
            ..state
        },
        PlacementAction::SlotDown => PlacementState {
            slot_cursor: (state.slot_cursor + 1).min(board.slots.len().saturating_sub(1)),
            ..state
        },
        PlacementAction::ItemPrev => PlacementState {
            item_cursor: state.item_cursor.saturating_sub(1),
            ..state
        },
        PlacementAction::ItemNext => PlacementState {
            item_cursor: (state.item_cursor + 1).min(state.item_order.len().saturating_sub(1)),
            ..state
        },
        PlacementAction::PlaceFocused => {
            let item = state
                .item_order
                .get(state.item_cursor)
                .and_then(|i| board.items.get(*i))
                .map(|i| i.id.clone());
            let slot = board.slots.get(state.slot_cursor).map(|s| s.id.clone());
            match (item, slot) {
                (Some(item), Some(slot)) => {
                    reduce(board, state, PlacementAction::Place { item, slot })
                }
                _ => state,
            }
        }
        PlacementAction::ClearFocused => match board.slots.get(state.slot_cursor) {
            Some(slot) => {
                let slot = slot.id.clone();
                reduce(board, state, PlacementAction::Clear { slot })
            }
            None => state,
        },
    }
}
