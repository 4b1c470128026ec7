use crate::catalog::{Catalog, ItemContent};
use crate::grading::{grade_session, WorksheetResult};
use crate::logger;
use crate::models::AppState;
use crate::widgets::{
    choice, decision_tree, flashcard, hotspot, placement, reduce_reveal, sequence, Answers,
    ChoiceAction, ChoiceState, FlipAction, FlipState, HotspotAction, HotspotState, PlacementAction,
    PlacementState, Reveal, RevealAction, SequenceAction, SequenceState, WalkerAction, WalkerState,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::Rng;
use std::io;

/// Interaction state for one catalog item. Scenario text lives in the
/// session's answer store, so its variant carries nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemState {
    Scenario,
    RecallCard(FlipState),
    Choice(ChoiceState),
    DecisionTree(WalkerState),
    Sequence(SequenceState),
    Placement(PlacementState),
    Hotspots(HotspotState),
}

impl ItemState {
    pub fn initial<R: Rng + ?Sized>(content: &ItemContent, rng: &mut R) -> Self {
        match content {
            ItemContent::Scenario(_) => ItemState::Scenario,
            ItemContent::RecallCard(_) => ItemState::RecallCard(FlipState::default()),
            ItemContent::Choice(_) => ItemState::Choice(ChoiceState::default()),
            ItemContent::DecisionTree(tree) => ItemState::DecisionTree(tree.initial_state()),
            ItemContent::Sequence(steps) => {
                let mut state = steps.shuffled(rng);
                // Never hand out an already solved sequence.
                if state.is_correct() && steps.len() > 1 {
                    state = sequence::reduce(
                        state,
                        SequenceAction::Move {
                            from: 0,
                            to: steps.len() - 1,
                        },
                    );
                }
                ItemState::Sequence(state)
            }
            ItemContent::Placement(board) => ItemState::Placement(board.shuffled_state(rng)),
            ItemContent::Hotspots(_) => ItemState::Hotspots(HotspotState::default()),
        }
    }
}

#[derive(Debug)]
pub struct WorksheetSession {
    pub catalog: Catalog,
    pub states: Vec<ItemState>,
    pub answers: Answers,
    pub reveal: Reveal,
    pub current_index: usize,
    /// Text of the scenario answer being edited. Byte offset cursor.
    pub input_buffer: String,
    pub cursor_position: usize,
    pub input_scroll_y: u16,
    pub menu_index: usize,
    pub summary_scroll: u16,
    /// Results captured when answers were revealed.
    pub result: Option<WorksheetResult>,
    /// Where to go back to when a quit is cancelled.
    pub previous_state: AppState,
    rng: StdRng,
}

impl WorksheetSession {
    pub fn new(catalog: Catalog, mut rng: StdRng) -> Self {
        let states = initial_states(&catalog, &mut rng);
        Self {
            catalog,
            states,
            answers: Answers::default(),
            reveal: Reveal::default(),
            current_index: 0,
            input_buffer: String::new(),
            cursor_position: 0,
            input_scroll_y: 0,
            menu_index: 0,
            summary_scroll: 0,
            result: None,
            previous_state: AppState::Menu,
            rng,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.revealed
    }

    pub fn current_content(&self) -> Option<&ItemContent> {
        self.catalog.item(self.current_index).map(|i| &i.content)
    }

    pub fn current_state(&self) -> Option<&ItemState> {
        self.states.get(self.current_index)
    }

    pub fn go_to(&mut self, index: usize) {
        if self.catalog.is_empty() {
            return;
        }
        self.current_index = index.min(self.catalog.len() - 1);
        self.input_buffer = match self.current_content() {
            Some(ItemContent::Scenario(s)) => self.answers.get(&s.id).unwrap_or_default().to_string(),
            _ => String::new(),
        };
        self.cursor_position = self.input_buffer.len();
        self.input_scroll_y = 0;
    }

    pub fn next_item(&mut self) {
        if self.current_index + 1 < self.catalog.len() {
            self.go_to(self.current_index + 1);
        }
    }

    pub fn prev_item(&mut self) {
        if self.current_index > 0 {
            self.go_to(self.current_index - 1);
        }
    }

    pub fn jump_to_section(&mut self, section: usize) {
        if let Some(first) = self.catalog.sections.get(section).map(|s| s.first_item) {
            self.go_to(first);
        }
    }

    /// Reveal every answer and grade the worksheet as it stands.
    pub fn submit(&mut self) {
        for state in &mut self.states {
            if let ItemState::Sequence(order) = state
                && order.is_grabbed()
            {
                *order = sequence::reduce(order.clone(), SequenceAction::ToggleGrab);
            }
        }
        self.reveal = reduce_reveal(self.reveal, RevealAction::Submit);
        let result = grade_session(&self.catalog, &self.states, &self.answers);
        logger::log(&format!(
            "Answers revealed: {}/{} correct, {} unanswered",
            result.correct(),
            result.graded(),
            result.unanswered()
        ));
        self.result = Some(result);
        self.summary_scroll = 0;
    }

    /// Practice again: clear every answer and widget, hide the answers.
    pub fn practice_again(&mut self) {
        self.answers.clear();
        self.reveal = reduce_reveal(self.reveal, RevealAction::Reset);
        self.states = initial_states(&self.catalog, &mut self.rng);
        self.result = None;
        self.summary_scroll = 0;
        self.go_to(0);
        logger::log("Worksheet reset for another attempt");
    }

    fn edit_answer(&mut self, code: KeyCode) {
        if self.is_revealed() {
            return;
        }
        let id = match self.current_content() {
            Some(ItemContent::Scenario(s)) => s.id.clone(),
            _ => return,
        };
        self.cursor_position = self.cursor_position.min(self.input_buffer.len());

        match code {
            KeyCode::Char(c) => {
                self.input_buffer.insert(self.cursor_position, c);
                self.cursor_position += c.len_utf8();
            }
            KeyCode::Backspace => {
                if let Some((idx, _)) = self.input_buffer[..self.cursor_position]
                    .char_indices()
                    .next_back()
                {
                    self.input_buffer.remove(idx);
                    self.cursor_position = idx;
                }
            }
            KeyCode::Delete => {
                if self.cursor_position < self.input_buffer.len() {
                    self.input_buffer.remove(self.cursor_position);
                }
            }
            KeyCode::Left => {
                if let Some((idx, _)) = self.input_buffer[..self.cursor_position]
                    .char_indices()
                    .next_back()
                {
                    self.cursor_position = idx;
                }
                return;
            }
            KeyCode::Right => {
                if let Some(c) = self.input_buffer[self.cursor_position..].chars().next() {
                    self.cursor_position += c.len_utf8();
                }
                return;
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                return;
            }
            KeyCode::End => {
                self.cursor_position = self.input_buffer.len();
                return;
            }
            _ => return,
        }
        self.answers.set(&id, &self.input_buffer);
    }

    fn handle_item_key(&mut self, code: KeyCode) {
        if matches!(self.current_content(), Some(ItemContent::Scenario(_))) {
            if code == KeyCode::Enter {
                self.next_item();
            } else {
                self.edit_answer(code);
            }
            return;
        }

        let revealed = self.is_revealed();
        let index = self.current_index;
        let (Some(item), Some(state)) = (self.catalog.items.get(index), self.states.get_mut(index))
        else {
            return;
        };

        match (&item.content, state) {
            (ItemContent::RecallCard(_), ItemState::RecallCard(card)) => {
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    *card = flashcard::reduce(*card, FlipAction::Flip);
                }
            }
            (ItemContent::Choice(question), ItemState::Choice(selection)) => {
                let action = match code {
                    KeyCode::Up => ChoiceAction::FocusUp,
                    KeyCode::Down => ChoiceAction::FocusDown,
                    KeyCode::Enter | KeyCode::Char(' ') if !revealed => ChoiceAction::SelectFocused,
                    _ => return,
                };
                *selection = choice::reduce(question, selection.clone(), action);
            }
            (ItemContent::DecisionTree(tree), ItemState::DecisionTree(walker)) => {
                // Restart stays available after reveal so a case can be replayed.
                let action = match code {
                    KeyCode::Char('r') => WalkerAction::Restart,
                    _ if revealed => return,
                    KeyCode::Up => {
                        WalkerAction::Select(walker.selected().map_or(0, |s| s.saturating_sub(1)))
                    }
                    KeyCode::Down => WalkerAction::Select(walker.selected().map_or(0, |s| s + 1)),
                    KeyCode::Enter => WalkerAction::Confirm,
                    _ => return,
                };
                *walker = decision_tree::reduce(tree, walker.clone(), action);
                if action == WalkerAction::Confirm
                    && let Some(outcome) = walker.outcome(tree)
                {
                    logger::log(&format!(
                        "Decision tree '{}' finished after {} step(s), correct: {}",
                        tree.id,
                        walker.path().len(),
                        outcome.is_correct
                    ));
                }
            }
            (ItemContent::Sequence(_), ItemState::Sequence(order)) => {
                let action = match code {
                    KeyCode::Up => SequenceAction::FocusUp,
                    KeyCode::Down => SequenceAction::FocusDown,
                    KeyCode::Enter | KeyCode::Char(' ') if !revealed => SequenceAction::ToggleGrab,
                    _ => return,
                };
                *order = sequence::reduce(order.clone(), action);
            }
            (ItemContent::Placement(board), ItemState::Placement(slots)) => {
                let action = match code {
                    KeyCode::Up => PlacementAction::SlotUp,
                    KeyCode::Down => PlacementAction::SlotDown,
                    KeyCode::Left => PlacementAction::ItemPrev,
                    KeyCode::Right => PlacementAction::ItemNext,
                    KeyCode::Enter | KeyCode::Char(' ') if !revealed => PlacementAction::PlaceFocused,
                    KeyCode::Backspace | KeyCode::Delete if !revealed => PlacementAction::ClearFocused,
                    KeyCode::Char('r') if !revealed => PlacementAction::Reset,
                    _ => return,
                };
                *slots = placement::reduce(board, slots.clone(), action);
            }
            (ItemContent::Hotspots(set), ItemState::Hotspots(found)) => {
                let action = match code {
                    KeyCode::Up => HotspotAction::FocusUp,
                    KeyCode::Down => HotspotAction::FocusDown,
                    KeyCode::Enter | KeyCode::Char(' ') => HotspotAction::RevealFocused,
                    _ => return,
                };
                let was_complete = found.is_complete(set);
                *found = hotspot::reduce(set, found.clone(), action);
                if !was_complete && found.is_complete(set) {
                    logger::log(&format!("All {} hotspots in '{}' explored", set.len(), set.id));
                }
            }
            _ => {}
        }
    }
}

fn initial_states<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Vec<ItemState> {
    catalog
        .items
        .iter()
        .map(|item| ItemState::initial(&item.content, rng))
        .collect()
}

pub fn handle_worksheet_input(
    session: &mut WorksheetSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> io::Result<()> {
    // AltGr arrives as Ctrl+Alt on some terminals and still types text.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => {
            session.previous_state = AppState::Worksheet;
            *app_state = AppState::QuitConfirm;
            Ok(())
        }
        KeyCode::Tab | KeyCode::PageDown => {
            session.next_item();
            Ok(())
        }
        KeyCode::BackTab | KeyCode::PageUp => {
            session.prev_item();
            Ok(())
        }
        KeyCode::Char('s') if ctrl => {
            session.submit();
            *app_state = AppState::Summary;
            Ok(())
        }
        KeyCode::Char('r') if ctrl => {
            session.practice_again();
            Ok(())
        }
        _ if ctrl => Ok(()),
        code => {
            session.handle_item_key(code);
            Ok(())
        }
    }
}

pub fn handle_menu_input(
    session: &mut WorksheetSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> io::Result<()> {
    match key.code {
        KeyCode::Up => {
            if session.menu_index > 0 {
                session.menu_index -= 1;
            }
        }
        KeyCode::Down => {
            if session.menu_index < session.catalog.sections.len().saturating_sub(1) {
                session.menu_index += 1;
            }
        }
        KeyCode::Enter => {
            if !session.catalog.is_empty() {
                session.jump_to_section(session.menu_index);
                *app_state = AppState::Worksheet;
            }
        }
        KeyCode::Char('s') => {
            if session.result.is_some() {
                *app_state = AppState::Summary;
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            session.previous_state = AppState::Menu;
            *app_state = AppState::QuitConfirm;
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_summary_input(
    session: &mut WorksheetSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> io::Result<()> {
    match key.code {
        KeyCode::Up => session.summary_scroll = session.summary_scroll.saturating_sub(1),
        KeyCode::Down => session.summary_scroll = session.summary_scroll.saturating_add(1),
        KeyCode::Char('w') => {
            session.go_to(0);
            *app_state = AppState::Worksheet;
        }
        KeyCode::Char('r') => {
            session.practice_again();
            *app_state = AppState::Worksheet;
        }
        KeyCode::Char('m') => *app_state = AppState::Menu,
        KeyCode::Char('q') | KeyCode::Esc => {
            session.previous_state = AppState::Summary;
            *app_state = AppState::QuitConfirm;
        }
        _ => {}
    }
    Ok(())
}

/// Returns true when the user confirmed quitting.
pub fn handle_quit_confirm_input(
    session: &mut WorksheetSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            *app_state = session.previous_state;
            false
        }
        _ => false,
    }
}
