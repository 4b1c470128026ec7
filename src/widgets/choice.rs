//! Single-answer questions: multiple choice, true/false and picking the
//! finding on an X-ray.

use crate::error::{ContentError, Result};
use crate::models::{ChoiceContent, ChoiceOption};

#[derive(Debug, Clone)]
pub struct ChoiceQuestion {
    pub id: String,
    pub title: Option<String>,
    pub prompt: String,
    options: Vec<ChoiceOption>,
}

impl ChoiceQuestion {
    pub fn new(content: ChoiceContent) -> Result<Self> {
        let found = content.options.iter().filter(|o| o.is_correct).count();
        if found != 1 {
            return Err(ContentError::InvalidChoice {
                question: content.id,
                found,
            });
        }
        let mut ids: Vec<&str> = content.options.iter().map(|o| o.id.as_str()).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(ContentError::DuplicateId {
                scope: content.id.clone(),
                id: pair[0].to_string(),
            });
        }
        Ok(Self {
            id: content.id,
            title: content.title,
            prompt: content.prompt,
            options: content.options,
        })
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn correct_option(&self) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceState {
    selected: Option<String>,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceAction {
    Select(String),
    SelectFocused,
    FocusUp,
    FocusDown,
}

impl ChoiceState {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// `None` while nothing is selected.
    pub fn is_correct(&self, question: &ChoiceQuestion) -> Option<bool> {
        let id = self.selected.as_deref()?;
        question
            .options
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.is_correct)
    }
}

pub fn reduce(question: &ChoiceQuestion, state: ChoiceState, action: ChoiceAction) -> ChoiceState {
    match action {
        ChoiceAction::Select(id) => {
            if !question.options.iter().any(|o| o.id == id) {
                return state;
            }
            ChoiceState {
                selected: Some(id),
                ..state
            }
        }
        ChoiceAction::SelectFocused => match question.options.get(state.cursor) {
            Some(option) => {
                let id = option.id.clone();
                reduce(question, state, ChoiceAction::Select(id))
            }
            None => state,
        },
        ChoiceAction::FocusUp => ChoiceState {
            cursor: state.cursor.saturating_sub(1),
            ..state
        },
        ChoiceAction::FocusDown => ChoiceState {
            cursor: (state.cursor + 1).min(question.options.len().saturating_sub(1)),
            ..state
        },
    }
}
