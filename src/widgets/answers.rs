use crate::utils::normalize_answer;
use std::collections::HashMap;

/// Free-text answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    entries: HashMap<String, String>,
}

impl Answers {
    /// Blank text removes the answer, so "typed then deleted" reads as unanswered.
    pub fn set(&mut self, id: &str, text: &str) {
        if text.trim().is_empty() {
            self.entries.remove(id);
        } else {
            self.entries.insert(id.to_string(), text.to_string());
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Whether correct answers and feedback are on display for every widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reveal {
    pub revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    Submit,
    Reset,
}

pub fn reduce_reveal(_state: Reveal, action: RevealAction) -> Reveal {
    match action {
        RevealAction::Submit => Reveal { revealed: true },
        RevealAction::Reset => Reveal { revealed: false },
    }
}

/// Case and whitespace insensitive comparison against the model answer and
/// any accepted short forms.
pub fn matches_answer(given: &str, expected: &str, accepted: &[String]) -> bool {
    let given = normalize_answer(given);
    if given.is_empty() {
        return false;
    }
    std::iter::once(expected)
        .chain(accepted.iter().map(String::as_str))
        .any(|candidate| normalize_answer(candidate) == given)
}
