//! Turning a finished worksheet into per-item verdicts and a score.

use crate::catalog::{Catalog, ItemContent};
use crate::session::ItemState;
use crate::widgets::{matches_answer, Answers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
    /// Practice-only items: recall cards and hotspot exploration.
    NotGraded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemResult {
    pub index: usize,
    pub kind: &'static str,
    pub title: String,
    pub verdict: Verdict,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorksheetResult {
    pub items: Vec<ItemResult>,
}

impl WorksheetResult {
    fn count(&self, verdict: Verdict) -> usize {
        self.items.iter().filter(|r| r.verdict == verdict).count()
    }

    pub fn correct(&self) -> usize {
        self.count(Verdict::Correct)
    }

    pub fn incorrect(&self) -> usize {
        self.count(Verdict::Incorrect)
    }

    pub fn unanswered(&self) -> usize {
        self.count(Verdict::Unanswered)
    }

    pub fn graded(&self) -> usize {
        self.items.len() - self.count(Verdict::NotGraded)
    }

    pub fn score(&self) -> f64 {
        match self.graded() {
            0 => 0.0,
            graded => self.correct() as f64 / graded as f64,
        }
    }

    pub fn percent(&self) -> u16 {
        (self.score() * 100.0).round() as u16
    }
}

pub fn grade_item(
    content: &ItemContent,
    state: &ItemState,
    answers: &Answers,
) -> (Verdict, Option<String>) {
    match (content, state) {
        (ItemContent::Scenario(scenario), _) => match answers.get(&scenario.id) {
            None => (Verdict::Unanswered, None),
            Some(given) if matches_answer(given, &scenario.answer, &scenario.accepted) => {
                (Verdict::Correct, None)
            }
            Some(_) => (Verdict::Incorrect, Some(format!("Model answer: {}", scenario.answer))),
        },
        (ItemContent::RecallCard(_), _) => (Verdict::NotGraded, None),
        (ItemContent::Choice(question), ItemState::Choice(choice)) => {
            match choice.is_correct(question) {
                None => (Verdict::Unanswered, None),
                Some(true) => (Verdict::Correct, None),
                Some(false) => (
                    Verdict::Incorrect,
                    question
                        .correct_option()
                        .map(|o| format!("Correct: {}", o.text)),
                ),
            }
        }
        (ItemContent::DecisionTree(tree), ItemState::DecisionTree(walker)) => {
            let steps = format!("{} step(s) taken", walker.path().len());
            match walker.outcome(tree) {
                None => (Verdict::Unanswered, None),
                Some(outcome) if outcome.is_correct => (Verdict::Correct, Some(steps)),
                Some(_) => (Verdict::Incorrect, Some(steps)),
            }
        }
        (ItemContent::Sequence(sequence), ItemState::Sequence(order)) => {
            let in_place = sequence.len() - order.misplaced().len();
            let detail = Some(format!("{}/{} steps in place", in_place, sequence.len()));
            if order.is_correct() {
                (Verdict::Correct, detail)
            } else {
                (Verdict::Incorrect, detail)
            }
        }
        (ItemContent::Placement(board), ItemState::Placement(placement)) => {
            if placement.placed_count() == 0 {
                return (Verdict::Unanswered, None);
            }
            let total = board.slots().len();
            let correct = placement.correct_count(board);
            let detail = Some(format!("{}/{} placed correctly", correct, total));
            if correct == total {
                (Verdict::Correct, detail)
            } else {
                (Verdict::Incorrect, detail)
            }
        }
        (ItemContent::Hotspots(set), ItemState::Hotspots(hotspots)) => (
            Verdict::NotGraded,
            Some(format!("{}/{} explored", hotspots.discovered_count(), set.len())),
        ),
        // A state that does not belong to its content is never produced by
        // the session; treat it as untouched.
        _ => (Verdict::Unanswered, None),
    }
}

pub fn grade_session(catalog: &Catalog, states: &[ItemState], answers: &Answers) -> WorksheetResult {
    let items = catalog
        .items
        .iter()
        .zip(states)
        .enumerate()
        .map(|(index, (item, state))| {
            let (verdict, detail) = grade_item(&item.content, state, answers);
            ItemResult {
                index,
                kind: item.content.kind_label(),
                title: item.content.title().to_string(),
                verdict,
                detail,
            }
        })
        .collect();
    WorksheetResult { items }
}
