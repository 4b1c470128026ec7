//! Worksheet content as it appears in the JSON catalog.
//!
//! These are the raw, unvalidated shapes. `catalog` turns them into the
//! validated widget content the session works with.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Worksheet {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub intro: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub takeaways: Vec<Takeaway>,
    #[serde(default)]
    pub study_tips: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub number: u32,
    pub title: String,
    pub subtitle: String,
    pub focus: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Scenario(Scenario),
    RecallCard(RecallCard),
    Choice(ChoiceContent),
    DecisionTree(TreeContent),
    Sequence(SequenceContent),
    Matching(MatchingContent),
    Labeling(LabelingContent),
    Hotspots(HotspotContent),
}

/// Clinical scenario answered with free text.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub scenario: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    /// Short forms that also count as correct, e.g. "sternal angle".
    #[serde(default)]
    pub accepted: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecallCard {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceContent {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub prompt: String,
    pub options: Vec<ChoiceOption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeContent {
    pub id: String,
    pub title: String,
    pub scenario: String,
    pub start: String,
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub prompt: String,
    pub options: Vec<TreeOption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeOption {
    pub text: String,
    /// `None` marks a terminal option.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub is_correct: Option<bool>,
    #[serde(default)]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SequenceContent {
    pub id: String,
    pub title: String,
    pub steps: Vec<SequenceStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SequenceStep {
    pub id: String,
    pub text: String,
    /// 1-indexed target position.
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingContent {
    pub id: String,
    pub title: String,
    pub pairs: Vec<MatchPair>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchPair {
    pub id: String,
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelingContent {
    pub id: String,
    pub title: String,
    /// What the numbered points are on, since there is no image to show.
    pub diagram: String,
    pub labels: Vec<LabelItem>,
    pub zones: Vec<DropZone>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelItem {
    pub id: String,
    pub text: String,
    pub correct_target: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropZone {
    pub id: String,
    pub point: u32,
    /// Name of the structure at this point, shown after reveal.
    pub label: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotspotContent {
    pub id: String,
    pub instructions: String,
    pub diagram: String,
    pub hotspots: Vec<Hotspot>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hotspot {
    pub id: String,
    /// Where the region sits, shown before discovery.
    pub region: String,
    pub label: String,
    pub info: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Takeaway {
    pub topic: String,
    pub text: String,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AppState {
    Menu,
    Worksheet,
    QuitConfirm,
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_tag_selects_variant() {
        let json = r#"{
            "kind": "recall_card",
            "question": "At what vertebral level is the sternal angle?",
            "answer": "T4-T5"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        match item {
            Item::RecallCard(card) => {
                assert_eq!(card.answer, "T4-T5");
                assert!(card.hint.is_none());
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn test_tree_option_without_next_is_terminal() {
        let json = r#"{ "text": "Discharge home", "is_correct": false }"#;
        let option: TreeOption = serde_json::from_str(json).unwrap();
        assert!(option.next.is_none());
        assert_eq!(option.is_correct, Some(false));
        assert!(option.feedback.is_none());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{ "kind": "essay", "id": "x" }"#;
        assert!(serde_json::from_str::<Item>(json).is_err());
    }
}
