//! The worksheet catalog: every section and item, validated once at load.

use crate::error::{ContentError, Result};
use crate::logger;
use crate::models::{Item, RecallCard, Scenario, Takeaway, Worksheet};
use crate::widgets::{Board, ChoiceQuestion, DecisionTree, HotspotSet, Sequence};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const EMBEDDED_WORKSHEET: &str = include_str!("../content/worksheet.json");

#[derive(Debug, Clone)]
pub enum ItemContent {
    Scenario(Scenario),
    RecallCard(RecallCard),
    Choice(ChoiceQuestion),
    DecisionTree(DecisionTree),
    Sequence(Sequence),
    Placement(Board),
    Hotspots(HotspotSet),
}

impl ItemContent {
    pub fn kind_label(&self) -> &'static str {
        match self {
            ItemContent::Scenario(_) => "Clinical Scenario",
            ItemContent::RecallCard(_) => "Active Recall",
            ItemContent::Choice(_) => "Choose One",
            ItemContent::DecisionTree(_) => "Decision Tree",
            ItemContent::Sequence(_) => "Sequence",
            ItemContent::Placement(board) => match board.kind {
                crate::widgets::BoardKind::Matching => "Matching",
                crate::widgets::BoardKind::Labeling => "Labeling",
            },
            ItemContent::Hotspots(_) => "Hotspots",
        }
    }

    /// One-line description used in lists and the results summary.
    pub fn title(&self) -> &str {
        match self {
            ItemContent::Scenario(s) => &s.question,
            ItemContent::RecallCard(c) => &c.question,
            ItemContent::Choice(q) => q.title.as_deref().unwrap_or(&q.prompt),
            ItemContent::DecisionTree(t) => &t.title,
            ItemContent::Sequence(s) => &s.title,
            ItemContent::Placement(b) => &b.title,
            ItemContent::Hotspots(h) => &h.instructions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub section: usize,
    pub content: ItemContent,
}

#[derive(Debug, Clone)]
pub struct SectionInfo {
    pub number: u32,
    pub title: String,
    pub subtitle: String,
    pub focus: String,
    pub first_item: usize,
    pub item_count: usize,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub title: String,
    pub subtitle: String,
    pub intro: String,
    pub sections: Vec<SectionInfo>,
    pub items: Vec<CatalogItem>,
    pub takeaways: Vec<Takeaway>,
    pub study_tips: Vec<String>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn section_of(&self, index: usize) -> Option<&SectionInfo> {
        self.items
            .get(index)
            .and_then(|item| self.sections.get(item.section))
    }
}

pub fn load_embedded() -> Result<Catalog> {
    parse(EMBEDDED_WORKSHEET)
}

pub fn load_from_path(path: &Path) -> Result<Catalog> {
    let json = fs::read_to_string(path)?;
    parse(&json)
}

pub fn parse(json: &str) -> Result<Catalog> {
    let worksheet: Worksheet = serde_json::from_str(json)?;
    build(worksheet)
}

fn build(worksheet: Worksheet) -> Result<Catalog> {
    let mut sections = Vec::with_capacity(worksheet.sections.len());
    let mut items = Vec::new();
    // Scenario and choice answers share one answer space keyed by id.
    let mut answer_ids = HashSet::new();
    let mut widget_ids = HashSet::new();

    for (section_index, section) in worksheet.sections.into_iter().enumerate() {
        let first_item = items.len();
        let item_count = section.items.len();

        for item in section.items {
            let content = match item {
                Item::Scenario(scenario) => {
                    claim_id(&mut answer_ids, "answers", &scenario.id)?;
                    ItemContent::Scenario(scenario)
                }
                Item::RecallCard(card) => ItemContent::RecallCard(card),
                Item::Choice(choice) => {
                    claim_id(&mut answer_ids, "answers", &choice.id)?;
                    ItemContent::Choice(ChoiceQuestion::new(choice)?)
                }
                Item::DecisionTree(tree) => {
                    claim_id(&mut widget_ids, "widgets", &tree.id)?;
                    let tree = DecisionTree::new(tree)?;
                    if !tree.is_acyclic() {
                        logger::log(&format!(
                            "Decision tree '{}' contains a cycle; walks may not terminate",
                            tree.id
                        ));
                    }
                    ItemContent::DecisionTree(tree)
                }
                Item::Sequence(sequence) => {
                    claim_id(&mut widget_ids, "widgets", &sequence.id)?;
                    ItemContent::Sequence(Sequence::new(sequence)?)
                }
                Item::Matching(matching) => {
                    claim_id(&mut widget_ids, "widgets", &matching.id)?;
                    ItemContent::Placement(Board::from_matching(matching)?)
                }
                Item::Labeling(labeling) => {
                    claim_id(&mut widget_ids, "widgets", &labeling.id)?;
                    ItemContent::Placement(Board::from_labeling(labeling)?)
                }
                Item::Hotspots(hotspots) => {
                    claim_id(&mut widget_ids, "widgets", &hotspots.id)?;
                    ItemContent::Hotspots(HotspotSet::new(hotspots)?)
                }
            };
            items.push(CatalogItem {
                section: section_index,
                content,
            });
        }

        sections.push(SectionInfo {
            number: section.number,
            title: section.title,
            subtitle: section.subtitle,
            focus: section.focus,
            first_item,
            item_count,
        });
    }

    logger::log(&format!(
        "Catalog '{}' loaded: {} sections, {} items",
        worksheet.title,
        sections.len(),
        items.len()
    ));

    Ok(Catalog {
        title: worksheet.title,
        subtitle: worksheet.subtitle,
        intro: worksheet.intro,
        sections,
        items,
        takeaways: worksheet.takeaways,
        study_tips: worksheet.study_tips,
    })
}

fn claim_id(seen: &mut HashSet<String>, scope: &str, id: &str) -> Result<()> {
    if seen.insert(id.to_string()) {
        Ok(())
    } else {
        Err(ContentError::DuplicateId {
            scope: scope.to_string(),
            id: id.to_string(),
        })
    }
}
