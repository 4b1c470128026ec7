use crate::error::{ContentError, Result};
use crate::models::{Hotspot, HotspotContent};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone)]
pub struct HotspotSet {
    pub id: String,
    pub instructions: String,
    pub diagram: String,
    regions: Vec<Hotspot>,
}

impl HotspotSet {
    pub fn new(content: HotspotContent) -> Result<Self> {
        if content.hotspots.is_empty() {
            return Err(ContentError::EmptyHotspots { set: content.id });
        }
        let mut seen = HashSet::new();
        for region in &content.hotspots {
            if !seen.insert(region.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    scope: content.id.clone(),
                    id: region.id.clone(),
                });
            }
        }
        Ok(Self {
            id: content.id,
            instructions: content.instructions,
            diagram: content.diagram,
            regions: content.hotspots,
        })
    }

    pub fn regions(&self) -> &[Hotspot] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, id: &str) -> Option<&Hotspot> {
        self.regions.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotspotState {
    discovered: BTreeSet<String>,
    selected: Option<String>,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotspotAction {
    Reveal(String),
    RevealFocused,
    FocusUp,
    FocusDown,
}

impl HotspotState {
    pub fn is_discovered(&self, id: &str) -> bool {
        self.discovered.contains(id)
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The most recently revealed region.
    pub fn selected<'a>(&self, set: &'a HotspotSet) -> Option<&'a Hotspot> {
        self.selected.as_deref().and_then(|id| set.region(id))
    }

    pub fn progress(&self, set: &HotspotSet) -> f64 {
        if set.is_empty() {
            return 0.0;
        }
        self.discovered.len() as f64 / set.len() as f64
    }

    pub fn percent(&self, set: &HotspotSet) -> u16 {
        (self.progress(set) * 100.0).round() as u16
    }

    pub fn is_complete(&self, set: &HotspotSet) -> bool {
        self.discovered.len() == set.len()
    }
}

pub fn reduce(set: &HotspotSet, state: HotspotState, action: HotspotAction) -> HotspotState {
    match action {
        HotspotAction::Reveal(id) => {
            if set.region(&id).is_none() {
                return state;
            }
            let mut discovered = state.discovered;
            discovered.insert(id.clone());
            HotspotState {
                discovered,
                selected: Some(id),
                ..state
            }
        }
        HotspotAction::RevealFocused => match set.regions.get(state.cursor) {
            Some(region) => {
                let id = region.id.clone();
                reduce(set, state, HotspotAction::Reveal(id))
            }
            None => state,
        },
        HotspotAction::FocusUp => HotspotState {
            cursor: state.cursor.saturating_sub(1),
            ..state
        },
        HotspotAction::FocusDown => HotspotState {
            cursor: (state.cursor + 1).min(set.len().saturating_sub(1)),
            ..state
        },
    }
}
