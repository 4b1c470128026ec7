//! Branching clinical decision tree.
//!
//! Nodes live in an id-keyed map and options refer to their successor by id,
//! so cycles in content never become cycles in memory. Every reference is
//! checked when the tree is built; after that the walker can look nodes up
//! without failing.

use crate::error::{ContentError, Result};
use crate::models::{TreeContent, TreeNode, TreeOption};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct DecisionTree {
    pub id: String,
    pub title: String,
    pub scenario: String,
    start: String,
    nodes: HashMap<String, TreeNode>,
}

impl DecisionTree {
    pub fn new(content: TreeContent) -> Result<Self> {
        let mut nodes = HashMap::with_capacity(content.nodes.len());
        for node in content.nodes {
            if node.options.is_empty() {
                return Err(ContentError::EmptyNode {
                    tree: content.id,
                    node: node.id,
                });
            }
            if nodes.contains_key(&node.id) {
                return Err(ContentError::DuplicateId {
                    scope: content.id,
                    id: node.id,
                });
            }
            nodes.insert(node.id.clone(), node);
        }

        if !nodes.contains_key(&content.start) {
            return Err(ContentError::MissingStartNode {
                tree: content.id,
                node: content.start,
            });
        }

        for node in nodes.values() {
            for next in node.options.iter().filter_map(|o| o.next.as_ref()) {
                if !nodes.contains_key(next) {
                    return Err(ContentError::DanglingNode {
                        tree: content.id,
                        from: node.id.clone(),
                        to: next.clone(),
                    });
                }
            }
        }

        Ok(Self {
            id: content.id,
            title: content.title,
            scenario: content.scenario,
            start: content.start,
            nodes,
        })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn initial_state(&self) -> WalkerState {
        WalkerState {
            current: self.start.clone(),
            path: vec![self.start.clone()],
            selected: None,
            finished: false,
        }
    }

    /// True when no node is reachable from itself. Cycles are legal content,
    /// but a cyclic tree cannot promise that every walk ends.
    pub fn is_acyclic(&self) -> bool {
        fn visit<'a>(
            tree: &'a DecisionTree,
            id: &'a str,
            on_stack: &mut HashSet<&'a str>,
            done: &mut HashSet<&'a str>,
        ) -> bool {
            if done.contains(id) {
                return true;
            }
            if !on_stack.insert(id) {
                return false;
            }
            if let Some(node) = tree.nodes.get(id) {
                for next in node.options.iter().filter_map(|o| o.next.as_deref()) {
                    if !visit(tree, next, on_stack, done) {
                        return false;
                    }
                }
            }
            on_stack.remove(id);
            done.insert(id);
            true
        }

        let mut on_stack = HashSet::new();
        let mut done = HashSet::new();
        self.nodes
            .keys()
            .all(|id| visit(self, id, &mut on_stack, &mut done))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerState {
    current: String,
    path: Vec<String>,
    selected: Option<usize>,
    finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerAction {
    Select(usize),
    Confirm,
    Restart,
}

/// What a confirmed terminal option reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome<'a> {
    pub is_correct: bool,
    pub feedback: Option<&'a str>,
}

impl WalkerState {
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_node<'a>(&self, tree: &'a DecisionTree) -> Option<&'a TreeNode> {
        tree.node(&self.current)
    }

    pub fn selected_option<'a>(&self, tree: &'a DecisionTree) -> Option<&'a TreeOption> {
        let index = self.selected?;
        self.current_node(tree)?.options.get(index)
    }

    /// Set once a terminal option has been confirmed.
    pub fn outcome<'a>(&self, tree: &'a DecisionTree) -> Option<Outcome<'a>> {
        if !self.finished {
            return None;
        }
        let option = self.selected_option(tree)?;
        Some(Outcome {
            is_correct: option.is_correct.unwrap_or(false),
            feedback: option.feedback.as_deref(),
        })
    }

    /// Feedback for a pending, non-terminal selection.
    pub fn pending_feedback<'a>(&self, tree: &'a DecisionTree) -> Option<&'a str> {
        if self.finished {
            return None;
        }
        let option = self.selected_option(tree)?;
        if option.next.is_some() {
            option.feedback.as_deref()
        } else {
            None
        }
    }
}

pub fn reduce(tree: &DecisionTree, state: WalkerState, action: WalkerAction) -> WalkerState {
    match action {
        WalkerAction::Restart => tree.initial_state(),
        WalkerAction::Select(index) => {
            if state.finished {
                return state;
            }
            let option_count = state
                .current_node(tree)
                .map(|node| node.options.len())
                .unwrap_or(0);
            if index >= option_count {
                return state;
            }
            WalkerState {
                selected: Some(index),
                ..state
            }
        }
        WalkerAction::Confirm => {
            if state.finished {
                return state;
            }
            let next = match state.selected_option(tree) {
                Some(option) => option.next.clone(),
                None => return state,
            };
            match next {
                Some(next) => {
                    let mut path = state.path;
                    path.push(next.clone());
                    WalkerState {
                        current: next,
                        path,
                        selected: None,
                        finished: false,
                    }
                }
                None => WalkerState {
                    finished: true,
                    ..state
                },
            }
        }
    }
}
