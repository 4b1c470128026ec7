use thiserror::Error;

/// Malformed worksheet content.
///
/// Content is trusted static data, so any of these means the catalog itself is
/// broken. Loading stops at the first one found.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("decision tree '{tree}': start node '{node}' does not exist")]
    MissingStartNode { tree: String, node: String },

    #[error("decision tree '{tree}': node '{from}' points to unknown node '{to}'")]
    DanglingNode {
        tree: String,
        from: String,
        to: String,
    },

    #[error("decision tree '{tree}': node '{node}' has no options")]
    EmptyNode { tree: String, node: String },

    #[error("'{scope}': duplicate id '{id}'")]
    DuplicateId { scope: String, id: String },

    #[error("sequence '{sequence}': target positions are not a permutation of 1..={len}")]
    InvalidSequence { sequence: String, len: usize },

    #[error("board '{board}': item '{item}' targets unknown slot '{slot}'")]
    UnknownSlot {
        board: String,
        item: String,
        slot: String,
    },

    #[error("choice question '{question}': expected exactly one correct option, found {found}")]
    InvalidChoice { question: String, found: usize },

    #[error("hotspot set '{set}' has no regions")]
    EmptyHotspots { set: String },
}

pub type Result<T> = std::result::Result<T, ContentError>;
