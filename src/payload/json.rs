//! JSON text form of payload trees.

use super::node::PayloadNode;
use crate::error::Result;

/// Canonical text of the empty default tree.
pub const EMPTY_JSON: &str = "{}";

pub fn serialize(node: &PayloadNode) -> Result<String> {
    Ok(serde_json::to_string(node)?)
}

pub fn deserialize(text: &str) -> Result<PayloadNode> {
    Ok(serde_json::from_str(text)?)
}
