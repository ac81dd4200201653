//! Stable identifiers for nodes and edges.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const NODE_PREFIX: &str = "node-";

/// Identity of one logical slot in a structure.
///
/// Ids are handed out monotonically by the structure that owns the node and
/// are never reused within that structure. Displays as `node-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NODE_PREFIX, self.0)
    }
}

/// Identity of a parent → child link. Displays as `<from>-<to>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    pub from: NodeId,
    pub to: NodeId,
}

impl EdgeId {
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Failure to parse a node or edge id from its display form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id: {input:?}")]
pub struct IdParseError {
    kind: &'static str,
    input: String,
}

impl IdParseError {
    fn node(input: &str) -> Self {
        Self { kind: "node", input: input.to_string() }
    }

    fn edge(input: &str) -> Self {
        Self { kind: "edge", input: input.to_string() }
    }
}

impl FromStr for NodeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(NODE_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(NodeId)
            .ok_or_else(|| IdParseError::node(s))
    }
}

impl FromStr for EdgeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "node-1-node-3": the second id starts at the last "-node-".
        let split = s.rfind("-node-").ok_or_else(|| IdParseError::edge(s))?;
        let from = s[..split].parse().map_err(|_| IdParseError::edge(s))?;
        let to = s[split + 1..].parse().map_err(|_| IdParseError::edge(s))?;
        Ok(EdgeId { from, to })
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{EdgeId, NodeId};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for NodeId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for NodeId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(D::Error::custom)
        }
    }

    impl Serialize for EdgeId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for EdgeId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(D::Error::custom)
        }
    }
}
