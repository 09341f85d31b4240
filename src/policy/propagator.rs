//! Cross-subtree propagation policy.
//!
//! A bonus without a propagator flows only through plain parent→child
//! inheritance. With one, the bonus additionally becomes visible on every
//! node the policy accepts as the engine walks candidates during a query.

use serde::{Deserialize, Serialize};

use crate::core::NodeKind;

/// Decides whether a bonus attaches to a candidate destination node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Propagator {
    /// Accept every candidate node.
    AllNodes,
    /// Accept only nodes of the given kind (battle node, team node, ...).
    ToNodeKind(NodeKind),
}

impl Propagator {
    /// Should the bonus be visible on a node of `candidate` kind?
    #[must_use]
    pub fn should_attach(&self, candidate: NodeKind) -> bool {
        match self {
            Self::AllNodes => true,
            Self::ToNodeKind(kind) => *kind == candidate,
        }
    }
}
