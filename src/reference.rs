//! Signed references to circuit nodes.

use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// A handle to a node (input or gate) inside one circuit's node list.
///
/// Handles are only meaningful for the circuit that issued them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the position of the node in the circuit's node list.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A possibly-negated reference to a circuit node.
///
/// The sign lives in the value itself, so double negation is involutive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeRef(i32);

impl NodeRef {
    pub const fn positive(id: NodeId) -> Self {
        Self(id.0 as i32 + 1)
    }

    pub const fn negative(id: NodeId) -> Self {
        Self(-(id.0 as i32 + 1))
    }

    pub const fn is_negated(&self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the handle of the referenced node, sign stripped.
    pub const fn id(self) -> NodeId {
        NodeId(self.0.unsigned_abs() - 1)
    }
}

impl Neg for NodeRef {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for NodeId {
    type Output = NodeRef;

    fn neg(self) -> Self::Output {
        NodeRef::negative(self)
    }
}

impl From<NodeId> for NodeRef {
    fn from(id: NodeId) -> Self {
        NodeRef::positive(id)
    }
}

impl Display for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}",
            if self.is_negated() { "~" } else { "" },
            self.id().index()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_roundtrip() {
        let id = NodeId::new(0);
        let r = NodeRef::positive(id);
        assert!(!r.is_negated());
        assert!((-r).is_negated());
        assert_eq!(-(-r), r);
        assert_eq!(r.id(), id);
        assert_eq!((-r).id(), id);
    }

    #[test]
    fn test_id_negation() {
        let id = NodeId::new(41);
        let r = -id;
        assert!(r.is_negated());
        assert_eq!(r.id().index(), 41);
        assert_eq!(NodeRef::from(id), -r);
    }
}
