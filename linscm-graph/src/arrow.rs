use std::fmt;

use serde::{Deserialize, Serialize};

/// A directed causal arrow `parent -> child`, identified by node names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Arrow {
    pub parent: String,
    pub child: String,
}

impl Arrow {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.parent == self.child
    }
}

impl<P: Into<String>, C: Into<String>> From<(P, C)> for Arrow {
    fn from((parent, child): (P, C)) -> Self {
        Self::new(parent, child)
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.parent, self.child)
    }
}
