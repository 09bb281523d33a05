use std::fmt;

use serde::{Deserialize, Serialize};

/// Output mode of the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Console-readable `name[r:row, c:col]=expr` lines using internal symbol names.
    #[default]
    Plain,
    /// LaTeX lines with every symbol rewritten to its node-name form.
    Markup,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Markup => "markup",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
