use serde::{Deserialize, Serialize};

/// A task label as stored by the backend.
///
/// Older rows carry bare strings while newer ones carry full label records;
/// both shapes deserialize into this type. Anything that matches or groups by
/// label goes through [`Label::display_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Plain(String),
    Styled {
        id: String,
        name: String,
        #[serde(default)]
        color: String,
    },
}

impl Label {
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    pub fn styled(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::Styled {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::Styled { name, .. } => name,
        }
    }
}
