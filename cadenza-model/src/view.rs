use std::str::FromStr;

use crate::error::ModelError;

/// Which presentation of the item set is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewKind {
    #[default]
    Carousel,
    Grid,
}

impl ViewKind {
    pub const ALL: [Self; 2] = [Self::Carousel, Self::Grid];

    /// Persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::Grid => "grid",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Carousel => Self::Grid,
            Self::Grid => Self::Carousel,
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "carousel" => Ok(Self::Carousel),
            "grid" => Ok(Self::Grid),
            other => Err(ModelError::UnknownView(other.to_string())),
        }
    }
}
