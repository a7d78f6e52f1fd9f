use serde::{Deserialize, Serialize};

/// Category a user can tag a finished break with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(alias = "Sem categoria")]
    Uncategorized,
    #[serde(alias = "Almoço")]
    Lunch,
    #[serde(alias = "Café")]
    Coffee,
    #[serde(alias = "Banheiro")]
    Restroom,
    #[serde(alias = "Pausa rápida")]
    QuickBreak,
    #[serde(alias = "Alongamento")]
    Stretching,
    #[serde(alias = "Outro")]
    Other,
}

impl Category {
    /// Get the display name for this category
    pub fn label(&self) -> &'static str {
        match self {
            Category::Uncategorized => "Uncategorized",
            Category::Lunch => "Lunch",
            Category::Coffee => "Coffee",
            Category::Restroom => "Restroom",
            Category::QuickBreak => "Quick break",
            Category::Stretching => "Stretching",
            Category::Other => "Other",
        }
    }

    /// Identifier used in persisted documents and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Uncategorized => "uncategorized",
            Category::Lunch => "lunch",
            Category::Coffee => "coffee",
            Category::Restroom => "restroom",
            Category::QuickBreak => "quick-break",
            Category::Stretching => "stretching",
            Category::Other => "other",
        }
    }

    /// Get all categories in picker order
    pub fn all() -> &'static [Category] {
        &[
            Category::Uncategorized,
            Category::Lunch,
            Category::Coffee,
            Category::Restroom,
            Category::QuickBreak,
            Category::Stretching,
            Category::Other,
        ]
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Uncategorized
    }
}

/// Screen currently shown by the terminal UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Config,
    Timer,
    History,
}
