//! Visitor difficulty tiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Classification bucket that selects which answers a visitor hears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Tier {
    /// Young visitors; short story-like answers
    StoryExplorer,
    /// General audience
    CuriousSeeker,
    /// Visitors with a strong interest in history
    HistorySage,
}

impl Tier {
    /// All tiers, easiest first
    pub const ALL: [Self; 3] = [Self::StoryExplorer, Self::CuriousSeeker, Self::HistorySage];

    /// Human-readable name, e.g. "Story Explorer"
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::StoryExplorer => "Story Explorer",
            Self::CuriousSeeker => "Curious Seeker",
            Self::HistorySage => "History Sage",
        }
    }

    /// Difficulty label of the tier
    #[must_use]
    pub const fn difficulty(self) -> &'static str {
        match self {
            Self::StoryExplorer => "easy",
            Self::CuriousSeeker => "medium",
            Self::HistorySage => "hard",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Tier {
    type Err = Error;

    /// Accepts "Story Explorer", `story_explorer` or `StoryExplorer`, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "storyexplorer" => Ok(Self::StoryExplorer),
            "curiousseeker" => Ok(Self::CuriousSeeker),
            "historysage" => Ok(Self::HistorySage),
            _ => Err(Error::Table(format!("unknown tier: {s}"))),
        }
    }
}

impl TryFrom<String> for Tier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tier> for &'static str {
    fn from(tier: Tier) -> Self {
        tier.display_name()
    }
}
