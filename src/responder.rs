//! Tier classification and canned-answer lookup
//!
//! The responder is the whole decision core of the assistant: it sorts a
//! visitor into a [`Tier`] and answers by substring match against that
//! tier's table. It holds no mutable state and never fails.

use crate::{AnswerTable, Tier, UserProfile};

/// Reply used when no trigger phrase matches the question
pub const FALLBACK_ANSWER: &str = "That's an interesting question! I don't have an answer prepared, but feel free to ask about khoos weaving or its history.";

/// Interest keywords that mark a visitor as history-minded
const HISTORY_KEYWORDS: [&str; 3] = ["high", "strong", "yes"];

/// Classify a visitor into a tier
///
/// Children (12 and under) are Story Explorers whatever they say about
/// history. Everyone older is a History Sage when their interest answer
/// contains "high", "strong" or "yes", and a Curious Seeker otherwise.
#[must_use]
#[allow(clippy::if_same_then_else)]
pub fn classify(profile: &UserProfile) -> Tier {
    let age = profile.age;
    let interest = profile.interest_in_history.to_lowercase();
    let keen = HISTORY_KEYWORDS.iter().any(|k| interest.contains(k));

    let tier = if age <= 12 {
        Tier::StoryExplorer
    } else if (13..=50).contains(&age) {
        if keen { Tier::HistorySage } else { Tier::CuriousSeeker }
    } else if age > 50 {
        // Same split as adults for now; elders may get their own rule later
        if keen { Tier::HistorySage } else { Tier::CuriousSeeker }
    } else {
        Tier::CuriousSeeker
    };

    tracing::debug!(age, keen, tier = %tier, "classified visitor");
    tier
}

/// Outcome of answering one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<'a> {
    /// Tier the visitor was placed in
    pub tier: Tier,
    /// Trigger phrase that fired, if any
    pub trigger: Option<&'a str>,
    /// Text to speak back
    pub text: &'a str,
}

impl Reply<'_> {
    /// Whether the fallback was used
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.trigger.is_none()
    }
}

/// Answers visitor questions from an [`AnswerTable`]
#[derive(Debug, Clone, Default)]
pub struct Responder {
    table: AnswerTable,
}

impl Responder {
    /// Create a responder over the given table
    #[must_use]
    pub const fn new(table: AnswerTable) -> Self {
        Self { table }
    }

    /// The table this responder answers from
    #[must_use]
    pub const fn table(&self) -> &AnswerTable {
        &self.table
    }

    /// Answer a question for a tier, falling back to [`FALLBACK_ANSWER`]
    #[must_use]
    pub fn answer(&self, tier: Tier, question: &str) -> &str {
        self.lookup(tier, question).text
    }

    /// Classify the visitor, then answer their question
    #[must_use]
    pub fn converse(&self, profile: &UserProfile, question: &str) -> &str {
        self.reply(profile, question).text
    }

    /// Like [`Responder::converse`], but also reports the tier and matched trigger
    #[must_use]
    pub fn reply(&self, profile: &UserProfile, question: &str) -> Reply<'_> {
        self.lookup(classify(profile), question)
    }

    fn lookup(&self, tier: Tier, question: &str) -> Reply<'_> {
        let question_lower = question.to_lowercase();

        match self.table.find(tier, &question_lower) {
            Some((trigger, text)) => {
                tracing::debug!(tier = %tier, trigger, "matched trigger phrase");
                Reply {
                    tier,
                    trigger: Some(trigger),
                    text,
                }
            }
            None => {
                tracing::debug!(tier = %tier, question = %question_lower, "no trigger matched");
                Reply {
                    tier,
                    trigger: None,
                    text: FALLBACK_ANSWER,
                }
            }
        }
    }
}
