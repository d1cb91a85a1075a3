//! Question/answer tables keyed by tier
//!
//! Each tier maps trigger phrases to canned answers. Order matters: when a
//! question contains several triggers, the one authored first wins, so the
//! table is an ordered association rather than a hash map.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result, Tier};

/// Built-in answers for each tier, in authoring order
const BUILTIN: &[(Tier, &[(&str, &str)])] = &[
    (
        Tier::StoryExplorer,
        &[
            (
                "what is khoos",
                "Khoos is palm leaf weaving. People in Sharjah make baskets and mats from palm leaves.",
            ),
            (
                "how is it made",
                "We take dried palm leaves, dye them with colors, and weave them into things you can use.",
            ),
            (
                "tell me a story",
                "Long ago, kids in Sharjah played with small baskets made from khoos that their families wove by hand.",
            ),
            (
                "what are the colors",
                "The leaves are dyed with bright colors like red, green, and yellow to make it fun and pretty.",
            ),
        ],
    ),
    (
        Tier::CuriousSeeker,
        &[
            (
                "what is safeefah",
                "Safeefah is the traditional craft of weaving dried palm fronds into useful items like baskets and floor mats in the UAE.",
            ),
            (
                "where is it practiced",
                "It's mainly practiced by women in places like Dibba Al-Hisn, close to Sharjah.",
            ),
            (
                "what materials used",
                "Dried palm fronds are split, dyed with natural colors, then woven on wooden frames.",
            ),
            (
                "why different colors",
                "Colors indicate the region or family that made the item, preserving cultural identity.",
            ),
            (
                "how long does it take",
                "Some objects may take days depending on complexity and size.",
            ),
        ],
    ),
    (
        Tier::HistorySage,
        &[
            (
                "history of khoos weaving",
                "Khoos weaving is a craft dating back centuries in the Arabian Gulf, primarily practiced by Emirati women to create household goods.",
            ),
            (
                "techniques used",
                "The palm fronds are carefully split, dried, sun-bleached, dyed, and woven into intricate patterns unique to regions like Dibba Oman and Sharjah.",
            ),
            (
                "cultural significance",
                "The craft connects communities through motifs and colors that serve as identity markers and were also traded historically.",
            ),
            (
                "modern preservation",
                "Sharjah heritage centers and NGOs promote safeefah as intangible cultural heritage with workshops and exhibitions.",
            ),
            (
                "weaving patterns",
                "Patterns vary widely, some resembling geometric or natural themes, reflecting artistic evolution over generations.",
            ),
        ],
    ),
];

/// Tier → ordered (trigger phrase → answer) association
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerTable {
    tiers: IndexMap<Tier, IndexMap<String, String>>,
}

/// Map keys and values in document order, repeats included
///
/// Deserializing straight into a map would let a repeated key silently
/// overwrite the earlier one.
struct OrderedPairs<K, V>(Vec<(K, V)>);

impl<'de, K, V> Deserialize<'de> for OrderedPairs<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PairsVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
        where
            K: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = OrderedPairs<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> std::result::Result<Self::Value, M::Error> {
                let mut pairs: Vec<(K, V)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    pairs.push(pair);
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for AnswerTable {
    /// Tiers spelled more than once are merged in order; a trigger repeated
    /// within a tier is an error
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let OrderedPairs(tiers) =
            OrderedPairs::<Tier, OrderedPairs<String, String>>::deserialize(deserializer)?;
        Self::from_entries(tiers.into_iter().map(|(tier, OrderedPairs(answers))| (tier, answers)))
            .map_err(serde::de::Error::custom)
    }
}

impl Default for AnswerTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AnswerTable {
    /// The table compiled into the binary
    #[must_use]
    pub fn builtin() -> Self {
        let tiers = BUILTIN
            .iter()
            .map(|(tier, entries)| {
                let answers: IndexMap<String, String> = entries
                    .iter()
                    .map(|(trigger, answer)| ((*trigger).to_string(), (*answer).to_string()))
                    .collect();
                (*tier, answers)
            })
            .collect();

        Self { tiers }
    }

    /// Build a table from ordered entries
    ///
    /// A tier listed more than once has its entries appended in order.
    ///
    /// # Errors
    ///
    /// Returns error if a trigger is empty or repeats within its tier
    pub fn from_entries<I, E, T, A>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Tier, E)>,
        E: IntoIterator<Item = (T, A)>,
        T: Into<String>,
        A: Into<String>,
    {
        let mut tiers: IndexMap<Tier, IndexMap<String, String>> = IndexMap::new();
        for (tier, answers) in entries {
            let slot = tiers.entry(tier).or_default();
            for (trigger, answer) in answers {
                let trigger: String = trigger.into();
                if slot.contains_key(&trigger) {
                    return Err(Error::Table(format!(
                        "duplicate trigger phrase \"{trigger}\" in tier {tier}"
                    )));
                }
                slot.insert(trigger, answer.into());
            }
        }

        Self { tiers }.normalized()
    }

    /// Parse a table from JSON
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed, names an unknown tier, or
    /// contains an empty or duplicate trigger
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Table(format!("invalid JSON table: {e}")))
    }

    /// Parse a table from TOML
    ///
    /// # Errors
    ///
    /// Same conditions as [`AnswerTable::from_json`]
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Table(format!("invalid TOML table: {e}")))
    }

    /// Load a table file, choosing the format by extension (`.json` or `.toml`)
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, has an unsupported
    /// extension, or does not parse
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let table = match extension.as_deref() {
            Some("json") => Self::from_json(&std::fs::read_to_string(path)?)?,
            Some("toml") => Self::from_toml(&std::fs::read_to_string(path)?)?,
            _ => {
                return Err(Error::Table(format!(
                    "unsupported table format: {} (expected .json or .toml)",
                    path.display()
                )));
            }
        };

        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            "loaded answer table"
        );

        Ok(table)
    }

    /// Lowercase triggers and reject ones that could never match sensibly
    fn normalized(self) -> Result<Self> {
        let mut tiers = IndexMap::with_capacity(self.tiers.len());

        for (tier, answers) in self.tiers {
            let mut normalized: IndexMap<String, String> = IndexMap::with_capacity(answers.len());
            for (trigger, answer) in answers {
                let key = trigger.to_lowercase();
                if key.trim().is_empty() {
                    return Err(Error::Table(format!("empty trigger phrase in tier {tier}")));
                }
                if normalized.contains_key(&key) {
                    return Err(Error::Table(format!(
                        "duplicate trigger phrase \"{key}\" in tier {tier}"
                    )));
                }
                normalized.insert(key, answer);
            }
            tiers.insert(tier, normalized);
        }

        Ok(Self { tiers })
    }

    /// First (trigger, answer) whose trigger occurs in `question_lower`
    ///
    /// The caller lowercases the question; triggers are already lowercase.
    #[must_use]
    pub fn find(&self, tier: Tier, question_lower: &str) -> Option<(&str, &str)> {
        self.tiers.get(&tier).and_then(|answers| {
            answers
                .iter()
                .find(|(trigger, _)| question_lower.contains(trigger.as_str()))
                .map(|(trigger, answer)| (trigger.as_str(), answer.as_str()))
        })
    }

    /// Entries for a tier in matching order
    #[must_use]
    pub fn entries(&self, tier: Tier) -> impl Iterator<Item = (&str, &str)> {
        self.tiers
            .get(&tier)
            .into_iter()
            .flat_map(|answers| answers.iter().map(|(t, a)| (t.as_str(), a.as_str())))
    }

    /// Total number of entries across all tiers
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.values().map(IndexMap::len).sum()
    }

    /// Whether the table has no entries at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the table as pretty JSON, in the shape accepted by [`AnswerTable::from_json`]
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
