//! Safeefah Guide - museum tour assistant for khoos palm leaf weaving
//!
//! This library provides the decision core behind the tour's voice agent:
//! - Visitor classification into three tiers (Story Explorer, Curious
//!   Seeker, History Sage)
//! - Canned answers per tier, matched by trigger phrase
//! - A text conversation loop standing in for the voice pipeline
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │        Voice pipeline (STT / LLM / TTS / VAD)        │
//! └────────────────────┬────────────────────────────────┘
//!                      │ transcript
//! ┌────────────────────▼────────────────────────────────┐
//! │            Session (profile, exit words)             │
//! └────────────────────┬────────────────────────────────┘
//!                      │ profile + question
//! ┌────────────────────▼────────────────────────────────┐
//! │      Responder  →  classify  →  AnswerTable          │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod profile;
pub mod responder;
pub mod session;
pub mod table;
pub mod tier;

pub use config::Config;
pub use error::{Error, Result};
pub use profile::UserProfile;
pub use responder::{FALLBACK_ANSWER, Reply, Responder, classify};
pub use session::Session;
pub use table::AnswerTable;
pub use tier::Tier;
