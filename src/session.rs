//! Text conversation with a visitor
//!
//! Stands in for the voice agent: greet, ask for age and interest in
//! history, then answer questions until the visitor leaves. The voice
//! pipeline would feed transcripts in and synthesize the lines written out.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::SessionConfig;
use crate::profile::parse_age;
use crate::{Responder, Result, Tier, UserProfile, classify};

/// Standing instructions for the assistant
pub const INSTRUCTIONS: &str = "You answer predefined questions about safeefah (khoos) palm leaf weaving. \
Users are classified into three areas: Story Explorer (easy), Curious Seeker (medium), History Sage (hard). \
Provide answers from the Q&A database based on user questions and their experience level.";

/// Opening line when none is configured
pub const DEFAULT_GREETING: &str = "Welcome to the safeefah gallery! Before we start, tell me your age and how interested you are in the history of Sharjah.";

/// Words that end a conversation when none are configured
pub const DEFAULT_EXIT_WORDS: [&str; 3] = ["quit", "exit", "bye"];

const AGE_PROMPT: &str = "How old are you?";
const INTEREST_PROMPT: &str = "How interested are you in the history of Sharjah?";
const QUESTION_PROMPT: &str = "> ";
const FAREWELL: &str = "Goodbye!";

/// One visitor's conversation
pub struct Session<'a> {
    responder: &'a Responder,
    config: &'a SessionConfig,
    prompt: bool,
}

impl<'a> Session<'a> {
    /// Create a session answering from `responder`
    #[must_use]
    pub const fn new(responder: &'a Responder, config: &'a SessionConfig) -> Self {
        Self {
            responder,
            config,
            prompt: true,
        }
    }

    /// Toggle the "> " marker written before each question
    #[must_use]
    pub const fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Run the conversation to completion
    ///
    /// Returns the number of questions answered. Ends on an exit word or
    /// end of input.
    ///
    /// # Errors
    ///
    /// Returns error if reading or writing fails
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        write_line(&mut writer, &self.config.greeting).await?;

        let Some(profile) = collect_profile(&mut reader, &mut writer).await? else {
            tracing::debug!("input ended before profile was complete");
            write_line(&mut writer, FAREWELL).await?;
            return Ok(0);
        };

        let tier = classify(&profile);
        tracing::info!(age = profile.age, tier = %tier, "visitor joined");
        write_line(&mut writer, &tier_announcement(tier)).await?;

        let mut answered = 0;
        loop {
            if self.prompt {
                writer.write_all(QUESTION_PROMPT.as_bytes()).await?;
                writer.flush().await?;
            }

            let Some(line) = read_line(&mut reader).await? else {
                break;
            };

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if self.is_exit(question) {
                break;
            }

            let reply = self.responder.reply(&profile, question);
            tracing::debug!(trigger = ?reply.trigger, "answered question");
            write_line(&mut writer, reply.text).await?;
            answered += 1;
        }

        write_line(&mut writer, FAREWELL).await?;
        tracing::info!(answered, "visitor left");
        Ok(answered)
    }

    fn is_exit(&self, question: &str) -> bool {
        let lowered = question.to_lowercase();
        self.config.exit_words.iter().any(|w| *w == lowered)
    }
}

/// Line spoken once the visitor's tier is known
#[must_use]
pub fn tier_announcement(tier: Tier) -> String {
    format!("You're a {tier}! Ask me anything about khoos weaving.")
}

/// Ask for age and interest; `None` if input ends first
async fn collect_profile<R, W>(reader: &mut R, writer: &mut W) -> Result<Option<UserProfile>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_line(writer, AGE_PROMPT).await?;
    let Some(age_answer) = read_line(reader).await? else {
        return Ok(None);
    };
    let age = parse_age(&age_answer).unwrap_or_else(|| {
        tracing::debug!(answer = %age_answer.trim(), "no age in answer, using 0");
        0
    });

    write_line(writer, INTEREST_PROMPT).await?;
    let Some(interest) = read_line(reader).await? else {
        return Ok(None);
    };

    Ok(Some(UserProfile::new(age, interest.trim())))
}

/// Read one line; `None` at end of input
async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).await?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_announcement() {
        assert_eq!(
            tier_announcement(Tier::HistorySage),
            "You're a History Sage! Ask me anything about khoos weaving."
        );
    }

    #[test]
    fn test_instructions_name_all_tiers() {
        for tier in Tier::ALL {
            assert!(INSTRUCTIONS.contains(&format!("{} ({})", tier, tier.difficulty())));
        }
    }

    #[test]
    fn test_exit_words_case_insensitive() {
        let responder = Responder::default();
        let config = SessionConfig::default();
        let session = Session::new(&responder, &config);
        assert!(session.is_exit("Bye"));
        assert!(session.is_exit("QUIT"));
        assert!(!session.is_exit("bye bye"));
    }
}
