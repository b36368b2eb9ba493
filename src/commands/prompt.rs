//! User input for menu commands
//!
//! Handlers ask for input through [`Prompter`] so they can run against the
//! terminal (dialoguer, behind the `cli` feature) or a scripted answer list
//! in tests.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.1.0: Add optional_integer for "blank means everyone" scopes
//! - 1.0.0: Initial release

use anyhow::Result;

/// Smallest and largest id the menu accepts
pub const MIN_ID: i64 = 1;
pub const MAX_ID: i64 = 999_999;

pub trait Prompter {
    /// Ask for an integer in `min..=max`, re-asking until one is given
    fn integer(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64>;

    /// Like `integer`, but a blank answer yields `None`
    fn optional_integer(&mut self, prompt: &str, min: i64, max: i64) -> Result<Option<i64>>;

    /// Free text; may be empty
    fn text(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no question, defaulting to no
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

fn range_error(value: i64, min: i64, max: i64) -> Option<String> {
    if value < min || value > max {
        Some(format!("Please enter a number between {min} and {max}."))
    } else {
        None
    }
}

#[cfg(feature = "cli")]
pub use terminal::DialoguerPrompter;

#[cfg(feature = "cli")]
mod terminal {
    use super::*;
    use dialoguer::{Confirm, Input};

    /// Prompts on the controlling terminal
    #[derive(Debug, Default)]
    pub struct DialoguerPrompter;

    impl Prompter for DialoguerPrompter {
        fn integer(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64> {
            let value = Input::<i64>::new()
                .with_prompt(prompt)
                .validate_with(|v: &i64| -> Result<(), String> {
                    match range_error(*v, min, max) {
                        Some(msg) => Err(msg),
                        None => Ok(()),
                    }
                })
                .interact_text()?;
            Ok(value)
        }

        fn optional_integer(&mut self, prompt: &str, min: i64, max: i64) -> Result<Option<i64>> {
            let raw = Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .validate_with(|input: &String| -> Result<(), String> {
                    let trimmed = input.trim();
                    if trimmed.is_empty() {
                        return Ok(());
                    }
                    let value: i64 = trimmed
                        .parse()
                        .map_err(|_| "Invalid input. Please enter a whole number.".to_string())?;
                    match range_error(value, min, max) {
                        Some(msg) => Err(msg),
                        None => Ok(()),
                    }
                })
                .interact_text()?;

            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.parse()?))
            }
        }

        fn text(&mut self, prompt: &str) -> Result<String> {
            let value = Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            Ok(value)
        }

        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            let answer = Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()?;
            Ok(answer)
        }
    }
}

/// Replays canned answers, for handler tests
#[cfg(test)]
pub(crate) struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No scripted answer for prompt: {prompt}"))
    }

    pub(crate) fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn integer(&mut self, prompt: &str, min: i64, max: i64) -> Result<i64> {
        // Invalid answers are skipped the way the terminal re-asks
        loop {
            let answer = self.next(prompt)?;
            if let Ok(value) = answer.trim().parse::<i64>() {
                if range_error(value, min, max).is_none() {
                    return Ok(value);
                }
            }
        }
    }

    fn optional_integer(&mut self, prompt: &str, min: i64, max: i64) -> Result<Option<i64>> {
        loop {
            let answer = self.next(prompt)?;
            let trimmed = answer.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(value) = trimmed.parse::<i64>() {
                if range_error(value, min, max).is_none() {
                    return Ok(Some(value));
                }
            }
        }
    }

    fn text(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.next(prompt)?.trim().eq_ignore_ascii_case("y"))
    }
}
