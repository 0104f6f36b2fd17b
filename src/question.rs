//! Question content shown inside the floating panel.
//!
//! Hosts may supply their own question as JSON; otherwise the built-in
//! "Two Sum" sample is used.

use std::fs;
use std::path::Path;

use indoc::indoc;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl From<String> for Difficulty {
    /// Unknown labels fall back to `Easy`.
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.label().to_string()
    }
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn badge_color(self) -> Color {
        match self {
            Difficulty::Easy => Color::Green,
            Difficulty::Medium => Color::Yellow,
            Difficulty::Hard => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Default for Question {
    fn default() -> Self {
        Self::two_sum()
    }
}

impl Question {
    pub fn two_sum() -> Self {
        let example = |input: &str, output: &str, explanation: Option<&str>| Example {
            input: input.to_string(),
            output: output.to_string(),
            explanation: explanation.map(str::to_string),
        };
        Self {
            title: "Two Sum".to_string(),
            difficulty: Difficulty::Easy,
            description: indoc! {"
                Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.

                You may assume that each input would have exactly one solution, and you may not use the same element twice.

                You can return the answer in any order."}
            .to_string(),
            examples: vec![
                example(
                    "nums = [2,7,11,15], target = 9",
                    "[0,1]",
                    Some("Because nums[0] + nums[1] == 9, we return [0, 1]."),
                ),
                example("nums = [3,2,4], target = 6", "[1,2]", None),
                example("nums = [3,3], target = 6", "[0,1]", None),
            ],
            constraints: vec![
                "2 ≤ nums.length ≤ 10⁴".to_string(),
                "-10⁹ ≤ nums[i] ≤ 10⁹".to_string(),
                "-10⁹ ≤ target ≤ 10⁹".to_string(),
                "Only one valid answer exists.".to_string(),
            ],
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, QuestionError> {
        let text = fs::read_to_string(path).map_err(|source| QuestionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let question = Self::from_json(&text).map_err(|source| QuestionError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        question.validate()?;
        Ok(question)
    }

    /// Host-supplied question, or the built-in sample when none is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, QuestionError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), QuestionError> {
        if self.title.trim().is_empty() {
            return Err(QuestionError::Invalid("title"));
        }
        if self.description.trim().is_empty() {
            return Err(QuestionError::Invalid("description"));
        }
        Ok(())
    }
}
