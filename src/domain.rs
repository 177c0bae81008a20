//! Domain models: difficulty tags, questions, and scored results.

use serde::{Deserialize, Serialize};

/// Closed set of difficulty tags carried by every template question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  /// Parse a user/config supplied tag. Anything unrecognized is `None`;
  /// callers treat that as "no filter" or skip the entry.
  pub fn parse(s: &str) -> Option<Difficulty> {
    match s.trim().to_ascii_lowercase().as_str() {
      "easy" => Some(Difficulty::Easy),
      "medium" => Some(Difficulty::Medium),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl std::fmt::Display for Difficulty {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A practice question. Templates live permanently in the bank; generated
/// copies carry a freshly minted id and `created_at_ms`.
///
/// Invariant (satisfied by the authored bank data, not enforced at runtime):
/// when `options` is non-empty, `answer` equals one of its elements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
  pub id: String,
  pub subject_id: String,
  pub topic_id: String,
  pub text: String,
  #[serde(default)] pub options: Vec<String>,
  #[serde(default)] pub answer: Option<String>,
  #[serde(default)] pub explanation: Option<String>,
  pub difficulty: Difficulty,
  /// Unix millis at generation time; 0 for bank templates.
  #[serde(default)] pub created_at_ms: u64,
}

/// Per-question outcome, derived once when a session finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
  pub question_id: String,
  /// Empty string when the question was never answered.
  pub user_answer: String,
  pub is_correct: bool,
}

/// Aggregate outcome of a finished practice session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
  pub results: Vec<AnswerResult>,
  pub total: usize,
  /// Count of question indices the user submitted anything for. Presence in
  /// the answer map is what counts, not the submitted value.
  pub answered: usize,
  pub correct: usize,
  pub percentage: u32,
}
