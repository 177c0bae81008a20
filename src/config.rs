//! Loading trainer configuration (session defaults + extra bank questions)
//! from TOML.
//!
//! Set `PREPPAL_CONFIG_PATH` to point at the file. Any read or parse
//! failure is logged and the built-in defaults are used instead.

use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::catalog::Catalog;
use crate::domain::{Difficulty, Question};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub session: SessionDefaults,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SessionDefaults {
  #[serde(default = "default_num_questions")]
  pub num_questions: usize,
  #[serde(default = "default_time_minutes")]
  pub time_minutes: u64,
}

impl Default for SessionDefaults {
  fn default() -> Self {
    SessionDefaults {
      num_questions: default_num_questions(),
      time_minutes: default_time_minutes(),
    }
  }
}

fn default_num_questions() -> usize {
  5
}

fn default_time_minutes() -> u64 {
  15
}

/// Question entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  #[serde(default)] pub id: Option<String>,
  pub subject: String,
  pub topic: String,
  #[serde(default)] pub text: Option<String>,
  #[serde(default)] pub options: Vec<String>,
  #[serde(default)] pub answer: Option<String>,
  #[serde(default)] pub explanation: Option<String>,
  /// easy | medium | hard; absent means medium.
  #[serde(default)] pub difficulty: Option<String>,
}

/// Attempt to load `AppConfig` from PREPPAL_CONFIG_PATH. On any parsing/IO
/// error, returns None.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("PREPPAL_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "preppal", %path, extra_questions = cfg.questions.len(), "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "preppal", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "preppal", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

pub fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str(s)
}

/// Merge config questions into the bank. Entries that cannot become valid
/// templates are skipped with a log, never a panic. Returns how many were
/// merged.
pub fn merge_into_bank(cfg: &AppConfig, catalog: &Catalog, bank: &mut QuestionBank) -> usize {
  let mut merged = 0;
  for qc in &cfg.questions {
    let id = qc
      .id
      .clone()
      .unwrap_or_else(|| format!("cfg-{}", Uuid::new_v4().simple()));

    let text = match &qc.text {
      Some(t) if !t.trim().is_empty() => t.clone(),
      _ => {
        error!(target: "question", %id, subject = %qc.subject, topic = %qc.topic, "Skipping config question: missing text");
        continue;
      }
    };

    let difficulty = match &qc.difficulty {
      None => Difficulty::Medium,
      Some(tag) => match Difficulty::parse(tag) {
        Some(d) => d,
        None => {
          error!(target: "question", %id, %tag, "Skipping config question: unknown difficulty");
          continue;
        }
      },
    };

    // The generator validates pairs against the catalog, so a template under
    // an unknown pair could never be drawn.
    if catalog.topic_by_id(&qc.subject, &qc.topic).is_none() {
      warn!(target: "question", %id, subject = %qc.subject, topic = %qc.topic, "Skipping config question: pair not in catalog");
      continue;
    }

    bank.insert(Question {
      id,
      subject_id: qc.subject.clone(),
      topic_id: qc.topic.clone(),
      text,
      options: qc.options.clone(),
      answer: qc.answer.clone(),
      explanation: qc.explanation.clone(),
      difficulty,
      created_at_ms: 0,
    });
    merged += 1;
  }
  merged
}
