//! Practice session: a fixed-length run of generated questions with a
//! sparse answer map, a cursor, and a coarse countdown deadline.
//!
//! Everything here is synchronous; the countdown is derived from an
//! `Instant` deadline on demand rather than ticked by a background timer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, warn};

use crate::domain::{Difficulty, Question, SessionReport};
use crate::generator::Generator;
use crate::scorer;

pub struct PracticeSession {
  questions: Vec<Question>,
  /// Sparse: an index appears only once the user picks an option for it.
  answers: HashMap<usize, String>,
  current: usize,
  deadline: Instant,
  finished: bool,
}

impl PracticeSession {
  /// Generate `requested` questions up front and start the clock.
  ///
  /// Draws that come back empty are skipped, so the session may end up
  /// shorter than requested. `None` when not a single question could be
  /// generated (unknown pair or empty pool).
  pub fn new<R: Rng>(
    generator: &Generator<'_>,
    subject_id: &str,
    topic_id: &str,
    difficulty: Option<Difficulty>,
    requested: usize,
    time_limit: Duration,
    rng: &mut R,
  ) -> Option<Self> {
    let mut questions = Vec::with_capacity(requested);
    for _ in 0..requested {
      if let Some(q) = generator.generate(subject_id, topic_id, difficulty, rng) {
        questions.push(q);
      }
    }
    if questions.is_empty() {
      warn!(target: "question", subject_id, topic_id, "No questions could be generated for session");
      return None;
    }
    if questions.len() < requested {
      debug!(
        target: "question",
        subject_id,
        topic_id,
        requested,
        got = questions.len(),
        "Session shorter than requested"
      );
    }
    Some(PracticeSession {
      questions,
      answers: HashMap::new(),
      current: 0,
      deadline: Instant::now() + time_limit,
      finished: false,
    })
  }

  pub fn questions(&self) -> &[Question] {
    &self.questions
  }

  pub fn current_index(&self) -> usize {
    self.current
  }

  pub fn current_question(&self) -> &Question {
    &self.questions[self.current]
  }

  /// The answer selected for the current question, if any.
  pub fn selected_answer(&self) -> Option<&str> {
    self.answers.get(&self.current).map(|s| s.as_str())
  }

  /// Record an answer for the current question. Re-selecting overwrites.
  pub fn select_answer(&mut self, answer: String) {
    self.answers.insert(self.current, answer);
  }

  pub fn is_last(&self) -> bool {
    self.current + 1 == self.questions.len()
  }

  /// Advance the cursor; advancing past the last question finishes the
  /// session, matching the Finish button on the last card.
  pub fn next(&mut self) {
    if self.is_last() {
      self.finished = true;
    } else {
      self.current += 1;
    }
  }

  pub fn prev(&mut self) {
    self.current = self.current.saturating_sub(1);
  }

  /// Whole seconds left on the clock, saturating at zero.
  pub fn remaining_seconds(&self) -> u64 {
    self
      .deadline
      .saturating_duration_since(Instant::now())
      .as_secs()
  }

  pub fn expired(&self) -> bool {
    self.remaining_seconds() == 0
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }

  pub fn answered_count(&self) -> usize {
    self.answers.len()
  }

  /// Mark the session finished and compute the report. Scoring is pure, so
  /// calling this again returns the same report.
  pub fn finish(&mut self) -> SessionReport {
    self.finished = true;
    scorer::score(&self.questions, &self.answers)
  }
}
