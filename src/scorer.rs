//! Session scoring: pure computation over generated questions and the
//! sparse index → answer map the session collected.

use std::collections::HashMap;

use crate::domain::{AnswerResult, Question, SessionReport};

/// Score a finished session.
///
/// Correctness is exact, case-sensitive string equality against the stored
/// answer; questions without a stored answer are never correct. `answered`
/// counts key presence in the map, whatever the submitted value, because
/// the session only ever inserts a key when the user picks an option.
pub fn score(questions: &[Question], submitted: &HashMap<usize, String>) -> SessionReport {
  let total = questions.len();

  let results: Vec<AnswerResult> = questions
    .iter()
    .enumerate()
    .map(|(i, q)| {
      let user_answer = submitted.get(&i).cloned().unwrap_or_default();
      let is_correct = match &q.answer {
        Some(expected) => submitted.contains_key(&i) && &user_answer == expected,
        None => false,
      };
      AnswerResult { question_id: q.id.clone(), user_answer, is_correct }
    })
    .collect();

  let answered = submitted.keys().filter(|i| **i < total).count();
  let correct = results.iter().filter(|r| r.is_correct).count();
  let percentage = if total == 0 {
    0
  } else {
    ((correct as f64 / total as f64) * 100.0).round() as u32
  };

  SessionReport { results, total, answered, correct, percentage }
}
