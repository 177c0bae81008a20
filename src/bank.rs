//! The question bank: template questions keyed by (subject, topic).
//!
//! Read-only at runtime once assembled. Built-in templates guarantee every
//! catalog (subject, topic) pair has at least one entry; extra templates can
//! be merged in from TOML config. Missing pairs are tolerated and behave as
//! an empty pool.

use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::domain::{Difficulty, Question};

pub struct QuestionBank {
  // BTreeMap keeps key iteration order stable so seeded random draws are
  // reproducible across runs.
  by_subject: BTreeMap<String, BTreeMap<String, Vec<Question>>>,
}

impl QuestionBank {
  pub fn empty() -> Self {
    QuestionBank { by_subject: BTreeMap::new() }
  }

  /// Bank pre-loaded with the built-in templates (one or more per catalog topic).
  pub fn builtin() -> Self {
    let mut bank = QuestionBank::empty();
    for q in builtin_templates() {
      bank.insert(q);
    }
    bank
  }

  /// Add a template under its (subject, topic) pair.
  pub fn insert(&mut self, q: Question) {
    self
      .by_subject
      .entry(q.subject_id.clone())
      .or_default()
      .entry(q.topic_id.clone())
      .or_default()
      .push(q);
  }

  /// Templates for a pair; absent pairs yield an empty slice.
  pub fn templates(&self, subject_id: &str, topic_id: &str) -> &[Question] {
    self
      .by_subject
      .get(subject_id)
      .and_then(|topics| topics.get(topic_id))
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Subject ids present in the bank, in sorted order.
  pub fn subject_ids(&self) -> Vec<&str> {
    self.by_subject.keys().map(|s| s.as_str()).collect()
  }

  /// Topic ids present under a subject, in sorted order.
  pub fn topic_ids(&self, subject_id: &str) -> Vec<&str> {
    self
      .by_subject
      .get(subject_id)
      .map(|topics| topics.keys().map(|s| s.as_str()).collect())
      .unwrap_or_default()
  }

  pub fn len(&self) -> usize {
    self
      .by_subject
      .values()
      .flat_map(|topics| topics.values())
      .map(|v| v.len())
      .sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Startup inventory summary by difficulty.
  pub fn log_inventory(&self) {
    let mut by_diff: HashMap<Difficulty, usize> = HashMap::new();
    for topics in self.by_subject.values() {
      for q in topics.values().flatten() {
        *by_diff.entry(q.difficulty).or_default() += 1;
      }
    }
    for (diff, count) in by_diff {
      info!(target: "question", difficulty = %diff, count, "Startup bank inventory");
    }
  }
}

#[allow(clippy::too_many_arguments)]
fn template(
  id: &str,
  subject_id: &str,
  topic_id: &str,
  text: &str,
  options: &[&str],
  answer: &str,
  explanation: &str,
  difficulty: Difficulty,
) -> Question {
  Question {
    id: id.into(),
    subject_id: subject_id.into(),
    topic_id: topic_id.into(),
    text: text.into(),
    options: options.iter().map(|s| s.to_string()).collect(),
    answer: Some(answer.into()),
    explanation: Some(explanation.into()),
    difficulty,
    created_at_ms: 0,
  }
}

/// The authored template set. Every (subject, topic) pair in the built-in
/// catalog has at least one entry here.
pub fn builtin_templates() -> Vec<Question> {
  vec![
    // English
    template(
      "eng-comp-1",
      "english",
      "comprehension",
      "Read the following passage and answer the question:\n\nJack and his sister Emma went to the beach on a sunny day. They built sandcastles and collected shells. Jack found a large blue shell that was shaped like a spiral. Emma found three small pink shells.\n\nWhat did Jack find at the beach?",
      &["A pink shell", "A large blue shell", "A bucket", "A starfish"],
      "A large blue shell",
      "The passage states that 'Jack found a large blue shell that was shaped like a spiral.'",
      Difficulty::Easy,
    ),
    template(
      "eng-vocab-1",
      "english",
      "vocabulary",
      "Which word is an antonym (opposite) of 'happy'?",
      &["Sad", "Joyful", "Pleased", "Delighted"],
      "Sad",
      "'Sad' is the opposite of 'happy', while all other options are synonyms or similar to 'happy'.",
      Difficulty::Easy,
    ),
    template(
      "eng-gram-1",
      "english",
      "grammar",
      "Which sentence is punctuated correctly?",
      &[
        "The dog barked, and the cat, ran away.",
        "The dog barked and the cat ran away.",
        "The dog barked and the cat, ran away.",
        "The, dog barked and the cat ran away.",
      ],
      "The dog barked and the cat ran away.",
      "This sentence has correct comma usage with a compound sentence structure.",
      Difficulty::Medium,
    ),
    template(
      "eng-spell-1",
      "english",
      "spelling",
      "Which word is spelled correctly?",
      &["Accomodate", "Acommodate", "Accommodate", "Acomodate"],
      "Accommodate",
      "'Accommodate' has two 'c's and two 'm's.",
      Difficulty::Hard,
    ),
    template(
      "eng-write-1",
      "english",
      "writing",
      "Which is the best opening sentence for a story about a space adventure?",
      &[
        "The day was really nice and sunny.",
        "The spaceship's engines roared to life as Captain Zara prepared for her first solo mission.",
        "Space is very big and has many planets.",
        "Captain Zara liked space travel a lot.",
      ],
      "The spaceship's engines roared to life as Captain Zara prepared for her first solo mission.",
      "This opening sentence creates interest, introduces a character, and sets the scene effectively.",
      Difficulty::Medium,
    ),
    // Mathematics
    template(
      "math-arith-1",
      "mathematics",
      "arithmetic",
      "Calculate: 347 + 598",
      &["835", "845", "935", "945"],
      "945",
      "347 + 598 = 945",
      Difficulty::Medium,
    ),
    template(
      "math-frac-1",
      "mathematics",
      "fractions",
      "Which of these is equal to 3/4?",
      &["0.25", "0.5", "0.75", "0.8"],
      "0.75",
      "3/4 = 0.75 or 75%",
      Difficulty::Medium,
    ),
    template(
      "math-geom-1",
      "mathematics",
      "geometry",
      "A rectangle has a length of 12 cm and a width of 5 cm. What is its area?",
      &["17 cm²", "34 cm²", "60 cm²", "72 cm²"],
      "60 cm²",
      "Area of rectangle = length × width = 12 × 5 = 60 cm²",
      Difficulty::Easy,
    ),
    template(
      "math-alg-1",
      "mathematics",
      "algebra",
      "If 3x + 7 = 22, what is the value of x?",
      &["3", "5", "7", "15"],
      "5",
      "3x + 7 = 22\n3x = 22 - 7\n3x = 15\nx = 5",
      Difficulty::Medium,
    ),
    template(
      "math-prob-1",
      "mathematics",
      "problemSolving",
      "Tom has 24 marbles. He gives 1/3 of them to his friend. How many marbles does Tom have left?",
      &["8", "12", "16", "20"],
      "16",
      "1/3 of 24 = 8 marbles given away. 24 - 8 = 16 marbles left.",
      Difficulty::Medium,
    ),
    // Verbal reasoning
    template(
      "vr-pattern-1",
      "verbal-reasoning",
      "wordPatterns",
      "Which word follows the same pattern as: HAND, FOOT, ARM?",
      &["HAT", "LEG", "SHOE", "GLOVE"],
      "LEG",
      "HAND, FOOT, ARM are all parts of the body. LEG is also a part of the body.",
      Difficulty::Easy,
    ),
    template(
      "vr-code-1",
      "verbal-reasoning",
      "codedWords",
      "If APPLE is coded as BQQMF, what is ORANGE coded as?",
      &["PSBOHF", "PQBMHF", "QBSHOF", "PSBOHF"],
      "PSBOHF",
      "Each letter in the code is one letter after the original (A→B, P→Q, etc.), so ORANGE becomes PSBOHF.",
      Difficulty::Medium,
    ),
    template(
      "vr-word-1",
      "verbal-reasoning",
      "wordProblems",
      "If Sarah is taller than Emma, and Emma is taller than Lucy, who is the shortest?",
      &["Sarah", "Emma", "Lucy", "Cannot be determined"],
      "Lucy",
      "If Sarah > Emma and Emma > Lucy, then Sarah > Emma > Lucy, making Lucy the shortest.",
      Difficulty::Easy,
    ),
    template(
      "vr-logic-1",
      "verbal-reasoning",
      "logicalDeduction",
      "All cats have tails. Fluffy is a cat. Does Fluffy have a tail?",
      &["Yes", "No", "Maybe", "Not enough information"],
      "Yes",
      "Since all cats have tails and Fluffy is a cat, Fluffy must have a tail.",
      Difficulty::Easy,
    ),
    template(
      "vr-analog-1",
      "verbal-reasoning",
      "analogies",
      "Hand is to Glove as Foot is to:",
      &["Leg", "Sock", "Shoe", "Toe"],
      "Shoe",
      "A glove is worn on a hand, just as a shoe is worn on a foot.",
      Difficulty::Medium,
    ),
    // Non-verbal reasoning
    template(
      "nvr-pat-1",
      "non-verbal-reasoning",
      "patterns",
      "Which shape would come next in this pattern?\n○ △ □ ○ △ □ ○ ?",
      &["○", "△", "□", "◇"],
      "△",
      "The pattern repeats every three symbols: ○ △ □, ○ △ □, ○ ?. The next shape would be △.",
      Difficulty::Easy,
    ),
    template(
      "nvr-seq-1",
      "non-verbal-reasoning",
      "sequences",
      "What number comes next in this sequence? 2, 4, 8, 16, ?",
      &["18", "24", "32", "64"],
      "32",
      "Each number is being multiplied by 2: 2 × 2 = 4, 4 × 2 = 8, 8 × 2 = 16, 16 × 2 = 32",
      Difficulty::Medium,
    ),
    template(
      "nvr-mat-1",
      "non-verbal-reasoning",
      "matrices",
      "In a 3×3 grid, if the first two columns contain circles and squares, and you need to complete the third column following the same pattern, what shape would be in the bottom right corner?",
      &["Circle", "Square", "Triangle", "Cannot be determined without seeing the grid"],
      "Cannot be determined without seeing the grid",
      "Without seeing the specific pattern in the grid, it's impossible to determine what shape would complete it.",
      Difficulty::Hard,
    ),
    template(
      "nvr-shape-1",
      "non-verbal-reasoning",
      "shapes",
      "Which of these shapes has the most sides?",
      &["Triangle", "Square", "Pentagon", "Hexagon"],
      "Hexagon",
      "A triangle has 3 sides, a square has 4, a pentagon has 5, and a hexagon has 6 sides.",
      Difficulty::Easy,
    ),
    template(
      "nvr-sym-1",
      "non-verbal-reasoning",
      "symmetry",
      "Which letter has a vertical line of symmetry?",
      &["A", "B", "C", "H"],
      "H",
      "H has a vertical line of symmetry, meaning the left half is a mirror image of the right half.",
      Difficulty::Medium,
    ),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::Catalog;

  #[test]
  fn every_catalog_pair_has_templates() {
    let cat = Catalog::builtin();
    let bank = QuestionBank::builtin();
    for subject in cat.subjects() {
      for topic in &subject.topics {
        let pool = bank.templates(&subject.id, &topic.id);
        assert!(
          !pool.is_empty(),
          "no templates for ({}, {})",
          subject.id,
          topic.id
        );
      }
    }
  }

  #[test]
  fn templates_answer_is_one_of_the_options() {
    for q in builtin_templates() {
      let answer = q.answer.as_deref().expect("builtin templates carry answers");
      assert!(
        q.options.iter().any(|o| o == answer),
        "answer of {} not among its options",
        q.id
      );
    }
  }

  #[test]
  fn missing_pairs_behave_as_empty_pools() {
    let bank = QuestionBank::builtin();
    assert!(bank.templates("mathematics", "calculus").is_empty());
    assert!(bank.templates("history", "arithmetic").is_empty());
  }

  #[test]
  fn insert_extends_an_existing_pool() {
    let mut bank = QuestionBank::builtin();
    let before = bank.templates("mathematics", "arithmetic").len();
    bank.insert(template(
      "math-arith-extra",
      "mathematics",
      "arithmetic",
      "Calculate: 12 × 12",
      &["124", "144", "154"],
      "144",
      "12 × 12 = 144",
      Difficulty::Easy,
    ));
    assert_eq!(bank.templates("mathematics", "arithmetic").len(), before + 1);
  }

  #[test]
  fn subject_and_topic_ids_are_sorted() {
    let bank = QuestionBank::builtin();
    let subjects = bank.subject_ids();
    let mut sorted = subjects.clone();
    sorted.sort_unstable();
    assert_eq!(subjects, sorted);

    let topics = bank.topic_ids("english");
    let mut sorted = topics.clone();
    sorted.sort_unstable();
    assert_eq!(topics, sorted);
  }

  #[test]
  fn template_ids_are_unique() {
    let templates = builtin_templates();
    let mut ids: Vec<&str> = templates.iter().map(|q| q.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
  }
}
