//! Static registry of exam subjects and their topics.
//!
//! Built once at startup and never mutated. Lookups return `Option`:
//! absence of a caller-supplied id is a normal outcome, not an error.

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct Subject {
  pub id: String,
  pub name: String,
  pub icon: String,
  pub topics: Vec<Topic>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Topic {
  pub id: String,
  pub name: String,
  pub description: String,
}

pub struct Catalog {
  subjects: Vec<Subject>,
}

impl Catalog {
  /// Build the built-in 11+ exam catalog.
  pub fn builtin() -> Self {
    Catalog { subjects: builtin_subjects() }
  }

  pub fn subjects(&self) -> &[Subject] {
    &self.subjects
  }

  /// Linear scan by exact id match.
  pub fn subject_by_id(&self, id: &str) -> Option<&Subject> {
    self.subjects.iter().find(|s| s.id == id)
  }

  /// Resolves the subject first; an unknown subject propagates as `None`.
  pub fn topic_by_id(&self, subject_id: &str, topic_id: &str) -> Option<&Topic> {
    let subject = self.subject_by_id(subject_id)?;
    subject.topics.iter().find(|t| t.id == topic_id)
  }
}

fn topic(id: &str, name: &str, description: &str) -> Topic {
  Topic { id: id.into(), name: name.into(), description: description.into() }
}

fn builtin_subjects() -> Vec<Subject> {
  vec![
    Subject {
      id: "english".into(),
      name: "English".into(),
      icon: "📝".into(),
      topics: vec![
        topic("comprehension", "Comprehension", "Understanding and analyzing written passages"),
        topic("vocabulary", "Vocabulary", "Word meanings, synonyms, antonyms, and context"),
        topic("grammar", "Grammar", "Sentence structure, parts of speech, and punctuation"),
        topic("spelling", "Spelling", "Common spelling rules and exceptions"),
        topic("writing", "Writing", "Creative writing and essay structure"),
      ],
    },
    Subject {
      id: "mathematics".into(),
      name: "Mathematics".into(),
      icon: "🔢".into(),
      topics: vec![
        topic("arithmetic", "Arithmetic", "Addition, subtraction, multiplication, and division"),
        topic("fractions", "Fractions", "Working with fractions, decimals, and percentages"),
        topic("geometry", "Geometry", "Shapes, angles, area, and perimeter"),
        topic("algebra", "Algebra", "Basic algebraic concepts and equations"),
        topic("problemSolving", "Problem Solving", "Word problems and logical thinking"),
      ],
    },
    Subject {
      id: "verbal-reasoning".into(),
      name: "Verbal Reasoning".into(),
      icon: "🔤".into(),
      topics: vec![
        topic("wordPatterns", "Word Patterns", "Identifying patterns in words and letters"),
        topic("codedWords", "Coded Words", "Deciphering coded messages and substitutions"),
        topic("wordProblems", "Word Problems", "Solving problems presented in text form"),
        topic("logicalDeduction", "Logical Deduction", "Drawing conclusions from given information"),
        topic("analogies", "Analogies", "Understanding relationships between words"),
      ],
    },
    Subject {
      id: "non-verbal-reasoning".into(),
      name: "Non-Verbal Reasoning".into(),
      icon: "📊".into(),
      topics: vec![
        topic("patterns", "Patterns", "Identifying and continuing visual patterns"),
        topic("sequences", "Sequences", "Finding the next item in a sequence"),
        topic("matrices", "Matrices", "Completing matrices based on logical rules"),
        topic("shapes", "Shapes", "Analyzing and manipulating 2D and 3D shapes"),
        topic("symmetry", "Symmetry", "Identifying symmetrical properties of shapes"),
      ],
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn subject_lookup_finds_known_ids() {
    let cat = Catalog::builtin();
    let s = cat.subject_by_id("mathematics").unwrap();
    assert_eq!(s.name, "Mathematics");
    assert_eq!(s.topics.len(), 5);
  }

  #[test]
  fn subject_lookup_is_exact_match() {
    let cat = Catalog::builtin();
    assert!(cat.subject_by_id("Mathematics").is_none());
    assert!(cat.subject_by_id("physics").is_none());
    assert!(cat.subject_by_id("").is_none());
  }

  #[test]
  fn topic_lookup_resolves_under_subject() {
    let cat = Catalog::builtin();
    let t = cat.topic_by_id("english", "spelling").unwrap();
    assert_eq!(t.name, "Spelling");
  }

  #[test]
  fn topic_lookup_propagates_unknown_subject() {
    let cat = Catalog::builtin();
    // "arithmetic" exists, but only under "mathematics".
    assert!(cat.topic_by_id("english", "arithmetic").is_none());
    assert!(cat.topic_by_id("nope", "arithmetic").is_none());
  }

  #[test]
  fn builtin_catalog_has_four_subjects_with_unique_ids() {
    let cat = Catalog::builtin();
    assert_eq!(cat.subjects().len(), 4);
    let mut ids: Vec<&str> = cat.subjects().iter().map(|s| s.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
  }
}
