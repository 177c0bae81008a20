//! Injected key-value persistence for the trainer's flat data: the
//! saved-question list and the login flag.
//!
//! The core engine (catalog, bank, generator, scorer) never touches this;
//! only the trainer binary does, through the `Storage` trait, so tests can
//! substitute an in-memory store.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use tracing::{error, info};

use crate::domain::Question;

pub const SAVED_QUESTIONS_KEY: &str = "saved_questions";
pub const LOGIN_FLAG_KEY: &str = "is_logged_in";
pub const USER_EMAIL_KEY: &str = "user_email";

/// Minimal key-value persistence boundary. Values are opaque strings; the
/// helpers below own the JSON encoding of structured values.
pub trait Storage {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: String) -> io::Result<()>;
  fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemStorage {
  map: BTreeMap<String, String>,
}

impl MemStorage {
  pub fn new() -> Self {
    MemStorage::default()
  }
}

impl Storage for MemStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.map.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: String) -> io::Result<()> {
    self.map.insert(key.to_string(), value);
    Ok(())
  }

  fn remove(&mut self, key: &str) -> io::Result<()> {
    self.map.remove(key);
    Ok(())
  }
}

/// One JSON object per file. The whole map is rewritten on every set, which
/// is fine for the handful of keys the trainer keeps.
pub struct JsonFileStorage {
  path: PathBuf,
  map: BTreeMap<String, String>,
}

impl JsonFileStorage {
  /// Open the backing file. A missing file starts empty; an unreadable or
  /// malformed one is logged and treated as empty rather than failing
  /// startup.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let map = match std::fs::read_to_string(&path) {
      Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(map) => {
          info!(target: "preppal", path = %path.display(), keys = map.len(), "Loaded data file");
          map
        }
        Err(e) => {
          error!(target: "preppal", path = %path.display(), error = %e, "Malformed data file; starting empty");
          BTreeMap::new()
        }
      },
      Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
      Err(e) => {
        error!(target: "preppal", path = %path.display(), error = %e, "Failed to read data file; starting empty");
        BTreeMap::new()
      }
    };
    JsonFileStorage { path, map }
  }

  fn persist(&self) -> io::Result<()> {
    let raw = serde_json::to_string_pretty(&self.map)
      .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    std::fs::write(&self.path, raw)
  }
}

impl Storage for JsonFileStorage {
  fn get(&self, key: &str) -> Option<String> {
    self.map.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: String) -> io::Result<()> {
    self.map.insert(key.to_string(), value);
    self.persist()
  }

  fn remove(&mut self, key: &str) -> io::Result<()> {
    if self.map.remove(key).is_some() {
      self.persist()?;
    }
    Ok(())
  }
}

/// Snapshots previously saved by the user. A missing or malformed blob is
/// an empty list.
pub fn saved_questions(storage: &dyn Storage) -> Vec<Question> {
  let Some(raw) = storage.get(SAVED_QUESTIONS_KEY) else {
    return Vec::new();
  };
  match serde_json::from_str(&raw) {
    Ok(list) => list,
    Err(e) => {
      error!(target: "preppal", error = %e, "Malformed saved-questions blob; ignoring");
      Vec::new()
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
  Saved,
  AlreadySaved,
}

/// Append a question snapshot, de-duplicating on (text, subject) the way
/// the session UI always has.
pub fn save_question(storage: &mut dyn Storage, q: &Question) -> io::Result<SaveOutcome> {
  let mut list = saved_questions(storage);
  let already = list
    .iter()
    .any(|s| s.text == q.text && s.subject_id == q.subject_id);
  if already {
    return Ok(SaveOutcome::AlreadySaved);
  }
  list.push(q.clone());
  let raw =
    serde_json::to_string(&list).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
  storage.set(SAVED_QUESTIONS_KEY, raw)?;
  Ok(SaveOutcome::Saved)
}

/// Login is presence of a flag, nothing more.
pub fn is_logged_in(storage: &dyn Storage) -> bool {
  storage.get(LOGIN_FLAG_KEY).as_deref() == Some("true")
}

pub fn log_in(storage: &mut dyn Storage, email: &str) -> io::Result<()> {
  storage.set(LOGIN_FLAG_KEY, "true".into())?;
  storage.set(USER_EMAIL_KEY, email.into())
}

pub fn log_out(storage: &mut dyn Storage) -> io::Result<()> {
  storage.remove(LOGIN_FLAG_KEY)?;
  storage.remove(USER_EMAIL_KEY)
}

pub fn user_email(storage: &dyn Storage) -> Option<String> {
  storage.get(USER_EMAIL_KEY)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Difficulty;

  fn snapshot(text: &str, subject_id: &str) -> Question {
    Question {
      id: format!("{}-snap", text),
      subject_id: subject_id.into(),
      topic_id: "arithmetic".into(),
      text: text.into(),
      options: vec![],
      answer: None,
      explanation: None,
      difficulty: Difficulty::Easy,
      created_at_ms: 1,
    }
  }

  #[test]
  fn saved_questions_start_empty() {
    let storage = MemStorage::new();
    assert!(saved_questions(&storage).is_empty());
  }

  #[test]
  fn save_question_round_trips_through_json() {
    let mut storage = MemStorage::new();
    let q = snapshot("Calculate: 1 + 1", "mathematics");
    assert_eq!(save_question(&mut storage, &q).unwrap(), SaveOutcome::Saved);
    let list = saved_questions(&storage);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].text, q.text);
  }

  #[test]
  fn duplicate_saves_are_rejected_by_text_and_subject() {
    let mut storage = MemStorage::new();
    let q = snapshot("Calculate: 1 + 1", "mathematics");
    save_question(&mut storage, &q).unwrap();
    // Same text and subject, different generated id: still a duplicate.
    let mut again = q.clone();
    again.id = "other-id".into();
    assert_eq!(
      save_question(&mut storage, &again).unwrap(),
      SaveOutcome::AlreadySaved
    );
    // Same text under another subject is a distinct question.
    let other = snapshot("Calculate: 1 + 1", "english");
    assert_eq!(save_question(&mut storage, &other).unwrap(), SaveOutcome::Saved);
    assert_eq!(saved_questions(&storage).len(), 2);
  }

  #[test]
  fn malformed_saved_blob_is_treated_as_empty() {
    let mut storage = MemStorage::new();
    storage.set(SAVED_QUESTIONS_KEY, "not json".into()).unwrap();
    assert!(saved_questions(&storage).is_empty());
  }

  #[test]
  fn login_flag_round_trip() {
    let mut storage = MemStorage::new();
    assert!(!is_logged_in(&storage));
    log_in(&mut storage, "kid@example.com").unwrap();
    assert!(is_logged_in(&storage));
    assert_eq!(user_email(&storage).as_deref(), Some("kid@example.com"));
    log_out(&mut storage).unwrap();
    assert!(!is_logged_in(&storage));
    assert!(user_email(&storage).is_none());
  }

  #[test]
  fn only_the_exact_flag_value_counts_as_logged_in() {
    let mut storage = MemStorage::new();
    storage.set(LOGIN_FLAG_KEY, "yes".into()).unwrap();
    assert!(!is_logged_in(&storage));
  }

  #[test]
  fn json_file_storage_persists_across_reopen() {
    let path = std::env::temp_dir().join(format!("preppal-test-{}.json", uuid::Uuid::new_v4()));
    {
      let mut storage = JsonFileStorage::open(&path);
      storage.set("k", "v".into()).unwrap();
    }
    {
      let storage = JsonFileStorage::open(&path);
      assert_eq!(storage.get("k").as_deref(), Some("v"));
    }
    let _ = std::fs::remove_file(&path);
  }

  #[test]
  fn json_file_storage_tolerates_a_malformed_file() {
    let path = std::env::temp_dir().join(format!("preppal-test-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, "{{ nope").unwrap();
    let storage = JsonFileStorage::open(&path);
    assert!(storage.get("k").is_none());
    let _ = std::fs::remove_file(&path);
  }
}
