//! Terminal practice trainer: menu, session setup, the question loop, and
//! the results screen.
//!
//! All interaction goes through `BufRead`/`Write` handles so the whole flow
//! can be driven by scripted input in tests. The core engine stays behind
//! the `Generator`/`PracticeSession` seams; this module is only plumbing.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use rand::Rng;
use tracing::info;

use crate::bank::QuestionBank;
use crate::catalog::Catalog;
use crate::config::SessionDefaults;
use crate::domain::{Difficulty, Question, SessionReport};
use crate::generator::Generator;
use crate::session::PracticeSession;
use crate::storage::{self, SaveOutcome, Storage};
use crate::util::format_mmss;

/// Top-level menu loop. Returns when the user quits or input ends.
pub fn run<R: Rng>(
  input: &mut dyn BufRead,
  out: &mut dyn Write,
  catalog: &Catalog,
  bank: &QuestionBank,
  store: &mut dyn Storage,
  defaults: &SessionDefaults,
  rng: &mut R,
) -> io::Result<()> {
  let generator = Generator::new(catalog, bank);

  writeln!(out, "11+ Prep Pal — practice questions for 11+ exam success")?;
  loop {
    writeln!(out)?;
    writeln!(out, "Commands: practice · random · saved · login · logout · quit")?;
    write!(out, "> ")?;
    out.flush()?;
    let Some(line) = read_line(input)? else { return Ok(()) };

    match line.as_str() {
      "practice" => {
        if !storage::is_logged_in(store) {
          writeln!(out, "Please log in first (command: login).")?;
          continue;
        }
        start_practice(input, out, catalog, &generator, store, defaults, rng)?;
      }
      "random" => random_question(input, out, &generator, rng)?,
      "saved" => list_saved(out, store)?,
      "login" => {
        write!(out, "Email: ")?;
        out.flush()?;
        let Some(email) = read_line(input)? else { return Ok(()) };
        storage::log_in(store, &email)?;
        writeln!(out, "Logged in as {}.", email)?;
      }
      "logout" => {
        storage::log_out(store)?;
        writeln!(out, "Logged out.")?;
      }
      "quit" | "q" => return Ok(()),
      "" => {}
      other => writeln!(out, "Unknown command: {}", other)?,
    }
  }
}

/// Subject → topic → difficulty → length/time setup, then the session loop.
fn start_practice<R: Rng>(
  input: &mut dyn BufRead,
  out: &mut dyn Write,
  catalog: &Catalog,
  generator: &Generator<'_>,
  store: &mut dyn Storage,
  defaults: &SessionDefaults,
  rng: &mut R,
) -> io::Result<()> {
  writeln!(out, "Subjects:")?;
  for (i, s) in catalog.subjects().iter().enumerate() {
    writeln!(out, "  {}. {} {}", i + 1, s.icon, s.name)?;
  }
  write!(out, "Subject (number or id): ")?;
  out.flush()?;
  let Some(line) = read_line(input)? else { return Ok(()) };
  let Some(subject) = pick(catalog.subjects(), &line, |s| &s.id) else {
    writeln!(out, "No such subject.")?;
    return Ok(());
  };

  writeln!(out, "Topics in {}:", subject.name)?;
  for (i, t) in subject.topics.iter().enumerate() {
    writeln!(out, "  {}. {} — {}", i + 1, t.name, t.description)?;
  }
  write!(out, "Topic (number or id): ")?;
  out.flush()?;
  let Some(line) = read_line(input)? else { return Ok(()) };
  let Some(topic) = pick(&subject.topics, &line, |t| &t.id) else {
    writeln!(out, "No such topic.")?;
    return Ok(());
  };

  write!(out, "Difficulty (easy/medium/hard, blank for mixed): ")?;
  out.flush()?;
  let Some(line) = read_line(input)? else { return Ok(()) };
  let difficulty = Difficulty::parse(&line);
  if difficulty.is_none() && !line.is_empty() {
    writeln!(out, "Unrecognized difficulty, using mixed.")?;
  }

  write!(out, "Number of questions [{}]: ", defaults.num_questions)?;
  out.flush()?;
  let Some(line) = read_line(input)? else { return Ok(()) };
  let requested = line.parse::<usize>().ok().filter(|n| *n > 0).unwrap_or(defaults.num_questions);

  write!(out, "Time limit in minutes [{}]: ", defaults.time_minutes)?;
  out.flush()?;
  let Some(line) = read_line(input)? else { return Ok(()) };
  let minutes = line.parse::<u64>().ok().filter(|m| *m > 0).unwrap_or(defaults.time_minutes);

  let Some(mut session) = PracticeSession::new(
    generator,
    &subject.id,
    &topic.id,
    difficulty,
    requested,
    Duration::from_secs(minutes * 60),
    rng,
  ) else {
    writeln!(out, "Sorry, no questions are available for that topic right now.")?;
    return Ok(());
  };

  info!(
    target: "preppal",
    subject = %subject.id,
    topic = %topic.id,
    questions = session.questions().len(),
    minutes,
    "Practice session started"
  );
  writeln!(out, "{}: {} — {} questions, {} minutes. Good luck!",
    subject.name, topic.name, session.questions().len(), minutes)?;

  let report = session_loop(input, out, &mut session, store)?;
  print_report(out, session.questions(), &report)?;
  info!(
    target: "preppal",
    answered = report.answered,
    correct = report.correct,
    percentage = report.percentage,
    "Practice session finished"
  );
  Ok(())
}

/// One question per screen until the user finishes or the clock runs out.
fn session_loop(
  input: &mut dyn BufRead,
  out: &mut dyn Write,
  session: &mut PracticeSession,
  store: &mut dyn Storage,
) -> io::Result<SessionReport> {
  loop {
    if session.expired() {
      writeln!(out, "Time's up!")?;
      return Ok(session.finish());
    }

    let total = session.questions().len();
    let index = session.current_index();
    let q = session.current_question().clone();
    writeln!(out)?;
    writeln!(
      out,
      "Question {} of {} · {} · {} left",
      index + 1,
      total,
      q.difficulty,
      format_mmss(session.remaining_seconds())
    )?;
    writeln!(out, "{}", q.text)?;
    for (i, option) in q.options.iter().enumerate() {
      let letter = (b'A' + i as u8) as char;
      let mark = if session.selected_answer() == Some(option.as_str()) { "*" } else { " " };
      writeln!(out, " {}{}) {}", mark, letter, option)?;
    }
    if q.options.is_empty() {
      writeln!(out, "(type your answer)")?;
    }

    let finish_label = if session.is_last() { "f finish" } else { "f finish early" };
    write!(out, "[answer · n next · p prev · s save · {}] > ", finish_label)?;
    out.flush()?;
    let Some(line) = read_line(input)? else { return Ok(session.finish()) };

    match line.as_str() {
      "n" | "" => {
        session.next();
        if session.is_finished() {
          writeln!(out, "Practice session completed!")?;
          return Ok(session.finish());
        }
      }
      "p" => session.prev(),
      "s" => match storage::save_question(store, &q)? {
        SaveOutcome::Saved => writeln!(out, "Question saved to your collection.")?,
        SaveOutcome::AlreadySaved => {
          writeln!(out, "This question is already in your saved collection.")?
        }
      },
      "f" => {
        writeln!(out, "Practice session completed!")?;
        return Ok(session.finish());
      }
      answer => {
        if q.options.is_empty() {
          session.select_answer(answer.to_string());
        } else if let Some(option) = option_for(&q, answer) {
          session.select_answer(option);
        } else {
          writeln!(out, "No such option.")?;
        }
      }
    }
  }
}

/// Map an input line to an option: a letter (A, b, ...) or the literal text.
fn option_for(q: &Question, line: &str) -> Option<String> {
  let trimmed = line.trim();
  if trimmed.len() == 1 {
    let c = trimmed.chars().next()?.to_ascii_uppercase();
    if c.is_ascii_uppercase() {
      let idx = (c as u8 - b'A') as usize;
      return q.options.get(idx).cloned();
    }
  }
  q.options.iter().find(|o| o.as_str() == trimmed).cloned()
}

fn print_report(
  out: &mut dyn Write,
  questions: &[Question],
  report: &SessionReport,
) -> io::Result<()> {
  writeln!(out)?;
  writeln!(
    out,
    "You've answered {} out of {} questions.",
    report.answered, report.total
  )?;
  for (q, r) in questions.iter().zip(&report.results) {
    let mark = if r.is_correct { "✓" } else { "✗" };
    let shown = if r.user_answer.is_empty() { "(no answer)" } else { r.user_answer.as_str() };
    writeln!(out, " {} {}", mark, first_line(&q.text))?;
    writeln!(out, "   your answer: {}", shown)?;
    if !r.is_correct {
      if let Some(expected) = &q.answer {
        writeln!(out, "   correct answer: {}", expected)?;
      }
      if let Some(explanation) = &q.explanation {
        writeln!(out, "   {}", explanation)?;
      }
    }
  }
  writeln!(
    out,
    "Score: {} of {} correct ({}%)",
    report.correct, report.total, report.percentage
  )?;
  Ok(())
}

/// One random question from anywhere in the bank, checked immediately.
fn random_question<R: Rng>(
  input: &mut dyn BufRead,
  out: &mut dyn Write,
  generator: &Generator<'_>,
  rng: &mut R,
) -> io::Result<()> {
  let Some(q) = generator.generate_random(rng) else {
    writeln!(out, "Sorry, the question bank is empty.")?;
    return Ok(());
  };
  writeln!(out, "[{} · {}] {}", q.subject_id, q.topic_id, q.text)?;
  for (i, option) in q.options.iter().enumerate() {
    writeln!(out, "  {}) {}", (b'A' + i as u8) as char, option)?;
  }
  write!(out, "Your answer (blank to reveal): ")?;
  out.flush()?;
  let Some(line) = read_line(input)? else { return Ok(()) };

  match &q.answer {
    Some(expected) => {
      let picked = option_for(&q, &line);
      if line.is_empty() {
        writeln!(out, "Answer: {}", expected)?;
      } else if picked.as_deref() == Some(expected.as_str()) {
        writeln!(out, "Correct!")?;
      } else {
        writeln!(out, "Not quite — the answer is: {}", expected)?;
      }
      if let Some(explanation) = &q.explanation {
        writeln!(out, "{}", explanation)?;
      }
    }
    None => writeln!(out, "This one has no stored answer — compare with your notes.")?,
  }
  Ok(())
}

fn list_saved(out: &mut dyn Write, store: &dyn Storage) -> io::Result<()> {
  let saved = storage::saved_questions(store);
  if saved.is_empty() {
    writeln!(out, "No saved questions yet.")?;
    return Ok(());
  }
  writeln!(out, "Saved questions:")?;
  for q in &saved {
    writeln!(out, " - [{} · {}] {}", q.subject_id, q.topic_id, first_line(&q.text))?;
  }
  Ok(())
}

/// Pick a list element by 1-based number or by id; `None` when nothing matches.
fn pick<'a, T>(items: &'a [T], line: &str, id: impl Fn(&T) -> &str) -> Option<&'a T> {
  if let Ok(n) = line.parse::<usize>() {
    if n >= 1 {
      return items.get(n - 1);
    }
    return None;
  }
  items.iter().find(|item| id(item) == line)
}

/// Read one trimmed line; `None` on EOF.
fn read_line(input: &mut dyn BufRead) -> io::Result<Option<String>> {
  let mut buf = String::new();
  if input.read_line(&mut buf)? == 0 {
    return Ok(None);
  }
  Ok(Some(buf.trim().to_string()))
}

fn first_line(text: &str) -> &str {
  text.lines().next().unwrap_or(text)
}
