//! Prep Pal · 11+ exam practice trainer
//!
//! - Terminal practice sessions over a static question bank
//! - Optional extra questions and session defaults from TOML
//! - Saved questions and login flag in a flat JSON data file
//!
//! Important env variables:
//!   PREPPAL_CONFIG_PATH : path to TOML config (session defaults + extra questions)
//!   PREPPAL_DATA_PATH   : path to the JSON data file (default "preppal-data.json")
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT   : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod catalog;
mod bank;
mod config;
mod generator;
mod scorer;
mod session;
mod storage;
mod trainer;

use std::io;
use tracing::info;

fn main() -> io::Result<()> {
  telemetry::init_tracing();

  let catalog = catalog::Catalog::builtin();
  let mut bank = bank::QuestionBank::builtin();

  // Merge config questions (if any) into the built-in bank.
  let cfg = config::load_config_from_env().unwrap_or_default();
  let merged = config::merge_into_bank(&cfg, &catalog, &mut bank);
  if merged > 0 {
    info!(target: "preppal", merged, "Merged config questions into the bank");
  }
  bank.log_inventory();

  let data_path =
    std::env::var("PREPPAL_DATA_PATH").unwrap_or_else(|_| "preppal-data.json".into());
  let mut store = storage::JsonFileStorage::open(data_path);

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut input = stdin.lock();
  let mut out = stdout.lock();
  trainer::run(
    &mut input,
    &mut out,
    &catalog,
    &bank,
    &mut store,
    &cfg.session,
    &mut rand::thread_rng(),
  )
}
