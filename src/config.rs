//! Runtime configuration from environment variables, plus the optional TOML
//! content bank used to pre-populate the store.
//!
//! Content bank schema (all tables optional):
//!
//! ```toml
//! builtin_seeds = true
//!
//! [[vocab]]
//! word = "стол"
//! translation = "table"
//! partOfSpeech = "noun"
//! ...
//!
//! [[phrases]]
//! ...
//!
//! [[questions]]
//! question = "..."
//! type = "true-false"
//! ...
//! ```
//!
//! Entries use the same fields as the corresponding `POST .../add` bodies.

use std::net::SocketAddr;

use serde::Deserialize;
use tracing::{error, info};

use crate::protocol::{NewPhraseIn, NewQuestionIn, NewVocabIn};

const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct AppConfig {
  pub addr: SocketAddr,
  pub content_path: Option<String>,
}

impl AppConfig {
  /// PORT (default 3000, bound on 0.0.0.0) and CONTENT_PATH.
  pub fn from_env() -> Self {
    let port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(DEFAULT_PORT);
    Self {
      addr: SocketAddr::from(([0, 0, 0, 0], port)),
      content_path: std::env::var("CONTENT_PATH").ok().filter(|p| !p.trim().is_empty()),
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ContentBank {
  /// Also load the built-in seed content.
  #[serde(default = "default_true")]
  pub builtin_seeds: bool,
  #[serde(default)]
  pub vocab: Vec<NewVocabIn>,
  #[serde(default)]
  pub phrases: Vec<NewPhraseIn>,
  #[serde(default)]
  pub questions: Vec<NewQuestionIn>,
}

impl Default for ContentBank {
  fn default() -> Self {
    Self { builtin_seeds: true, vocab: vec![], phrases: vec![], questions: vec![] }
  }
}

fn default_true() -> bool { true }

pub fn parse_content_bank(s: &str) -> Result<ContentBank, toml::de::Error> {
  toml::from_str::<ContentBank>(s)
}

/// Attempt to load the content bank from `path`. On any IO/parsing error, returns None.
pub fn load_content_bank(path: &str) -> Option<ContentBank> {
  match std::fs::read_to_string(path) {
    Ok(s) => match parse_content_bank(&s) {
      Ok(bank) => {
        info!(target: "azbuka_backend", %path, vocab = bank.vocab.len(), phrases = bank.phrases.len(), questions = bank.questions.len(), "Loaded content bank (TOML)");
        Some(bank)
      }
      Err(e) => {
        error!(target: "azbuka_backend", %path, error = %e, "Failed to parse TOML content bank");
        None
      }
    },
    Err(e) => {
      error!(target: "azbuka_backend", %path, error = %e, "Failed to read TOML content bank");
      None
    }
  }
}
