//! Application state: the shared content store, plus startup population.
//!
//! At startup the store is filled from:
//!   - the TOML content bank at CONTENT_PATH (if any)
//!   - the built-in seeds (unless the bank sets `builtin_seeds = false`)
//!
//! Entries failing validation are skipped and logged; they never abort startup.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};

use crate::config::{load_content_bank, AppConfig, ContentBank};
use crate::error::StoreResult;
use crate::logic::{build_phrase, build_question, build_vocab};
use crate::seeds::{seed_phrases, seed_questions, seed_vocab};
use crate::store::{ContentStore, MemoryStore, PhraseFilter, QuestionFilter, VocabFilter};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
}

/// How many entries of each collection were accepted / skipped while loading.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub vocab: usize,
    pub phrases: usize,
    pub questions: usize,
    pub skipped: usize,
}

impl AppState {
    pub fn with_store(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Build state from config: in-memory store, content bank, built-in seeds.
    #[instrument(level = "info", skip_all)]
    pub async fn from_config(cfg: &AppConfig) -> StoreResult<Self> {
        let bank = cfg
            .content_path
            .as_deref()
            .and_then(load_content_bank)
            .unwrap_or_default();
        let store: Arc<dyn ContentStore> = Arc::new(MemoryStore::new());
        let report = load_content(store.as_ref(), bank).await?;
        info!(target: "content", vocab = report.vocab, phrases = report.phrases, questions = report.questions, skipped = report.skipped, "Content loaded");

        let state = Self::with_store(store);
        state.log_inventory().await?;
        Ok(state)
    }

    /// Startup summary of questions per type.
    async fn log_inventory(&self) -> StoreResult<()> {
        for kind in crate::domain::QuestionType::ALL {
            let n = self
                .store
                .count_questions(&QuestionFilter::new().kind(kind))
                .await?;
            info!(target: "content", %kind, questions = n, "Startup question inventory");
        }
        let vocab = self.store.count_vocab(&VocabFilter::new()).await?;
        let phrases = self.store.count_phrases(&PhraseFilter::new()).await?;
        info!(target: "content", vocab, phrases, "Startup vocabulary inventory");
        Ok(())
    }
}

/// Validate and insert every bank entry, then the built-in seeds if enabled.
pub async fn load_content(store: &dyn ContentStore, bank: ContentBank) -> StoreResult<LoadReport> {
    let mut report = LoadReport::default();
    let now = Utc::now();

    let (vocab, phrases, questions) = if bank.builtin_seeds {
        (
            bank.vocab.into_iter().chain(seed_vocab()).collect::<Vec<_>>(),
            bank.phrases.into_iter().chain(seed_phrases()).collect::<Vec<_>>(),
            bank.questions.into_iter().chain(seed_questions()).collect::<Vec<_>>(),
        )
    } else {
        (bank.vocab, bank.phrases, bank.questions)
    };

    for (idx, input) in vocab.into_iter().enumerate() {
        match build_vocab(input, now) {
            Ok(v) => {
                store.insert_vocab(v).await?;
                report.vocab += 1;
            }
            Err(e) => {
                error!(target: "content", idx, error = %e, "Skipping vocab entry");
                report.skipped += 1;
            }
        }
    }
    for (idx, input) in phrases.into_iter().enumerate() {
        match build_phrase(input, now) {
            Ok(p) => {
                store.insert_phrase(p).await?;
                report.phrases += 1;
            }
            Err(e) => {
                error!(target: "content", idx, error = %e, "Skipping phrase entry");
                report.skipped += 1;
            }
        }
    }
    for (idx, input) in questions.into_iter().enumerate() {
        match build_question(input, now) {
            Ok(q) => {
                store.insert_question(q).await?;
                report.questions += 1;
            }
            Err(e) => {
                error!(target: "content", idx, error = %e, "Skipping question entry");
                report.skipped += 1;
            }
        }
    }
    Ok(report)
}
