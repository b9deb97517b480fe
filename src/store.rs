//! Document store seam.
//!
//! Handlers and the lesson generator talk to a `ContentStore`: find / count /
//! random-sample / insert over three collections. Queries are described by
//! typed filters (`QuestionFilter`, `VocabFilter`, `PhraseFilter`) composed with
//! builder methods; the store decides how to evaluate them.
//!
//! `MemoryStore` keeps everything in process behind one `RwLock` per collection.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::{Gender, Level, Phrase, Question, QuestionType, Topic, Vocab};
use crate::error::StoreResult;
use crate::util::contains_ci;

/// Result ordering for `find_*` calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Sort {
  #[default]
  Insertion,
  NewestFirst,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestionFilter {
  pub kind: Option<QuestionType>,
  pub topic: Option<Topic>,
  pub level: Option<Level>,
  pub is_learned: Option<bool>,
  pub min_difficulty: Option<u32>,
  pub max_difficulty: Option<u32>,
}

impl QuestionFilter {
  pub fn new() -> Self { Self::default() }

  pub fn kind(mut self, kind: QuestionType) -> Self { self.kind = Some(kind); self }
  pub fn topic(mut self, topic: Topic) -> Self { self.topic = Some(topic); self }
  pub fn level(mut self, level: Level) -> Self { self.level = Some(level); self }
  pub fn learned(mut self, learned: bool) -> Self { self.is_learned = Some(learned); self }
  pub fn min_difficulty(mut self, min: u32) -> Self { self.min_difficulty = Some(min); self }
  pub fn max_difficulty(mut self, max: u32) -> Self { self.max_difficulty = Some(max); self }

  /// Inclusive `[min, max]` bound on `difficulty_score`.
  pub fn difficulty_between(self, min: u32, max: u32) -> Self {
    self.min_difficulty(min).max_difficulty(max)
  }

  pub fn matches(&self, q: &Question) -> bool {
    let score = u32::from(q.difficulty_score);
    self.kind.map_or(true, |k| q.kind == k)
      && self.topic.map_or(true, |t| q.topic == t)
      && self.level.map_or(true, |l| q.level == l)
      && self.is_learned.map_or(true, |b| q.is_learned == b)
      && self.min_difficulty.map_or(true, |min| score >= min)
      && self.max_difficulty.map_or(true, |max| score <= max)
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VocabFilter {
  pub topic: Option<Topic>,
  pub level: Option<Level>,
  pub is_learned: Option<bool>,
  pub gender: Option<Gender>,
  pub part_of_speech: Option<String>,
  /// Case-insensitive substring of `word` or `translation`.
  pub search: Option<String>,
}

impl VocabFilter {
  pub fn new() -> Self { Self::default() }

  pub fn topic(mut self, topic: Topic) -> Self { self.topic = Some(topic); self }
  pub fn level(mut self, level: Level) -> Self { self.level = Some(level); self }
  pub fn learned(mut self, learned: bool) -> Self { self.is_learned = Some(learned); self }
  pub fn gender(mut self, gender: Gender) -> Self { self.gender = Some(gender); self }
  pub fn part_of_speech(mut self, pos: impl Into<String>) -> Self { self.part_of_speech = Some(pos.into()); self }
  pub fn search(mut self, term: impl Into<String>) -> Self { self.search = Some(term.into()); self }

  pub fn matches(&self, v: &Vocab) -> bool {
    self.topic.map_or(true, |t| v.topic == t)
      && self.level.map_or(true, |l| v.level == l)
      && self.is_learned.map_or(true, |b| v.is_learned == b)
      && self.gender.map_or(true, |g| v.gender == g)
      && self.part_of_speech.as_deref().map_or(true, |p| v.part_of_speech == p)
      && self.search.as_deref().map_or(true, |s| contains_ci(&v.word, s) || contains_ci(&v.translation, s))
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhraseFilter {
  pub topic: Option<Topic>,
  pub level: Option<Level>,
  pub is_learned: Option<bool>,
  /// Case-insensitive substring of `phrase` or `translation`.
  pub search: Option<String>,
}

impl PhraseFilter {
  pub fn new() -> Self { Self::default() }

  pub fn topic(mut self, topic: Topic) -> Self { self.topic = Some(topic); self }
  pub fn level(mut self, level: Level) -> Self { self.level = Some(level); self }
  pub fn learned(mut self, learned: bool) -> Self { self.is_learned = Some(learned); self }
  pub fn search(mut self, term: impl Into<String>) -> Self { self.search = Some(term.into()); self }

  pub fn matches(&self, p: &Phrase) -> bool {
    self.topic.map_or(true, |t| p.topic == t)
      && self.level.map_or(true, |l| p.level == l)
      && self.is_learned.map_or(true, |b| p.is_learned == b)
      && self.search.as_deref().map_or(true, |s| contains_ci(&p.phrase, s) || contains_ci(&p.translation, s))
  }
}

/// Collaborator interface over the content collections.
///
/// `sample_*` returns up to `size` matching documents chosen uniformly at random,
/// in no particular order.
#[async_trait]
pub trait ContentStore: Send + Sync {
  async fn insert_question(&self, question: Question) -> StoreResult<Question>;
  async fn find_questions(&self, filter: &QuestionFilter, sort: Sort) -> StoreResult<Vec<Question>>;
  async fn question_by_id(&self, id: Uuid) -> StoreResult<Option<Question>>;
  async fn sample_questions(&self, filter: &QuestionFilter, size: usize) -> StoreResult<Vec<Question>>;
  async fn count_questions(&self, filter: &QuestionFilter) -> StoreResult<usize>;

  async fn insert_vocab(&self, vocab: Vocab) -> StoreResult<Vocab>;
  async fn find_vocab(&self, filter: &VocabFilter, sort: Sort) -> StoreResult<Vec<Vocab>>;
  async fn sample_vocab(&self, filter: &VocabFilter, size: usize) -> StoreResult<Vec<Vocab>>;
  async fn count_vocab(&self, filter: &VocabFilter) -> StoreResult<usize>;

  async fn insert_phrase(&self, phrase: Phrase) -> StoreResult<Phrase>;
  async fn find_phrases(&self, filter: &PhraseFilter, sort: Sort) -> StoreResult<Vec<Phrase>>;
  async fn sample_phrases(&self, filter: &PhraseFilter, size: usize) -> StoreResult<Vec<Phrase>>;
  async fn count_phrases(&self, filter: &PhraseFilter) -> StoreResult<usize>;
  /// Number of phrases per topic; topics without phrases are absent.
  async fn phrase_topic_counts(&self) -> StoreResult<BTreeMap<Topic, usize>>;
}

trait Timestamped {
  fn created_at(&self) -> DateTime<Utc>;
}

impl Timestamped for Question {
  fn created_at(&self) -> DateTime<Utc> { self.created_at }
}
impl Timestamped for Vocab {
  fn created_at(&self) -> DateTime<Utc> { self.created_at }
}
impl Timestamped for Phrase {
  fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

fn select<T: Clone + Timestamped>(items: &[T], pred: impl Fn(&T) -> bool, sort: Sort) -> Vec<T> {
  let mut out: Vec<T> = items.iter().filter(|i| pred(i)).cloned().collect();
  if sort == Sort::NewestFirst {
    // Ties: later inserts first.
    out.reverse();
    out.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
  }
  out
}

fn sample<T: Clone>(items: &[T], pred: impl Fn(&T) -> bool, size: usize) -> Vec<T> {
  let mut pool: Vec<&T> = items.iter().filter(|i| pred(i)).collect();
  let mut rng = rand::thread_rng();
  let (picked, _) = pool.partial_shuffle(&mut rng, size);
  picked.iter().map(|i| (*i).clone()).collect()
}

/// In-process `ContentStore`.
#[derive(Default)]
pub struct MemoryStore {
  questions: RwLock<Vec<Question>>,
  vocab: RwLock<Vec<Vocab>>,
  phrases: RwLock<Vec<Phrase>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ContentStore for MemoryStore {
  #[instrument(level = "debug", skip(self, question), fields(id = %question.id))]
  async fn insert_question(&self, question: Question) -> StoreResult<Question> {
    self.questions.write().await.push(question.clone());
    Ok(question)
  }

  async fn find_questions(&self, filter: &QuestionFilter, sort: Sort) -> StoreResult<Vec<Question>> {
    let items = self.questions.read().await;
    Ok(select(&items, |q| filter.matches(q), sort))
  }

  async fn question_by_id(&self, id: Uuid) -> StoreResult<Option<Question>> {
    Ok(self.questions.read().await.iter().find(|q| q.id == id).cloned())
  }

  #[instrument(level = "debug", skip(self))]
  async fn sample_questions(&self, filter: &QuestionFilter, size: usize) -> StoreResult<Vec<Question>> {
    let items = self.questions.read().await;
    let picked = sample(&items, |q| filter.matches(q), size);
    debug!(target: "content", requested = size, returned = picked.len(), "Sampled questions");
    Ok(picked)
  }

  async fn count_questions(&self, filter: &QuestionFilter) -> StoreResult<usize> {
    Ok(self.questions.read().await.iter().filter(|q| filter.matches(q)).count())
  }

  #[instrument(level = "debug", skip(self, vocab), fields(id = %vocab.id))]
  async fn insert_vocab(&self, vocab: Vocab) -> StoreResult<Vocab> {
    self.vocab.write().await.push(vocab.clone());
    Ok(vocab)
  }

  async fn find_vocab(&self, filter: &VocabFilter, sort: Sort) -> StoreResult<Vec<Vocab>> {
    let items = self.vocab.read().await;
    Ok(select(&items, |v| filter.matches(v), sort))
  }

  async fn sample_vocab(&self, filter: &VocabFilter, size: usize) -> StoreResult<Vec<Vocab>> {
    let items = self.vocab.read().await;
    Ok(sample(&items, |v| filter.matches(v), size))
  }

  async fn count_vocab(&self, filter: &VocabFilter) -> StoreResult<usize> {
    Ok(self.vocab.read().await.iter().filter(|v| filter.matches(v)).count())
  }

  #[instrument(level = "debug", skip(self, phrase), fields(id = %phrase.id))]
  async fn insert_phrase(&self, phrase: Phrase) -> StoreResult<Phrase> {
    self.phrases.write().await.push(phrase.clone());
    Ok(phrase)
  }

  async fn find_phrases(&self, filter: &PhraseFilter, sort: Sort) -> StoreResult<Vec<Phrase>> {
    let items = self.phrases.read().await;
    Ok(select(&items, |p| filter.matches(p), sort))
  }

  async fn sample_phrases(&self, filter: &PhraseFilter, size: usize) -> StoreResult<Vec<Phrase>> {
    let items = self.phrases.read().await;
    Ok(sample(&items, |p| filter.matches(p), size))
  }

  async fn count_phrases(&self, filter: &PhraseFilter) -> StoreResult<usize> {
    Ok(self.phrases.read().await.iter().filter(|p| filter.matches(p)).count())
  }

  async fn phrase_topic_counts(&self) -> StoreResult<BTreeMap<Topic, usize>> {
    let mut counts = BTreeMap::new();
    for p in self.phrases.read().await.iter() {
      *counts.entry(p.topic).or_insert(0) += 1;
    }
    Ok(counts)
  }
}
