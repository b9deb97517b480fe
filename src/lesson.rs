//! Lesson generation.
//!
//! A lesson is an ephemeral bundle of quiz questions:
//!   1) the lesson number picks a difficulty window (one tier every 30 lessons),
//!   2) one random sample per question type is drawn concurrently, each capped by a quota,
//!   3) buckets are concatenated in a fixed type order and wrapped with reward metadata.
//!
//! Nothing here is persisted; the result goes straight into the response body.

use std::{collections::HashMap, fmt, sync::Arc};

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use crate::domain::{Question, QuestionType};
use crate::error::{StoreError, StoreResult};
use crate::store::{ContentStore, QuestionFilter};
use crate::util::positive_or;

/// Lessons per difficulty tier.
const LESSONS_PER_TIER: u32 = 30;
/// Difficulty added to the window floor per tier.
const TIER_STEP: u32 = 2;
pub const DEFAULT_SPAN: u32 = 2;
pub const DIFFICULTY_CEILING: u32 = 10;

/// Concatenation order of buckets inside a lesson. Clients group by it.
pub const BUCKET_ORDER: [QuestionType; 4] = [
  QuestionType::FillInTheBlank,
  QuestionType::TrueFalse,
  QuestionType::MultipleChoice,
  QuestionType::Written,
];

pub type Quotas = HashMap<QuestionType, usize>;
pub type Buckets = HashMap<QuestionType, Vec<Question>>;

/// Inclusive range of `difficulty_score` a lesson draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyWindow {
  pub min: u32,
  pub max: u32,
}

impl DifficultyWindow {
  pub fn compute(lesson_number: u32, base_offset: u32) -> Self {
    Self::compute_with(lesson_number, base_offset, DEFAULT_SPAN, DIFFICULTY_CEILING)
  }

  /// `min` grows without bound; only `max` is clamped to `ceiling`.
  pub fn compute_with(lesson_number: u32, base_offset: u32, span: u32, ceiling: u32) -> Self {
    let level = lesson_number.max(1);
    let tier = (level - 1) / LESSONS_PER_TIER;
    let min = base_offset.saturating_add(tier.saturating_mul(TIER_STEP));
    let max = min.saturating_add(span).min(ceiling);
    Self { min, max }
  }

  pub fn is_satisfiable(&self) -> bool { self.min <= self.max }

  pub fn filter_for(&self, kind: QuestionType) -> QuestionFilter {
    QuestionFilter::new().kind(kind).difficulty_between(self.min, self.max)
  }
}

impl fmt::Display for DifficultyWindow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-{}", self.min, self.max) }
}

/// Lesson number from the raw query value. Missing, non-numeric or
/// non-positive input means lesson 1.
pub fn resolve_lesson_number(raw: Option<&str>) -> u32 {
  positive_or(raw, 1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonVariant {
  Easy,
  Hard,
}

impl LessonVariant {
  pub fn base_offset(&self) -> u32 {
    match self {
      LessonVariant::Easy => 1,
      LessonVariant::Hard => 3,
    }
  }

  pub fn xp_reward(&self) -> u32 {
    match self {
      LessonVariant::Easy => 15,
      LessonVariant::Hard => 30,
    }
  }

  pub fn quotas(&self) -> Quotas {
    let per_type: [(QuestionType, usize); 4] = match self {
      LessonVariant::Easy => [
        (QuestionType::FillInTheBlank, 3),
        (QuestionType::TrueFalse, 2),
        (QuestionType::MultipleChoice, 3),
        (QuestionType::Written, 2),
      ],
      LessonVariant::Hard => [
        (QuestionType::FillInTheBlank, 5),
        (QuestionType::TrueFalse, 5),
        (QuestionType::MultipleChoice, 5),
        (QuestionType::Written, 5),
      ],
    };
    per_type.into_iter().collect()
  }
}

impl fmt::Display for LessonVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      LessonVariant::Easy => "easy",
      LessonVariant::Hard => "hard",
    })
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  pub lesson_number: u32,
  pub questions: Vec<Question>,
  pub xp_reward: u32,
  pub difficulty_range: String,
}

/// Draw every bucket concurrently, one task per question type.
///
/// Fails as soon as any bucket fails; the other tasks are aborted when the
/// `JoinSet` is dropped.
#[instrument(level = "debug", skip_all, fields(window = %window))]
pub async fn sample_buckets(
  store: Arc<dyn ContentStore>,
  window: DifficultyWindow,
  quotas: &Quotas,
) -> StoreResult<Buckets> {
  let mut tasks = JoinSet::new();
  for (&kind, &quota) in quotas {
    let store = Arc::clone(&store);
    let filter = window.filter_for(kind);
    tasks.spawn(async move {
      let picked = store.sample_questions(&filter, quota).await?;
      Ok::<_, StoreError>((kind, picked))
    });
  }

  let mut buckets = Buckets::with_capacity(quotas.len());
  while let Some(joined) = tasks.join_next().await {
    let (kind, picked) = joined??;
    debug!(target: "lesson", %kind, count = picked.len(), "Bucket sampled");
    buckets.insert(kind, picked);
  }
  Ok(buckets)
}

/// Concatenate buckets in `BUCKET_ORDER`, re-tagging each item with its bucket type.
pub fn assemble(lesson_number: u32, window: DifficultyWindow, mut buckets: Buckets, xp_reward: u32) -> Lesson {
  let mut questions = Vec::with_capacity(buckets.values().map(Vec::len).sum());
  for kind in BUCKET_ORDER {
    if let Some(bucket) = buckets.remove(&kind) {
      questions.extend(bucket.into_iter().map(|mut q| {
        q.kind = kind;
        q
      }));
    }
  }
  Lesson {
    lesson_number,
    questions,
    xp_reward,
    difficulty_range: window.to_string(),
  }
}

#[instrument(level = "info", skip_all, fields(%variant, lesson_number = lesson_number))]
pub async fn generate_lesson(
  store: Arc<dyn ContentStore>,
  variant: LessonVariant,
  lesson_number: u32,
) -> StoreResult<Lesson> {
  let window = DifficultyWindow::compute(lesson_number, variant.base_offset());
  if !window.is_satisfiable() {
    warn!(target: "lesson", %variant, lesson_number, %window, "Difficulty window is empty; lesson will have no questions");
  }
  let buckets = sample_buckets(store, window, &variant.quotas()).await?;
  Ok(assemble(lesson_number, window, buckets, variant.xp_reward()))
}
