//! `/vocab` endpoints: listing, filtered lookups, random draws and creation.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  routing::{get, post},
  Json, Router,
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::domain::{Gender, Level, Topic, Vocab};
use crate::error::ApiError;
use crate::logic::{build_vocab, parse_enum, parse_opt, INVALID_GENDER, INVALID_LEVEL, INVALID_TOPIC};
use crate::protocol::{AppliedFilters, NewVocabIn, VocabByTopicOut, VocabTopicQuery};
use crate::state::AppState;
use crate::store::{Sort, VocabFilter};
use crate::util::{parse_flag, present};

pub fn router() -> Router<Arc<AppState>> {
  Router::new()
    .route("/fetch-all", get(fetch_all))
    .route("/fetch-by/topic/:topic", get(fetch_by_topic))
    .route("/fetch-by/word/:search_term", get(fetch_by_word))
    .route("/fetch-by/level/:level", get(fetch_by_level))
    .route("/fetch/random", get(fetch_random))
    .route("/fetch/random10/level/:level", get(fetch_random10_by_level))
    .route("/fetch/random20/level/:level", get(fetch_random20_by_level))
    .route("/add", post(add))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Vocab>>, ApiError> {
  let vocab = state.store.find_vocab(&VocabFilter::new(), Sort::Insertion).await?;
  Ok(Json(vocab))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_by_topic(
  State(state): State<Arc<AppState>>,
  Path(topic): Path<String>,
  Query(q): Query<VocabTopicQuery>,
) -> Result<Json<VocabByTopicOut>, ApiError> {
  let topic: Topic = parse_enum(&topic, INVALID_TOPIC)?;

  let mut filter = VocabFilter::new().topic(topic);
  if let Some(level) = parse_opt::<Level>(present(&q.level), INVALID_LEVEL)? {
    filter = filter.level(level);
  }
  if let Some(learned) = parse_flag(q.is_learned.as_deref()) {
    filter = filter.learned(learned);
  }
  if let Some(gender) = parse_opt::<Gender>(present(&q.gender), INVALID_GENDER)? {
    filter = filter.gender(gender);
  }
  if let Some(pos) = present(&q.part_of_speech) {
    filter = filter.part_of_speech(pos);
  }

  let vocab = state.store.find_vocab(&filter, Sort::Insertion).await?;
  if vocab.is_empty() {
    return Err(ApiError::NotFound("No vocabulary found for the specified topic.".into()));
  }

  Ok(Json(VocabByTopicOut {
    message: format!("Vocabulary entries for topic: {topic}"),
    filters: AppliedFilters { level: q.level, is_learned: q.is_learned },
    vocab,
  }))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_by_word(
  State(state): State<Arc<AppState>>,
  Path(search_term): Path<String>,
) -> Result<Json<Vec<Vocab>>, ApiError> {
  let term = search_term.trim();
  if term.is_empty() {
    return Err(ApiError::BadRequest("Invalid or missing search term.".into()));
  }

  let vocab = state.store.find_vocab(&VocabFilter::new().search(term), Sort::Insertion).await?;
  if vocab.is_empty() {
    return Err(ApiError::NotFound("No vocabulary found matching the search term.".into()));
  }
  Ok(Json(vocab))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_by_level(
  State(state): State<Arc<AppState>>,
  Path(level): Path<String>,
) -> Result<Json<Vec<Vocab>>, ApiError> {
  let level: Level = parse_enum(&level, INVALID_LEVEL)?;

  let vocab = state.store.find_vocab(&VocabFilter::new().level(level), Sort::NewestFirst).await?;
  if vocab.is_empty() {
    return Err(ApiError::NotFound(format!("No vocabulary found for level: {level}")));
  }
  Ok(Json(vocab))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_random(State(state): State<Arc<AppState>>) -> Result<Json<Vocab>, ApiError> {
  state
    .store
    .sample_vocab(&VocabFilter::new(), 1)
    .await?
    .into_iter()
    .next()
    .map(Json)
    .ok_or_else(|| ApiError::NotFound("No vocabulary entries found.".into()))
}

pub async fn fetch_random10_by_level(
  state: State<Arc<AppState>>,
  level: Path<String>,
) -> Result<Json<Vec<Vocab>>, ApiError> {
  random_unlearned_by_level(state, level, 10).await
}

pub async fn fetch_random20_by_level(
  state: State<Arc<AppState>>,
  level: Path<String>,
) -> Result<Json<Vec<Vocab>>, ApiError> {
  random_unlearned_by_level(state, level, 20).await
}

#[instrument(level = "info", skip(state))]
async fn random_unlearned_by_level(
  State(state): State<Arc<AppState>>,
  Path(level): Path<String>,
  size: usize,
) -> Result<Json<Vec<Vocab>>, ApiError> {
  let level: Level = parse_enum(&level, INVALID_LEVEL)?;

  let filter = VocabFilter::new().level(level).learned(false);
  let vocab = state.store.sample_vocab(&filter, size).await?;
  if vocab.is_empty() {
    return Err(ApiError::NotFound(format!("No unlearned vocabulary entries found for level: {level}")));
  }
  Ok(Json(vocab))
}

#[instrument(level = "info", skip(state, body))]
pub async fn add(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewVocabIn>,
) -> Result<(StatusCode, Json<Vocab>), ApiError> {
  let vocab = build_vocab(body, Utc::now())?;
  let vocab = state.store.insert_vocab(vocab).await?;
  info!(target: "content", id = %vocab.id, word = %vocab.word, "Vocabulary entry created");
  Ok((StatusCode::CREATED, Json(vocab)))
}
