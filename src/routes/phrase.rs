//! `/phrase` endpoints.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  routing::{get, post},
  Json, Router,
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::domain::{Level, Phrase, Topic};
use crate::error::ApiError;
use crate::logic::{build_phrase, parse_enum, parse_opt, INVALID_LEVEL, INVALID_TOPIC};
use crate::protocol::{NewPhraseIn, PhraseStatusOut, PhraseTopicQuery, RandomPhraseQuery};
use crate::state::AppState;
use crate::store::{PhraseFilter, Sort};
use crate::util::{parse_flag, positive_or, present};

const DEFAULT_RANDOM_SIZE: u32 = 10;

pub fn router() -> Router<Arc<AppState>> {
  Router::new()
    .route("/status", get(status))
    .route("/fetch-all", get(fetch_all))
    .route("/fetch-by/topic/:topic", get(fetch_by_topic))
    .route("/fetch-by/word/:search_term", get(fetch_by_word))
    .route("/fetch-by/level/:level", get(fetch_by_level))
    .route("/fetch/random", get(fetch_random))
    .route("/add", post(add))
}

#[instrument(level = "info", skip(state))]
pub async fn status(State(state): State<Arc<AppState>>) -> Result<Json<PhraseStatusOut>, ApiError> {
  let store = &state.store;
  let total_count = store.count_phrases(&PhraseFilter::new()).await?;
  let learned_count = store.count_phrases(&PhraseFilter::new().learned(true)).await?;
  let beginner_count = store.count_phrases(&PhraseFilter::new().level(Level::Beginner)).await?;
  let intermediate_count = store.count_phrases(&PhraseFilter::new().level(Level::Intermediate)).await?;
  let advanced_count = store.count_phrases(&PhraseFilter::new().level(Level::Advanced)).await?;
  let topics = store
    .phrase_topic_counts()
    .await?
    .into_iter()
    .map(|(topic, n)| (topic.as_str().to_string(), n))
    .collect();

  Ok(Json(PhraseStatusOut {
    total_count,
    learned_count,
    not_learned_count: total_count.saturating_sub(learned_count),
    beginner_count,
    intermediate_count,
    advanced_count,
    topics,
  }))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Phrase>>, ApiError> {
  Ok(Json(state.store.find_phrases(&PhraseFilter::new(), Sort::Insertion).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_by_topic(
  State(state): State<Arc<AppState>>,
  Path(topic): Path<String>,
  Query(q): Query<PhraseTopicQuery>,
) -> Result<Json<Vec<Phrase>>, ApiError> {
  let topic: Topic = parse_enum(&topic, "Invalid topic")?;

  let mut filter = PhraseFilter::new().topic(topic);
  if let Some(level) = parse_opt::<Level>(present(&q.level), INVALID_LEVEL)? {
    filter = filter.level(level);
  }
  if let Some(learned) = parse_flag(q.is_learned.as_deref()) {
    filter = filter.learned(learned);
  }
  Ok(Json(state.store.find_phrases(&filter, Sort::Insertion).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_by_word(
  State(state): State<Arc<AppState>>,
  Path(search_term): Path<String>,
) -> Result<Json<Vec<Phrase>>, ApiError> {
  let term = search_term.trim();
  if term.is_empty() {
    return Err(ApiError::BadRequest("Search term is required.".into()));
  }
  Ok(Json(state.store.find_phrases(&PhraseFilter::new().search(term), Sort::Insertion).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_by_level(
  State(state): State<Arc<AppState>>,
  Path(level): Path<String>,
) -> Result<Json<Vec<Phrase>>, ApiError> {
  let level: Level = parse_enum(&level, INVALID_LEVEL)?;

  let phrases = state.store.find_phrases(&PhraseFilter::new().level(level), Sort::Insertion).await?;
  if phrases.is_empty() {
    return Err(ApiError::NotFound("No phrases found for the specified level.".into()));
  }
  Ok(Json(phrases))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_random(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RandomPhraseQuery>,
) -> Result<Json<Vec<Phrase>>, ApiError> {
  let mut filter = PhraseFilter::new();
  if let Some(topic) = parse_opt::<Topic>(present(&q.topic), INVALID_TOPIC)? {
    filter = filter.topic(topic);
  }
  if let Some(level) = parse_opt::<Level>(present(&q.level), INVALID_LEVEL)? {
    filter = filter.level(level);
  }
  if let Some(learned) = parse_flag(q.is_learned.as_deref()) {
    filter = filter.learned(learned);
  }

  let size = positive_or(present(&q.n), DEFAULT_RANDOM_SIZE) as usize;
  Ok(Json(state.store.sample_phrases(&filter, size).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn add(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewPhraseIn>,
) -> Result<(StatusCode, Json<Phrase>), ApiError> {
  let phrase = build_phrase(body, Utc::now())?;
  let phrase = state.store.insert_phrase(phrase).await?;
  info!(target: "content", id = %phrase.id, phrase = %phrase.phrase, "Phrase created");
  Ok((StatusCode::CREATED, Json(phrase)))
}
