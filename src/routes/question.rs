//! `/question` endpoints.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  routing::{get, post},
  Json, Router,
};
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{Level, Question, QuestionType, Topic};
use crate::error::ApiError;
use crate::logic::{build_question, parse_opt, INVALID_LEVEL, INVALID_TOPIC, INVALID_TYPE};
use crate::protocol::{NewQuestionIn, RandomQuestionQuery};
use crate::state::AppState;
use crate::store::{QuestionFilter, Sort};
use crate::util::{parse_flag, positive_or, present};

const DEFAULT_RANDOM_SIZE: u32 = 10;

pub fn router() -> Router<Arc<AppState>> {
  Router::new()
    .route("/add", post(add))
    .route("/fetch-all", get(fetch_all))
    .route("/fetch-by/id/:id", get(fetch_by_id))
    .route("/fetch/random", get(fetch_random))
}

#[instrument(level = "info", skip(state, body))]
pub async fn add(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewQuestionIn>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
  let question = build_question(body, Utc::now())?;
  let question = state.store.insert_question(question).await?;
  info!(target: "content", id = %question.id, kind = %question.kind, difficulty = question.difficulty_score, "Question created");
  Ok((StatusCode::CREATED, Json(question)))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_all(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Question>>, ApiError> {
  Ok(Json(state.store.find_questions(&QuestionFilter::new(), Sort::NewestFirst).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_by_id(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<Question>, ApiError> {
  let not_found = || ApiError::NotFound("Question not found.".into());
  let id = Uuid::parse_str(id.trim()).map_err(|_| not_found())?;
  state.store.question_by_id(id).await?.map(Json).ok_or_else(not_found)
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_random(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RandomQuestionQuery>,
) -> Result<Json<Vec<Question>>, ApiError> {
  let mut filter = QuestionFilter::new();
  if let Some(kind) = parse_opt::<QuestionType>(present(&q.kind), INVALID_TYPE)? {
    filter = filter.kind(kind);
  }
  if let Some(topic) = parse_opt::<Topic>(present(&q.topic), INVALID_TOPIC)? {
    filter = filter.topic(topic);
  }
  if let Some(level) = parse_opt::<Level>(present(&q.level), INVALID_LEVEL)? {
    filter = filter.level(level);
  }
  if let Some(learned) = parse_flag(q.is_learned.as_deref()) {
    filter = filter.learned(learned);
  }
  if let Some(min) = present(&q.min_difficulty).and_then(|s| s.parse::<u32>().ok()) {
    filter = filter.min_difficulty(min);
  }
  if let Some(max) = present(&q.max_difficulty).and_then(|s| s.parse::<u32>().ok()) {
    filter = filter.max_difficulty(max);
  }

  let size = positive_or(present(&q.n), DEFAULT_RANDOM_SIZE) as usize;
  Ok(Json(state.store.sample_questions(&filter, size).await?))
}
