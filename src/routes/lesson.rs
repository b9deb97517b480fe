//! `/lesson` endpoints. Both variants answer 200 even for an empty lesson; any
//! store failure becomes a 500 with the fixed lesson error body.

use std::sync::Arc;

use axum::{
  extract::{rejection::QueryRejection, Query, State},
  routing::get,
  Json, Router,
};
use tracing::{debug, info, instrument};

use crate::error::ApiError;
use crate::lesson::{generate_lesson, resolve_lesson_number, Lesson, LessonVariant};
use crate::protocol::LessonQuery;
use crate::state::AppState;
use crate::util::present;

pub fn router() -> Router<Arc<AppState>> {
  Router::new()
    .route("/generate-easy", get(generate_easy))
    .route("/generate-hard", get(generate_hard))
}

pub async fn generate_easy(
  state: State<Arc<AppState>>,
  query: Result<Query<LessonQuery>, QueryRejection>,
) -> Result<Json<Lesson>, ApiError> {
  serve(state, lesson_query(query), LessonVariant::Easy).await
}

pub async fn generate_hard(
  state: State<Arc<AppState>>,
  query: Result<Query<LessonQuery>, QueryRejection>,
) -> Result<Json<Lesson>, ApiError> {
  serve(state, lesson_query(query), LessonVariant::Hard).await
}

/// A query string that does not deserialize (e.g. a repeated `lessonNumber`)
/// is treated as carrying no lesson number.
fn lesson_query(query: Result<Query<LessonQuery>, QueryRejection>) -> LessonQuery {
  match query {
    Ok(Query(q)) => q,
    Err(rejection) => {
      debug!(target: "lesson", error = %rejection, "Unreadable lesson query; using lesson 1");
      LessonQuery::default()
    }
  }
}

#[instrument(level = "info", skip(state, variant), fields(%variant))]
async fn serve(
  State(state): State<Arc<AppState>>,
  q: LessonQuery,
  variant: LessonVariant,
) -> Result<Json<Lesson>, ApiError> {
  let lesson_number = resolve_lesson_number(present(&q.lesson_number));
  let lesson = generate_lesson(Arc::clone(&state.store), variant, lesson_number)
    .await
    .map_err(ApiError::Lesson)?;
  info!(target: "lesson", %variant, lesson_number, questions = lesson.questions.len(), range = %lesson.difficulty_range, "Lesson served");
  Ok(Json(lesson))
}
