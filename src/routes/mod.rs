//! Router assembly: resource routers, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod lesson;
pub mod phrase;
pub mod question;
pub mod vocab;

/// Build the application router with:
/// - `/vocab`, `/phrase`, `/question`, `/lesson` resource routes
/// - `/` banner and `/health` probe
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::http_root))
        .route("/health", get(http::http_health))
        .nest("/vocab", vocab::router())
        .nest("/phrase", phrase::router())
        .nest("/question", question::router())
        .nest("/lesson", lesson::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::ContentBank;
    use crate::domain::{Level, QuestionType, Topic};
    use crate::state::load_content;
    use crate::store::testing::{phrase, question, vocab, FailingStore, ScriptedStore};
    use crate::store::{ContentStore, MemoryStore};

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app_with(store: Arc<dyn ContentStore>) -> Router {
        build_router(Arc::new(AppState::with_store(store)))
    }

    async fn seeded_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        load_content(store.as_ref(), ContentBank::default()).await.unwrap();
        app_with(store)
    }

    async fn stocked_question_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        for kind in QuestionType::ALL {
            for d in 1..=10u8 {
                for _ in 0..6 {
                    store.insert_question(question(kind, d)).await.unwrap();
                }
            }
        }
        app_with(store)
    }

    fn count_type(body: &Value, kind: &str) -> usize {
        body["questions"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|q| q["type"] == kind)
            .count()
    }

    #[tokio::test]
    async fn root_and_health() {
        let app = seeded_app().await;
        let (status, body) = send(app.clone(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("Welcome to the Azbuka API".into()));
        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn easy_lesson_one() {
        let (status, body) = send(stocked_question_app().await, get("/lesson/generate-easy?lessonNumber=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lessonNumber"], 1);
        assert_eq!(body["xpReward"], 15);
        assert_eq!(body["difficultyRange"], "1-3");
        assert_eq!(body["questions"].as_array().unwrap().len(), 10);
        assert_eq!(count_type(&body, "fill-in-the-blank"), 3);
        assert_eq!(count_type(&body, "true-false"), 2);
        assert_eq!(count_type(&body, "multiple-choice"), 3);
        assert_eq!(count_type(&body, "written"), 2);
    }

    #[tokio::test]
    async fn hard_lesson_one() {
        let (status, body) = send(stocked_question_app().await, get("/lesson/generate-hard?lessonNumber=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["xpReward"], 30);
        assert_eq!(body["difficultyRange"], "3-5");
        assert_eq!(body["questions"].as_array().unwrap().len(), 20);
        for q in body["questions"].as_array().unwrap() {
            let d = q["difficultyScore"].as_u64().unwrap();
            assert!((3..=5).contains(&d));
        }
    }

    #[tokio::test]
    async fn lesson_buckets_come_in_fixed_order() {
        let (_, body) = send(stocked_question_app().await, get("/lesson/generate-easy?lessonNumber=31")).await;
        assert_eq!(body["difficultyRange"], "3-5");
        let kinds: Vec<&str> = body["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["type"].as_str().unwrap())
            .collect();
        let expected: Vec<&str> = ["fill-in-the-blank"; 3]
            .into_iter()
            .chain(["true-false"; 2])
            .chain(["multiple-choice"; 3])
            .chain(["written"; 2])
            .collect();
        assert_eq!(kinds, expected);
    }

    #[tokio::test]
    async fn non_numeric_lesson_number_means_one() {
        let app = stocked_question_app().await;
        for uri in ["/lesson/generate-easy?lessonNumber=abc", "/lesson/generate-easy"] {
            let (status, body) = send(app.clone(), get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["lessonNumber"], 1);
            assert_eq!(body["difficultyRange"], "1-3");
        }
    }

    #[tokio::test]
    async fn repeated_lesson_number_falls_back_to_one() {
        let app = stocked_question_app().await;
        for uri in [
            "/lesson/generate-easy?lessonNumber=1&lessonNumber=2",
            "/lesson/generate-easy?lessonNumber=40&lessonNumber=40",
        ] {
            let (status, body) = send(app.clone(), get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["lessonNumber"], 1);
            assert_eq!(body["difficultyRange"], "1-3");
        }
        let (status, body) = send(app, get("/lesson/generate-hard?lessonNumber=1&lessonNumber=2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["difficultyRange"], "3-5");
    }

    #[tokio::test]
    async fn one_failed_bucket_fails_the_lesson_request() {
        let app = {
            let store = ScriptedStore::failing_on(QuestionType::Written);
            for kind in QuestionType::ALL {
                store.insert_question(question(kind, 2)).await.unwrap();
            }
            app_with(Arc::new(store))
        };
        for uri in ["/lesson/generate-easy", "/lesson/generate-hard?lessonNumber=7"] {
            let (status, body) = send(app.clone(), get(uri)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": "Internal Server Error" }));
        }
    }

    #[tokio::test]
    async fn empty_store_still_serves_lessons() {
        let app = app_with(Arc::new(MemoryStore::new()));
        for uri in ["/lesson/generate-easy?lessonNumber=1", "/lesson/generate-hard?lessonNumber=500"] {
            let (status, body) = send(app.clone(), get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["questions"], json!([]));
        }
    }

    #[tokio::test]
    async fn store_failure_maps_to_fixed_errors() {
        let app = app_with(Arc::new(FailingStore));
        let (status, body) = send(app.clone(), get("/lesson/generate-hard")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal Server Error" }));

        let (status, body) = send(app, get("/vocab/fetch-all")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Internal server error" }));
    }

    #[tokio::test]
    async fn question_add_then_fetch_by_id() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, created) = send(
            app.clone(),
            post(
                "/question/add",
                json!({
                    "question": "Translate: Good night",
                    "answer": "Спокойной ночи",
                    "topic": "Basic Survival & Greetings",
                    "level": "beginner",
                    "type": "written",
                    "difficultyScore": 4,
                    "sourceLang": "en",
                    "targetLang": "ru"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["isLearned"], false);
        assert_eq!(created["acceptableAnswers"], json!([]));

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(app.clone(), get(&format!("/question/fetch-by/id/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, body) = send(app, get("/question/fetch-by/id/not-an-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Question not found.");
    }

    #[tokio::test]
    async fn question_add_rejects_single_option_choice() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, body) = send(
            app,
            post(
                "/question/add",
                json!({
                    "question": "Pick one",
                    "options": ["да"],
                    "answer": "да",
                    "topic": "Verbs",
                    "level": "beginner",
                    "type": "multiple-choice"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Options must have at least 2 items.");
    }

    #[tokio::test]
    async fn random_questions_filter_and_validate_type() {
        let app = stocked_question_app().await;
        let (status, body) = send(
            app.clone(),
            get("/question/fetch/random?type=true-false&minDifficulty=7&maxDifficulty=8&n=4"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let qs = body.as_array().unwrap();
        assert_eq!(qs.len(), 4);
        assert!(qs.iter().all(|q| q["type"] == "true-false"));
        assert!(qs.iter().all(|q| (7..=8).contains(&q["difficultyScore"].as_u64().unwrap())));

        let (status, body) = send(app.clone(), get("/question/fetch/random")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 10);

        let (status, body) = send(app, get("/question/fetch/random?type=essay")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid question type provided.");
    }

    #[tokio::test]
    async fn vocab_by_topic_envelope_and_errors() {
        let app = seeded_app().await;
        let (status, body) = send(app.clone(), get("/vocab/fetch-by/topic/Food%20%26%20Drink?level=beginner")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Vocabulary entries for topic: Food & Drink");
        assert_eq!(body["filters"], json!({ "level": "beginner" }));
        assert_eq!(body["vocab"].as_array().unwrap().len(), 2);

        let (status, body) = send(app.clone(), get("/vocab/fetch-by/topic/Furniture")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid topic provided.");

        let (status, _) = send(app, get("/vocab/fetch-by/topic/Pronouns")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn vocab_by_level_is_newest_first() {
        let store = Arc::new(MemoryStore::new());
        store.insert_vocab(vocab("дом", "house", Level::Beginner, 60)).await.unwrap();
        store.insert_vocab(vocab("кот", "cat", Level::Beginner, 5)).await.unwrap();
        store.insert_vocab(vocab("вдохновение", "inspiration", Level::Advanced, 1)).await.unwrap();
        let app = app_with(store);

        let (status, body) = send(app.clone(), get("/vocab/fetch-by/level/beginner")).await;
        assert_eq!(status, StatusCode::OK);
        let words: Vec<&str> = body.as_array().unwrap().iter().map(|v| v["word"].as_str().unwrap()).collect();
        assert_eq!(words, vec!["кот", "дом"]);

        let (status, _) = send(app.clone(), get("/vocab/fetch-by/level/expert")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, body) = send(app, get("/vocab/fetch-by/level/intermediate")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No vocabulary found for level: intermediate");
    }

    #[tokio::test]
    async fn vocab_search_and_random_draws() {
        let app = seeded_app().await;
        let (status, body) = send(app.clone(), get("/vocab/fetch-by/word/TABLE")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["word"], "стол");

        let (status, _) = send(app.clone(), get("/vocab/fetch-by/word/zebra")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(app.clone(), get("/vocab/fetch/random")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["word"].is_string());

        let (status, body) = send(app, get("/vocab/fetch/random10/level/beginner")).await;
        assert_eq!(status, StatusCode::OK);
        let drawn = body.as_array().unwrap();
        assert!(!drawn.is_empty() && drawn.len() <= 10);
        assert!(drawn.iter().all(|v| v["level"] == "beginner" && v["isLearned"] == false));
    }

    #[tokio::test]
    async fn empty_vocab_random_is_404() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, body) = send(app.clone(), get("/vocab/fetch/random")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No vocabulary entries found.");
        let (status, _) = send(app, get("/vocab/fetch/random20/level/advanced")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn vocab_add_validates_gender() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let body = json!({
            "word": "окно",
            "translation": "window",
            "partOfSpeech": "noun",
            "gender": "neuter",
            "exampleSentence": "Окно открыто.",
            "exampleTranslation": "The window is open.",
            "topic": "Everyday Objects",
            "level": "beginner"
        });
        let (status, resp) = send(app.clone(), post("/vocab/add", body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(resp["message"].as_str().unwrap().starts_with("Invalid gender provided."));

        let mut bad_topic = body.clone();
        bad_topic["gender"] = json!("neutral");
        bad_topic["topic"] = json!("Furniture");
        let (status, resp) = send(app.clone(), post("/vocab/add", bad_topic)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["message"], "Invalid topic provided in request body.");

        let mut ok = body;
        ok["gender"] = json!("neutral");
        let (status, created) = send(app, post("/vocab/add", ok)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["gender"], "neutral");
    }

    #[tokio::test]
    async fn phrase_status_counts() {
        let store = Arc::new(MemoryStore::new());
        store.insert_phrase(phrase("Привет", Topic::BasicSurvival, Level::Beginner, true)).await.unwrap();
        store.insert_phrase(phrase("Пока", Topic::BasicSurvival, Level::Beginner, false)).await.unwrap();
        store.insert_phrase(phrase("Где метро?", Topic::PlacesDirections, Level::Advanced, false)).await.unwrap();

        let (status, body) = send(app_with(store), get("/phrase/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "totalCount": 3,
                "learnedCount": 1,
                "notLearnedCount": 2,
                "beginnerCount": 2,
                "intermediateCount": 0,
                "advancedCount": 1,
                "topics": { "Basic Survival & Greetings": 2, "Places & Directions": 1 }
            })
        );
    }

    #[tokio::test]
    async fn phrase_lookups() {
        let app = seeded_app().await;
        let (status, body) = send(app.clone(), get("/phrase/fetch-by/topic/Verbs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(app.clone(), get("/phrase/fetch-by/topic/Weather")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid topic");

        let (status, body) = send(app.clone(), get("/phrase/fetch-by/word/station")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(app.clone(), get("/phrase/fetch-by/level/advanced")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(app, get("/phrase/fetch/random?n=2&level=beginner")).await;
        assert_eq!(status, StatusCode::OK);
        let drawn = body.as_array().unwrap();
        assert_eq!(drawn.len(), 2);
        assert!(drawn.iter().all(|p| p["level"] == "beginner"));
    }

    #[tokio::test]
    async fn phrase_add_requires_all_fields() {
        let app = app_with(Arc::new(MemoryStore::new()));
        let (status, body) = send(app.clone(), post("/phrase/add", json!({ "phrase": "Ура!" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "All fields are required.");

        let (status, created) = send(
            app.clone(),
            post(
                "/phrase/add",
                json!({
                    "phrase": "С днём рождения!",
                    "translation": "Happy birthday!",
                    "exampleSentence": "Мама, с днём рождения!",
                    "exampleTranslation": "Mom, happy birthday!",
                    "topic": "People & Family",
                    "level": "beginner"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["isLearned"], false);

        let (_, all) = send(app, get("/phrase/fetch-all")).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }
}
