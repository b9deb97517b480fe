//! Public request/response shapes for the HTTP endpoints (serde ready).
//!
//! Enum-valued inputs arrive as raw strings and are checked in `logic`, so a
//! bad value yields our own 400 message rather than an extractor rejection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Vocab;

//
// Request bodies (also the entry shape of the TOML content bank)
//

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestionIn {
  pub question: Option<String>,
  pub options: Option<Vec<String>>,
  pub answer: Option<String>,
  pub explanation: Option<String>,
  pub topic: Option<String>,
  pub level: Option<String>,
  pub difficulty_score: Option<i64>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
  pub source_lang: Option<String>,
  pub target_lang: Option<String>,
  pub acceptable_answers: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVocabIn {
  pub word: Option<String>,
  pub translation: Option<String>,
  pub part_of_speech: Option<String>,
  pub gender: Option<String>,
  pub plural: Option<String>,
  pub example_sentence: Option<String>,
  pub example_translation: Option<String>,
  pub topic: Option<String>,
  pub level: Option<String>,
  pub is_learned: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhraseIn {
  pub phrase: Option<String>,
  pub translation: Option<String>,
  pub example_sentence: Option<String>,
  pub example_translation: Option<String>,
  pub topic: Option<String>,
  pub level: Option<String>,
  pub is_learned: Option<bool>,
}

//
// Query strings
//

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonQuery {
  /// Kept raw: anything unparsable means lesson 1.
  pub lesson_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabTopicQuery {
  pub level: Option<String>,
  pub is_learned: Option<String>,
  pub gender: Option<String>,
  pub part_of_speech: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseTopicQuery {
  pub level: Option<String>,
  pub is_learned: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomPhraseQuery {
  pub n: Option<String>,
  pub topic: Option<String>,
  pub level: Option<String>,
  pub is_learned: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomQuestionQuery {
  pub topic: Option<String>,
  pub level: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
  pub is_learned: Option<String>,
  pub min_difficulty: Option<String>,
  pub max_difficulty: Option<String>,
  pub n: Option<String>,
}

//
// Responses
//

/// Echo of the optional filters applied to a by-topic vocabulary lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub level: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_learned: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VocabByTopicOut {
  pub message: String,
  pub filters: AppliedFilters,
  pub vocab: Vec<Vocab>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhraseStatusOut {
  pub total_count: usize,
  pub learned_count: usize,
  pub not_learned_count: usize,
  pub beginner_count: usize,
  pub intermediate_count: usize,
  pub advanced_count: usize,
  /// Topic label → phrase count.
  pub topics: BTreeMap<String, usize>,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
