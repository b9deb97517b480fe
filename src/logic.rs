//! Content validation shared by the HTTP handlers and the startup content loader.
//!
//! Turns loosely typed inputs (request bodies, TOML bank entries, query values)
//! into stored records, enforcing the schema invariants:
//!   - choice-style questions carry at least two options
//!   - written questions carry both a source and a target language
//!   - topics, levels, genders, languages and question types come from closed sets
//!   - difficulty scores lie in 1..=10

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Gender, Lang, Level, Phrase, Question, QuestionType, Topic, Vocab};
use crate::error::ValidationError;
use crate::protocol::{NewPhraseIn, NewQuestionIn, NewVocabIn};
use crate::util::non_blank;

pub const INVALID_TOPIC: &str = "Invalid topic provided.";
pub const INVALID_BODY_TOPIC: &str = "Invalid topic provided in request body.";
pub const INVALID_LEVEL: &str = "Invalid level provided.";
pub const INVALID_TYPE: &str = "Invalid question type provided.";
pub const INVALID_GENDER: &str = "Invalid gender provided. Allowed values are: masculine, feminine, neutral.";
const INVALID_LANG: &str = "Invalid language provided. Allowed values are: en, ru.";

const MIN_DIFFICULTY: i64 = 1;
const MAX_DIFFICULTY: i64 = 10;
const MIN_OPTIONS: usize = 2;

/// Parse a value from a closed set, reporting `msg` on failure.
pub fn parse_enum<T: FromStr>(raw: &str, msg: &str) -> Result<T, ValidationError> {
  raw.trim().parse::<T>().map_err(|_| ValidationError::new(msg))
}

/// Like `parse_enum`, for optional query parameters.
pub fn parse_opt<T: FromStr>(raw: Option<&str>, msg: &str) -> Result<Option<T>, ValidationError> {
  raw.map(|s| parse_enum(s, msg)).transpose()
}

pub fn build_question(input: NewQuestionIn, now: DateTime<Utc>) -> Result<Question, ValidationError> {
  let (Some(text), Some(answer), Some(topic), Some(level), Some(kind)) = (
    non_blank(input.question),
    non_blank(input.answer),
    non_blank(input.topic),
    non_blank(input.level),
    non_blank(input.kind),
  ) else {
    return Err(ValidationError::new("Missing required fields."));
  };

  let kind: QuestionType = parse_enum(&kind, INVALID_TYPE)?;
  let options = input.options.map(|opts| {
    opts.into_iter().map(|o| o.trim().to_string()).collect::<Vec<_>>()
  });

  if kind.requires_options() && options.as_ref().map_or(true, |o| o.len() < MIN_OPTIONS) {
    return Err(ValidationError::new("Options must have at least 2 items."));
  }

  let source_lang: Option<Lang> = parse_opt(non_blank(input.source_lang).as_deref(), INVALID_LANG)?;
  let target_lang: Option<Lang> = parse_opt(non_blank(input.target_lang).as_deref(), INVALID_LANG)?;
  if kind == QuestionType::Written && (source_lang.is_none() || target_lang.is_none()) {
    return Err(ValidationError::new(
      "Source and Target language are required for written questions.",
    ));
  }

  let difficulty = input.difficulty_score.unwrap_or(MIN_DIFFICULTY);
  if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
    return Err(ValidationError::new("difficultyScore must be between 1 and 10."));
  }

  Ok(Question {
    id: Uuid::new_v4(),
    text,
    options,
    answer,
    explanation: non_blank(input.explanation),
    topic: parse_enum(&topic, INVALID_TOPIC)?,
    level: parse_enum(&level, INVALID_LEVEL)?,
    difficulty_score: difficulty as u8,
    kind,
    source_lang,
    target_lang,
    acceptable_answers: input.acceptable_answers.unwrap_or_default(),
    is_learned: false,
    created_at: now,
    updated_at: now,
  })
}

pub fn build_vocab(input: NewVocabIn, now: DateTime<Utc>) -> Result<Vocab, ValidationError> {
  let topic: Topic = match non_blank(input.topic) {
    Some(t) => parse_enum(&t, INVALID_BODY_TOPIC)?,
    None => return Err(ValidationError::new(INVALID_BODY_TOPIC)),
  };
  let gender: Gender = parse_opt(non_blank(input.gender).as_deref(), INVALID_GENDER)?.unwrap_or_default();

  let (Some(word), Some(translation), Some(part_of_speech), Some(example_sentence), Some(example_translation), Some(level)) = (
    non_blank(input.word),
    non_blank(input.translation),
    non_blank(input.part_of_speech),
    non_blank(input.example_sentence),
    non_blank(input.example_translation),
    non_blank(input.level),
  ) else {
    return Err(ValidationError::new("Missing required fields."));
  };

  Ok(Vocab {
    id: Uuid::new_v4(),
    word,
    translation,
    part_of_speech,
    gender,
    plural: non_blank(input.plural),
    example_sentence,
    example_translation,
    topic,
    level: parse_enum(&level, INVALID_LEVEL)?,
    is_learned: input.is_learned.unwrap_or(false),
    created_at: now,
    updated_at: now,
  })
}

pub fn build_phrase(input: NewPhraseIn, now: DateTime<Utc>) -> Result<Phrase, ValidationError> {
  let (Some(phrase), Some(translation), Some(example_sentence), Some(example_translation), Some(topic), Some(level)) = (
    non_blank(input.phrase),
    non_blank(input.translation),
    non_blank(input.example_sentence),
    non_blank(input.example_translation),
    non_blank(input.topic),
    non_blank(input.level),
  ) else {
    return Err(ValidationError::new("All fields are required."));
  };

  Ok(Phrase {
    id: Uuid::new_v4(),
    phrase,
    translation,
    example_sentence,
    example_translation,
    topic: parse_enum(&topic, INVALID_TOPIC)?,
    level: parse_enum::<Level>(&level, INVALID_LEVEL)?,
    is_learned: input.is_learned.unwrap_or(false),
    created_at: now,
    updated_at: now,
  })
}
