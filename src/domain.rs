//! Domain models: vocabulary, phrases, quiz questions and the closed value sets
//! (topics, levels, question types, genders, languages) they are tagged with.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Learner proficiency band shared by every collection.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
}

impl Level {
  pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

  pub fn as_str(&self) -> &'static str {
    match self {
      Level::Beginner => "beginner",
      Level::Intermediate => "intermediate",
      Level::Advanced => "advanced",
    }
  }
}

impl FromStr for Level {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Level::ALL.into_iter().find(|l| l.as_str() == s).ok_or(())
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Thematic grouping. The wire value is the human label, e.g. "Food & Drink".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
  #[serde(rename = "Basic Survival & Greetings")] BasicSurvival,
  #[serde(rename = "Everyday Objects")] EverydayObjects,
  #[serde(rename = "Verbs")] Verbs,
  #[serde(rename = "Adjectives")] Adjectives,
  #[serde(rename = "Numbers & Quantities")] Numbers,
  #[serde(rename = "Time & Dates")] TimeDates,
  #[serde(rename = "People & Family")] PeopleFamily,
  #[serde(rename = "Food & Drink")] FoodDrink,
  #[serde(rename = "Travel & Transportation")] TravelTransport,
  #[serde(rename = "Work & Study")] WorkStudy,
  #[serde(rename = "Health & Body")] HealthBody,
  #[serde(rename = "Places & Directions")] PlacesDirections,
  #[serde(rename = "Hobbies & Interests")] HobbiesInterests,
  #[serde(rename = "Nature & Environment")] NatureEnvironment,
  #[serde(rename = "Adverbs")] Adverbs,
  #[serde(rename = "Prepositions")] Prepositions,
  #[serde(rename = "Conjunctions & Linking Words")] Conjunctions,
  #[serde(rename = "Pronouns")] Pronouns,
}

impl Topic {
  pub const ALL: [Topic; 18] = [
    Topic::BasicSurvival, Topic::EverydayObjects, Topic::Verbs, Topic::Adjectives,
    Topic::Numbers, Topic::TimeDates, Topic::PeopleFamily, Topic::FoodDrink,
    Topic::TravelTransport, Topic::WorkStudy, Topic::HealthBody, Topic::PlacesDirections,
    Topic::HobbiesInterests, Topic::NatureEnvironment, Topic::Adverbs, Topic::Prepositions,
    Topic::Conjunctions, Topic::Pronouns,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Topic::BasicSurvival => "Basic Survival & Greetings",
      Topic::EverydayObjects => "Everyday Objects",
      Topic::Verbs => "Verbs",
      Topic::Adjectives => "Adjectives",
      Topic::Numbers => "Numbers & Quantities",
      Topic::TimeDates => "Time & Dates",
      Topic::PeopleFamily => "People & Family",
      Topic::FoodDrink => "Food & Drink",
      Topic::TravelTransport => "Travel & Transportation",
      Topic::WorkStudy => "Work & Study",
      Topic::HealthBody => "Health & Body",
      Topic::PlacesDirections => "Places & Directions",
      Topic::HobbiesInterests => "Hobbies & Interests",
      Topic::NatureEnvironment => "Nature & Environment",
      Topic::Adverbs => "Adverbs",
      Topic::Prepositions => "Prepositions",
      Topic::Conjunctions => "Conjunctions & Linking Words",
      Topic::Pronouns => "Pronouns",
    }
  }
}

impl FromStr for Topic {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Topic::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
  }
}

impl fmt::Display for Topic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Question format. Lessons group questions into one bucket per variant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
  MultipleChoice,
  FillInTheBlank,
  TrueFalse,
  /// Free translation between `source_lang` and `target_lang`.
  Written,
}

impl QuestionType {
  pub const ALL: [QuestionType; 4] = [
    QuestionType::MultipleChoice,
    QuestionType::FillInTheBlank,
    QuestionType::TrueFalse,
    QuestionType::Written,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      QuestionType::MultipleChoice => "multiple-choice",
      QuestionType::FillInTheBlank => "fill-in-the-blank",
      QuestionType::TrueFalse => "true-false",
      QuestionType::Written => "written",
    }
  }

  /// Every format except `written` is answered by picking from `options`.
  pub fn requires_options(&self) -> bool { !matches!(self, QuestionType::Written) }
}

impl FromStr for QuestionType {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    QuestionType::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
  }
}

impl fmt::Display for QuestionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Masculine,
  Feminine,
  #[default]
  Neutral,
}

impl FromStr for Gender {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "masculine" => Ok(Gender::Masculine),
      "feminine" => Ok(Gender::Feminine),
      "neutral" => Ok(Gender::Neutral),
      _ => Err(()),
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
  En,
  Ru,
}

impl FromStr for Lang {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "en" => Ok(Lang::En),
      "ru" => Ok(Lang::Ru),
      _ => Err(()),
    }
  }
}

/// Stored quiz question.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub id: Uuid,
  #[serde(rename = "question")]
  pub text: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub options: Option<Vec<String>>,
  pub answer: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
  pub topic: Topic,
  pub level: Level,
  /// 1 (easiest) to 10.
  pub difficulty_score: u8,
  #[serde(rename = "type")]
  pub kind: QuestionType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source_lang: Option<Lang>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_lang: Option<Lang>,
  #[serde(default)]
  pub acceptable_answers: Vec<String>,
  pub is_learned: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Stored vocabulary word.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vocab {
  pub id: Uuid,
  pub word: String,
  pub translation: String,
  pub part_of_speech: String,
  pub gender: Gender,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plural: Option<String>,
  pub example_sentence: String,
  pub example_translation: String,
  pub topic: Topic,
  pub level: Level,
  pub is_learned: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Stored phrase with an example of use.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
  pub id: Uuid,
  pub phrase: String,
  pub translation: String,
  pub example_sentence: String,
  pub example_translation: String,
  pub topic: Topic,
  pub level: Level,
  pub is_learned: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
