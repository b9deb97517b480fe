//! Built-in seed content so the API is useful without a content bank.
//!
//! Seeds go through the same validation as POSTed content.

use crate::protocol::{NewPhraseIn, NewQuestionIn, NewVocabIn};

fn s(v: &str) -> Option<String> { Some(v.to_string()) }

fn word(w: &str, tr: &str, pos: &str, gender: &str, ex: &str, ex_tr: &str, topic: &str, level: &str) -> NewVocabIn {
  NewVocabIn {
    word: s(w),
    translation: s(tr),
    part_of_speech: s(pos),
    gender: s(gender),
    plural: None,
    example_sentence: s(ex),
    example_translation: s(ex_tr),
    topic: s(topic),
    level: s(level),
    is_learned: Some(false),
  }
}

pub fn seed_vocab() -> Vec<NewVocabIn> {
  vec![
    word("привет", "hi", "interjection", "neutral", "Привет, Анна!", "Hi, Anna!", "Basic Survival & Greetings", "beginner"),
    word("спасибо", "thank you", "interjection", "neutral", "Спасибо за помощь.", "Thanks for the help.", "Basic Survival & Greetings", "beginner"),
    word("стол", "table", "noun", "masculine", "Книга на столе.", "The book is on the table.", "Everyday Objects", "beginner"),
    word("вода", "water", "noun", "feminine", "Я пью воду.", "I drink water.", "Food & Drink", "beginner"),
    word("молоко", "milk", "noun", "neutral", "Молоко в холодильнике.", "The milk is in the fridge.", "Food & Drink", "beginner"),
    word("читать", "to read", "verb", "neutral", "Я люблю читать.", "I love to read.", "Verbs", "beginner"),
    word("путешествие", "journey", "noun", "neutral", "Путешествие было долгим.", "The journey was long.", "Travel & Transportation", "intermediate"),
    word("выносливый", "resilient", "adjective", "masculine", "Он очень выносливый.", "He is very resilient.", "Adjectives", "advanced"),
  ]
}

fn phrase(p: &str, tr: &str, ex: &str, ex_tr: &str, topic: &str, level: &str) -> NewPhraseIn {
  NewPhraseIn {
    phrase: s(p),
    translation: s(tr),
    example_sentence: s(ex),
    example_translation: s(ex_tr),
    topic: s(topic),
    level: s(level),
    is_learned: Some(false),
  }
}

pub fn seed_phrases() -> Vec<NewPhraseIn> {
  vec![
    phrase("Как дела?", "How are you?", "Привет! Как дела?", "Hi! How are you?", "Basic Survival & Greetings", "beginner"),
    phrase("Меня зовут…", "My name is…", "Меня зовут Иван.", "My name is Ivan.", "Basic Survival & Greetings", "beginner"),
    phrase("Счёт, пожалуйста.", "The check, please.", "Официант, счёт, пожалуйста.", "Waiter, the check, please.", "Food & Drink", "intermediate"),
    phrase("Где находится вокзал?", "Where is the station?", "Извините, где находится вокзал?", "Excuse me, where is the station?", "Places & Directions", "intermediate"),
  ]
}

fn choice(kind: &str, q: &str, options: &[&str], answer: &str, difficulty: i64, level: &str) -> NewQuestionIn {
  NewQuestionIn {
    question: s(q),
    options: Some(options.iter().map(|o| o.to_string()).collect()),
    answer: s(answer),
    explanation: None,
    topic: s("Basic Survival & Greetings"),
    level: s(level),
    difficulty_score: Some(difficulty),
    kind: s(kind),
    source_lang: None,
    target_lang: None,
    acceptable_answers: None,
  }
}

fn written(q: &str, answer: &str, accept: &[&str], difficulty: i64, level: &str) -> NewQuestionIn {
  NewQuestionIn {
    question: s(q),
    options: None,
    answer: s(answer),
    explanation: None,
    topic: s("Basic Survival & Greetings"),
    level: s(level),
    difficulty_score: Some(difficulty),
    kind: s("written"),
    source_lang: s("en"),
    target_lang: s("ru"),
    acceptable_answers: Some(accept.iter().map(|a| a.to_string()).collect()),
  }
}

pub fn seed_questions() -> Vec<NewQuestionIn> {
  vec![
    choice("multiple-choice", "How do you say «hello» informally?", &["Привет", "Пока", "Спасибо"], "Привет", 1, "beginner"),
    choice("multiple-choice", "Which word means «thank you»?", &["Пожалуйста", "Спасибо", "Извините"], "Спасибо", 2, "beginner"),
    choice("multiple-choice", "Pick the formal greeting.", &["Привет", "Здравствуйте", "Салют"], "Здравствуйте", 4, "intermediate"),
    choice("fill-in-the-blank", "Доброе ___! (Good morning!)", &["утро", "вечер", "ночь"], "утро", 1, "beginner"),
    choice("fill-in-the-blank", "Как ___ зовут? (What is your name?)", &["тебя", "ты", "твой"], "тебя", 3, "beginner"),
    choice("fill-in-the-blank", "Рад с ___ познакомиться. (Nice to meet you.)", &["вами", "вы", "ваш"], "вами", 5, "intermediate"),
    choice("true-false", "«Пока» means «goodbye».", &["true", "false"], "true", 1, "beginner"),
    choice("true-false", "«Здравствуйте» is informal.", &["true", "false"], "false", 3, "beginner"),
    choice("true-false", "«До свидания» can be used with strangers.", &["true", "false"], "true", 4, "intermediate"),
    written("Translate: Good evening", "Добрый вечер", &["добрый вечер"], 2, "beginner"),
    written("Translate: See you tomorrow", "До завтра", &["до завтра"], 3, "beginner"),
    written("Translate: Nice to meet you", "Приятно познакомиться", &["очень приятно"], 5, "intermediate"),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::logic::{build_phrase, build_question, build_vocab};
  use chrono::Utc;

  #[test]
  fn every_seed_passes_validation() {
    let now = Utc::now();
    for v in seed_vocab() { build_vocab(v, now).unwrap(); }
    for p in seed_phrases() { build_phrase(p, now).unwrap(); }
    for q in seed_questions() { build_question(q, now).unwrap(); }
  }
}
