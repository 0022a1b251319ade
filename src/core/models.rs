use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

use crate::dictionary::DictionaryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Particle,
    Interjection,
    Phrase,
    Other,
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let readable = match self {
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::Adjective => "Adjective",
            PartOfSpeech::Adverb => "Adverb",
            PartOfSpeech::Pronoun => "Pronoun",
            PartOfSpeech::Preposition => "Preposition",
            PartOfSpeech::Conjunction => "Conjunction",
            PartOfSpeech::Particle => "Particle",
            PartOfSpeech::Interjection => "Interjection",
            PartOfSpeech::Phrase => "Phrase",
            PartOfSpeech::Other => "Other",
        };
        write!(f, "{}", readable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Beginner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    Msa, // Modern Standard Arabic
    Classical,
    Egyptian,
    Levantine,
    Gulf,
    Maghrebi,
    Iraqi,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect::Msa
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let readable = match self {
            Dialect::Msa => "Modern Standard Arabic",
            Dialect::Classical => "Classical Arabic",
            Dialect::Egyptian => "Egyptian",
            Dialect::Levantine => "Levantine",
            Dialect::Gulf => "Gulf",
            Dialect::Maghrebi => "Maghrebi",
            Dialect::Iraqi => "Iraqi",
        };
        write!(f, "{}", readable)
    }
}

/// Coarse familiarity with a word. Not a scheduling state; the review flow
/// only ever moves it one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasteryLevel {
    New,
    Learning,
    Known,
    Mastered,
}

impl Default for MasteryLevel {
    fn default() -> Self {
        MasteryLevel::New
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewMode {
    ArabicToTranslation,
    TranslationToArabic,
    Mixed,
}

/// A vocabulary entry together with the dictionary links it owns. Links are
/// replaced wholesale on every update, never merged field-by-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: Uuid,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    #[serde(default)]
    pub example_sentence: Option<String>,
    #[serde(default)]
    pub root: Option<String>, // Free text; matched against Root aggregates via normalization
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub notes: Option<String>,
    pub frequency: u32,
    pub difficulty: Difficulty,
    pub dialect: Dialect,
    pub mastery_level: MasteryLevel,
    #[serde(default)]
    pub pronunciation_link: Option<String>,
    #[serde(default)]
    pub dictionary_links: Vec<DictionaryLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryLink {
    pub word_id: Uuid,
    pub dictionary_type: DictionaryType,
    pub url: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A reading passage. `word_count` is derived from `arabic_content` on every
/// write and never taken from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub id: Uuid,
    pub title: String,
    pub arabic_content: String,
    #[serde(default)]
    pub transliteration: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub dialect: Dialect,
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterlinearText {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub dialect: Dialect,
    #[serde(default)]
    pub sentences: Vec<InterlinearSentence>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterlinearText {
    /// Sentences in display order. `sentence_order` values need not be
    /// contiguous; ascending sort defines the order.
    pub fn sorted_sentences(&self) -> Vec<&InterlinearSentence> {
        let mut sentences: Vec<&InterlinearSentence> = self.sentences.iter().collect();
        sentences.sort_by_key(|s| s.sentence_order);
        sentences
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterlinearSentence {
    pub id: Uuid,
    pub text_id: Uuid,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    #[serde(default)]
    pub annotations: Option<String>,
    pub sentence_order: i32,
    #[serde(default)]
    pub alignments: Vec<WordAlignment>,
}

impl InterlinearSentence {
    pub fn sorted_alignments(&self) -> Vec<&WordAlignment> {
        let mut alignments: Vec<&WordAlignment> = self.alignments.iter().collect();
        alignments.sort_by_key(|a| a.token_order);
        alignments
    }
}

/// One token-aligned slice of an interlinear sentence. `word_id` is a weak
/// reference into the vocabulary: deleting the Word clears it, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAlignment {
    pub sentence_id: Uuid,
    pub arabic_tokens: String,
    pub transliteration_tokens: String,
    pub translation_tokens: String,
    pub token_order: i32,
    #[serde(default)]
    pub word_id: Option<Uuid>,
}

/// A canonical Arabic root. `normalized_form`, `display_form` and
/// `letter_count` are pure functions of `letters`; `word_count` is derived
/// from the vocabulary at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Root {
    pub id: Uuid,
    pub letters: Vec<String>,
    pub normalized_form: String,
    pub display_form: String,
    pub letter_count: usize,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
