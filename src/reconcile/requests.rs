//! Deserialized request payloads as the transport layer hands them over.
//! Blank/length/bounds checks on plain scalars happen at the transport
//! boundary; the reconciler re-checks only the contracts it owns (root
//! validity, child required fields, link URL rules).

use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

use crate::{
    core::models::{
        Dialect,
        Difficulty,
        MasteryLevel,
        PartOfSpeech,
    },
    dictionary::DictionaryType,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRequest {
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    #[serde(default)]
    pub example_sentence: Option<String>,
    #[serde(default)]
    pub root: Option<String>,
    pub part_of_speech: PartOfSpeech,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub mastery_level: MasteryLevel,
    #[serde(default)]
    pub pronunciation_link: Option<String>,
    #[serde(default)]
    pub dictionary_links: Vec<DictionaryLinkPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryLinkPayload {
    pub dictionary_type: DictionaryType,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
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
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub dialect: Dialect,
    // Accepted for wire compatibility, never trusted: the stored count is
    // recomputed from `arabic_content` on every write.
    #[serde(default)]
    pub word_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterlinearTextRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub sentences: Vec<SentencePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentencePayload {
    pub arabic: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub annotations: Option<String>,
    #[serde(default)]
    pub sentence_order: Option<i32>,
    #[serde(default)]
    pub alignments: Vec<AlignmentPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentPayload {
    pub arabic_tokens: String,
    #[serde(default)]
    pub transliteration_tokens: String,
    #[serde(default)]
    pub translation_tokens: String,
    #[serde(default)]
    pub token_order: Option<i32>,
    #[serde(default)]
    pub word_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootRequest {
    /// Free-text root input, e.g. "ك ت ب" or "كتب".
    pub root: String,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
}
