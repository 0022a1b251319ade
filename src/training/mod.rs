//! Review sessions over the vocabulary. Mastery moves one step per answer;
//! this module does no interval or due-date scheduling.

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    core::{
        models::{
            Dialect,
            MasteryLevel,
            ReviewMode,
            Word,
        },
        DarisError,
    },
    persistence::Storage,
    reconcile::ContentService,
};

fn default_max_words() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTrainingSessionRequest {
    pub review_mode: ReviewMode,
    #[serde(default)]
    pub dialect: Option<Dialect>,
    /// Mastery levels to draw from; empty means all levels.
    #[serde(default)]
    pub levels: Vec<MasteryLevel>,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: Uuid,
    pub review_mode: ReviewMode,
    pub word_ids: Vec<Uuid>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResultRequest {
    pub word_id: Uuid,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    pub word_id: Uuid,
    pub previous_level: MasteryLevel,
    pub new_level: MasteryLevel,
}

impl MasteryLevel {
    pub fn promoted(self) -> MasteryLevel {
        match self {
            MasteryLevel::New => MasteryLevel::Learning,
            MasteryLevel::Learning => MasteryLevel::Known,
            MasteryLevel::Known => MasteryLevel::Mastered,
            MasteryLevel::Mastered => MasteryLevel::Mastered,
        }
    }

    /// One step down, saturating at Learning: a word that has been reviewed
    /// never counts as New again.
    pub fn demoted(self) -> MasteryLevel {
        match self {
            MasteryLevel::New => MasteryLevel::New,
            MasteryLevel::Learning => MasteryLevel::Learning,
            MasteryLevel::Known => MasteryLevel::Learning,
            MasteryLevel::Mastered => MasteryLevel::Known,
        }
    }
}

/// Filters the vocabulary down to session candidates: requested mastery
/// levels, optional dialect, least recently touched first, capped at
/// `max_words`.
pub fn select_session_words(words: Vec<Word>, req: &StartTrainingSessionRequest) -> Vec<Word> {
    let mut candidates: Vec<Word> = words
        .into_iter()
        .filter(|word| req.levels.is_empty() || req.levels.contains(&word.mastery_level))
        .filter(|word| req.dialect.map_or(true, |dialect| word.dialect == dialect))
        .collect();

    candidates.sort_by_key(|word| (word.updated_at, word.id));
    candidates.truncate(req.max_words);
    candidates
}

impl<S: Storage> ContentService<S> {
    pub fn start_training_session(
        &self,
        req: &StartTrainingSessionRequest,
    ) -> Result<TrainingSession, DarisError> {
        let words = select_session_words(self.list_words()?, req);
        debug!(words = words.len(), "starting training session");

        Ok(TrainingSession {
            id: Uuid::new_v4(),
            review_mode: req.review_mode,
            word_ids: words.into_iter().map(|word| word.id).collect(),
            started_at: Utc::now(),
        })
    }

    pub fn record_result(&mut self, req: &RecordResultRequest) -> Result<TrainingResult, DarisError> {
        let mut word = self.get_word(req.word_id)?;

        let previous_level = word.mastery_level;
        word.mastery_level =
            if req.correct { previous_level.promoted() } else { previous_level.demoted() };
        word.updated_at = Utc::now();

        let new_level = word.mastery_level;
        self.storage_mut().save_word(word)?;

        Ok(TrainingResult { word_id: req.word_id, previous_level, new_level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::models::{
            Difficulty,
            PartOfSpeech,
        },
        persistence::MemoryStore,
        reconcile::requests::WordRequest,
    };

    fn word_request(arabic: &str, dialect: Dialect, mastery_level: MasteryLevel) -> WordRequest {
        WordRequest {
            arabic: arabic.to_string(),
            transliteration: String::new(),
            translation: String::new(),
            example_sentence: None,
            root: None,
            part_of_speech: PartOfSpeech::Noun,
            notes: None,
            frequency: 0,
            difficulty: Difficulty::Beginner,
            dialect,
            mastery_level,
            pronunciation_link: None,
            dictionary_links: Vec::new(),
        }
    }

    #[test]
    fn test_mastery_transitions() {
        assert_eq!(MasteryLevel::New.promoted(), MasteryLevel::Learning);
        assert_eq!(MasteryLevel::Learning.promoted(), MasteryLevel::Known);
        assert_eq!(MasteryLevel::Known.promoted(), MasteryLevel::Mastered);
        assert_eq!(MasteryLevel::Mastered.promoted(), MasteryLevel::Mastered); // saturates

        assert_eq!(MasteryLevel::Mastered.demoted(), MasteryLevel::Known);
        assert_eq!(MasteryLevel::Known.demoted(), MasteryLevel::Learning);
        assert_eq!(MasteryLevel::Learning.demoted(), MasteryLevel::Learning); // never back to New
        assert_eq!(MasteryLevel::New.demoted(), MasteryLevel::New);
    }

    #[test]
    fn test_session_selection_filters_and_caps() {
        let mut service = ContentService::new(MemoryStore::new());
        service
            .create_word(&word_request("كتاب", Dialect::Msa, MasteryLevel::New))
            .expect("create");
        service
            .create_word(&word_request("قلم", Dialect::Msa, MasteryLevel::Known))
            .expect("create");
        service
            .create_word(&word_request("إزيك", Dialect::Egyptian, MasteryLevel::New))
            .expect("create");

        let req = StartTrainingSessionRequest {
            review_mode: ReviewMode::ArabicToTranslation,
            dialect: Some(Dialect::Msa),
            levels: vec![MasteryLevel::New],
            max_words: 10,
        };
        let session = service.start_training_session(&req).expect("session");
        assert_eq!(session.word_ids.len(), 1);

        // Empty level filter means every level qualifies
        let req_all = StartTrainingSessionRequest {
            review_mode: ReviewMode::Mixed,
            dialect: None,
            levels: Vec::new(),
            max_words: 2,
        };
        let session_all = service.start_training_session(&req_all).expect("session");
        assert_eq!(session_all.word_ids.len(), 2); // capped by max_words
    }

    #[test]
    fn test_record_result_moves_mastery() {
        let mut service = ContentService::new(MemoryStore::new());
        let word = service
            .create_word(&word_request("درس", Dialect::Msa, MasteryLevel::New))
            .expect("create");

        let result = service
            .record_result(&RecordResultRequest { word_id: word.id, correct: true })
            .expect("record");
        assert_eq!(result.previous_level, MasteryLevel::New);
        assert_eq!(result.new_level, MasteryLevel::Learning);

        let result = service
            .record_result(&RecordResultRequest { word_id: word.id, correct: false })
            .expect("record");
        assert_eq!(result.new_level, MasteryLevel::Learning); // saturates above New

        let missing = Uuid::new_v4();
        match service.record_result(&RecordResultRequest { word_id: missing, correct: true }) {
            Err(DarisError::NotFound { entity, .. }) => assert_eq!(entity, "word"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
