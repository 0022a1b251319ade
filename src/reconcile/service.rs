//! Wires the reconciler to a storage collaborator. Every operation works on
//! a freshly loaded aggregate, mutates it fully in memory, and finishes with
//! a single save, so storage never sees a half-applied update. Conflicts
//! reported by storage propagate unchanged; there is no retry here.

use tracing::debug;
use uuid::Uuid;

use super::{
    reconciler,
    requests::{
        InterlinearTextRequest,
        RootRequest,
        SentencePayload,
        TextRequest,
        WordRequest,
    },
};
use crate::{
    arabic::root::same_root,
    core::{
        models::{
            InterlinearText,
            Root,
            Text,
            Word,
        },
        DarisError,
    },
    persistence::Storage,
};

pub struct ContentService<S: Storage> {
    storage: S,
}

impl<S: Storage> ContentService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn create_word(&mut self, req: &WordRequest) -> Result<Word, DarisError> {
        let word = reconciler::word_from_request(req)?;
        debug!(word_id = %word.id, links = word.dictionary_links.len(), "creating word");
        self.storage.save_word(word.clone())?;
        Ok(word)
    }

    pub fn update_word(&mut self, id: Uuid, req: &WordRequest) -> Result<Word, DarisError> {
        let mut word =
            self.storage.load_word(id)?.ok_or_else(|| DarisError::not_found("word", id))?;
        reconciler::apply_word_update(req, &mut word)?;
        self.storage.save_word(word.clone())?;
        Ok(word)
    }

    pub fn get_word(&self, id: Uuid) -> Result<Word, DarisError> {
        self.storage.load_word(id)?.ok_or_else(|| DarisError::not_found("word", id))
    }

    pub fn list_words(&self) -> Result<Vec<Word>, DarisError> {
        self.storage.list_words()
    }

    /// Removes the word and clears every alignment that referenced it. The
    /// reference is weak: alignments survive, only the link goes away.
    pub fn delete_word(&mut self, id: Uuid) -> Result<(), DarisError> {
        if !self.storage.delete_word(id)? {
            return Err(DarisError::not_found("word", id));
        }

        for mut text in self.storage.list_interlinear_texts()? {
            let mut cleared = 0;
            for sentence in &mut text.sentences {
                for alignment in &mut sentence.alignments {
                    if alignment.word_id == Some(id) {
                        alignment.word_id = None;
                        cleared += 1;
                    }
                }
            }
            if cleared > 0 {
                debug!(text_id = %text.id, cleared, "cleared alignment references to deleted word");
                self.storage.save_interlinear_text(text)?;
            }
        }
        Ok(())
    }

    pub fn create_text(&mut self, req: &TextRequest) -> Result<Text, DarisError> {
        let text = reconciler::text_from_request(req);
        self.storage.save_text(text.clone())?;
        Ok(text)
    }

    pub fn update_text(&mut self, id: Uuid, req: &TextRequest) -> Result<Text, DarisError> {
        let mut text =
            self.storage.load_text(id)?.ok_or_else(|| DarisError::not_found("text", id))?;
        reconciler::apply_text_update(req, &mut text);
        self.storage.save_text(text.clone())?;
        Ok(text)
    }

    pub fn get_text(&self, id: Uuid) -> Result<Text, DarisError> {
        self.storage.load_text(id)?.ok_or_else(|| DarisError::not_found("text", id))
    }

    pub fn list_texts(&self) -> Result<Vec<Text>, DarisError> {
        self.storage.list_texts()
    }

    pub fn delete_text(&mut self, id: Uuid) -> Result<(), DarisError> {
        if !self.storage.delete_text(id)? {
            return Err(DarisError::not_found("text", id));
        }
        Ok(())
    }

    pub fn create_interlinear_text(
        &mut self,
        req: &InterlinearTextRequest,
    ) -> Result<InterlinearText, DarisError> {
        let text = reconciler::interlinear_from_request(req)?;
        debug!(text_id = %text.id, sentences = text.sentences.len(), "creating interlinear text");
        self.storage.save_interlinear_text(text.clone())?;
        Ok(text)
    }

    pub fn update_interlinear_text(
        &mut self,
        id: Uuid,
        req: &InterlinearTextRequest,
    ) -> Result<InterlinearText, DarisError> {
        let mut text = self
            .storage
            .load_interlinear_text(id)?
            .ok_or_else(|| DarisError::not_found("interlinear text", id))?;
        reconciler::apply_interlinear_update(req, &mut text)?;
        self.storage.save_interlinear_text(text.clone())?;
        Ok(text)
    }

    pub fn get_interlinear_text(&self, id: Uuid) -> Result<InterlinearText, DarisError> {
        self.storage
            .load_interlinear_text(id)?
            .ok_or_else(|| DarisError::not_found("interlinear text", id))
    }

    pub fn list_interlinear_texts(&self) -> Result<Vec<InterlinearText>, DarisError> {
        self.storage.list_interlinear_texts()
    }

    pub fn delete_interlinear_text(&mut self, id: Uuid) -> Result<(), DarisError> {
        if !self.storage.delete_interlinear_text(id)? {
            return Err(DarisError::not_found("interlinear text", id));
        }
        Ok(())
    }

    /// Partial update of one sentence inside an interlinear text, honoring
    /// the optional-preserve alignment fields.
    pub fn update_sentence(
        &mut self,
        text_id: Uuid,
        sentence_id: Uuid,
        payload: &SentencePayload,
    ) -> Result<InterlinearText, DarisError> {
        let mut text = self
            .storage
            .load_interlinear_text(text_id)?
            .ok_or_else(|| DarisError::not_found("interlinear text", text_id))?;

        let sentence = text
            .sentences
            .iter_mut()
            .find(|s| s.id == sentence_id)
            .ok_or_else(|| DarisError::not_found("sentence", sentence_id))?;
        reconciler::apply_sentence_update(payload, sentence)?;

        text.updated_at = chrono::Utc::now();
        self.storage.save_interlinear_text(text.clone())?;
        Ok(text)
    }

    pub fn create_root(&mut self, req: &RootRequest) -> Result<Root, DarisError> {
        let mut root = reconciler::root_from_request(req)?;
        root.word_count = self.count_words_for_root(&root.normalized_form)?;
        self.storage.save_root(root.clone())?;
        Ok(root)
    }

    pub fn update_root(&mut self, id: Uuid, req: &RootRequest) -> Result<Root, DarisError> {
        let mut root =
            self.storage.load_root(id)?.ok_or_else(|| DarisError::not_found("root", id))?;
        reconciler::apply_root_update(req, &mut root)?;
        root.word_count = self.count_words_for_root(&root.normalized_form)?;
        self.storage.save_root(root.clone())?;
        Ok(root)
    }

    /// Loads a root with its derived word count refreshed against the
    /// current vocabulary.
    pub fn get_root(&self, id: Uuid) -> Result<Root, DarisError> {
        let mut root =
            self.storage.load_root(id)?.ok_or_else(|| DarisError::not_found("root", id))?;
        root.word_count = self.count_words_for_root(&root.normalized_form)?;
        Ok(root)
    }

    pub fn list_roots(&self) -> Result<Vec<Root>, DarisError> {
        let mut roots = self.storage.list_roots()?;
        for root in &mut roots {
            root.word_count = self.count_words_for_root(&root.normalized_form)?;
        }
        Ok(roots)
    }

    pub fn delete_root(&mut self, id: Uuid) -> Result<(), DarisError> {
        if !self.storage.delete_root(id)? {
            return Err(DarisError::not_found("root", id));
        }
        Ok(())
    }

    fn count_words_for_root(&self, normalized_form: &str) -> Result<usize, DarisError> {
        let count = self
            .storage
            .list_words()?
            .iter()
            .filter(|word| {
                word.root.as_deref().map_or(false, |root| same_root(root, normalized_form))
            })
            .count();
        Ok(count)
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
