//! Storage collaborators. The service treats storage as a request/response
//! interface: load an aggregate, save it back whole. Cascade cleanup of
//! replaced children falls out of saving whole aggregates; identity
//! uniqueness is keyed on the aggregate id.

use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::PathBuf,
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};
use tracing::warn;
use uuid::Uuid;

use crate::core::{
    models::{
        InterlinearText,
        Root,
        Text,
        Word,
    },
    DarisError,
};

const APP_NAME: &str = "daris";

pub trait Storage {
    fn load_word(&self, id: Uuid) -> Result<Option<Word>, DarisError>;
    fn save_word(&mut self, word: Word) -> Result<(), DarisError>;
    /// Returns whether a word with this id existed.
    fn delete_word(&mut self, id: Uuid) -> Result<bool, DarisError>;
    fn list_words(&self) -> Result<Vec<Word>, DarisError>;

    fn load_text(&self, id: Uuid) -> Result<Option<Text>, DarisError>;
    fn save_text(&mut self, text: Text) -> Result<(), DarisError>;
    fn delete_text(&mut self, id: Uuid) -> Result<bool, DarisError>;
    fn list_texts(&self) -> Result<Vec<Text>, DarisError>;

    fn load_interlinear_text(&self, id: Uuid) -> Result<Option<InterlinearText>, DarisError>;
    fn save_interlinear_text(&mut self, text: InterlinearText) -> Result<(), DarisError>;
    fn delete_interlinear_text(&mut self, id: Uuid) -> Result<bool, DarisError>;
    fn list_interlinear_texts(&self) -> Result<Vec<InterlinearText>, DarisError>;

    fn load_root(&self, id: Uuid) -> Result<Option<Root>, DarisError>;
    fn save_root(&mut self, root: Root) -> Result<(), DarisError>;
    fn delete_root(&mut self, id: Uuid) -> Result<bool, DarisError>;
    fn list_roots(&self) -> Result<Vec<Root>, DarisError>;
}

/// HashMap-backed store. The default collaborator in tests and the cache
/// layer a future transport would sit on top of.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: HashMap<Uuid, Word>,
    texts: HashMap<Uuid, Text>,
    interlinear_texts: HashMap<Uuid, InterlinearText>,
    roots: HashMap<Uuid, Root>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn load_word(&self, id: Uuid) -> Result<Option<Word>, DarisError> {
        Ok(self.words.get(&id).cloned())
    }

    fn save_word(&mut self, word: Word) -> Result<(), DarisError> {
        self.words.insert(word.id, word);
        Ok(())
    }

    fn delete_word(&mut self, id: Uuid) -> Result<bool, DarisError> {
        Ok(self.words.remove(&id).is_some())
    }

    fn list_words(&self) -> Result<Vec<Word>, DarisError> {
        let mut words: Vec<Word> = self.words.values().cloned().collect();
        words.sort_by_key(|w| (w.created_at, w.id));
        Ok(words)
    }

    fn load_text(&self, id: Uuid) -> Result<Option<Text>, DarisError> {
        Ok(self.texts.get(&id).cloned())
    }

    fn save_text(&mut self, text: Text) -> Result<(), DarisError> {
        self.texts.insert(text.id, text);
        Ok(())
    }

    fn delete_text(&mut self, id: Uuid) -> Result<bool, DarisError> {
        Ok(self.texts.remove(&id).is_some())
    }

    fn list_texts(&self) -> Result<Vec<Text>, DarisError> {
        let mut texts: Vec<Text> = self.texts.values().cloned().collect();
        texts.sort_by_key(|t| (t.created_at, t.id));
        Ok(texts)
    }

    fn load_interlinear_text(&self, id: Uuid) -> Result<Option<InterlinearText>, DarisError> {
        Ok(self.interlinear_texts.get(&id).cloned())
    }

    fn save_interlinear_text(&mut self, text: InterlinearText) -> Result<(), DarisError> {
        self.interlinear_texts.insert(text.id, text);
        Ok(())
    }

    fn delete_interlinear_text(&mut self, id: Uuid) -> Result<bool, DarisError> {
        Ok(self.interlinear_texts.remove(&id).is_some())
    }

    fn list_interlinear_texts(&self) -> Result<Vec<InterlinearText>, DarisError> {
        let mut texts: Vec<InterlinearText> = self.interlinear_texts.values().cloned().collect();
        texts.sort_by_key(|t| (t.created_at, t.id));
        Ok(texts)
    }

    fn load_root(&self, id: Uuid) -> Result<Option<Root>, DarisError> {
        Ok(self.roots.get(&id).cloned())
    }

    fn save_root(&mut self, root: Root) -> Result<(), DarisError> {
        self.roots.insert(root.id, root);
        Ok(())
    }

    fn delete_root(&mut self, id: Uuid) -> Result<bool, DarisError> {
        Ok(self.roots.remove(&id).is_some())
    }

    fn list_roots(&self) -> Result<Vec<Root>, DarisError> {
        let mut roots: Vec<Root> = self.roots.values().cloned().collect();
        roots.sort_by_key(|r| (r.created_at, r.id));
        Ok(roots)
    }
}

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

/// JSON-file store, one file per collection under a data directory. Writes
/// go through a temp file in the same directory and land with a rename, so
/// a crash mid-write leaves the previous file intact.
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, DarisError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn open_default() -> Result<Self, DarisError> {
        Self::open(get_app_data_dir())
    }

    fn read_collection<T: DeserializeOwned>(&self, filename: &str) -> Result<Vec<T>, DarisError> {
        let path = self.dir.join(filename);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write_collection<T: Serialize>(
        &self,
        filename: &str,
        items: &[T],
    ) -> Result<(), DarisError> {
        let json = serde_json::to_string_pretty(items)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(self.dir.join(filename)).map_err(|e| DarisError::Io(Box::new(e.error)))?;
        Ok(())
    }

    fn load_item<T, F>(&self, filename: &str, matches: F) -> Result<Option<T>, DarisError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        Ok(self.read_collection(filename)?.into_iter().find(|item| matches(item)))
    }

    fn save_item<T, F>(&self, filename: &str, item: T, matches: F) -> Result<(), DarisError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self.read_collection(filename)?;
        match items.iter_mut().find(|existing| matches(existing)) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        self.write_collection(filename, &items)
    }

    fn delete_item<T, F>(&self, filename: &str, matches: F) -> Result<bool, DarisError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self.read_collection(filename)?;
        let before = items.len();
        items.retain(|item| !matches(item));
        if items.len() == before {
            return Ok(false);
        }
        self.write_collection(filename, &items)?;
        Ok(true)
    }
}

const WORDS_FILE: &str = "words.json";
const TEXTS_FILE: &str = "texts.json";
const INTERLINEAR_FILE: &str = "interlinear_texts.json";
const ROOTS_FILE: &str = "roots.json";

impl Storage for JsonStore {
    fn load_word(&self, id: Uuid) -> Result<Option<Word>, DarisError> {
        self.load_item(WORDS_FILE, |w: &Word| w.id == id)
    }

    fn save_word(&mut self, word: Word) -> Result<(), DarisError> {
        let id = word.id;
        self.save_item(WORDS_FILE, word, |w: &Word| w.id == id)
    }

    fn delete_word(&mut self, id: Uuid) -> Result<bool, DarisError> {
        self.delete_item(WORDS_FILE, |w: &Word| w.id == id)
    }

    fn list_words(&self) -> Result<Vec<Word>, DarisError> {
        self.read_collection(WORDS_FILE)
    }

    fn load_text(&self, id: Uuid) -> Result<Option<Text>, DarisError> {
        self.load_item(TEXTS_FILE, |t: &Text| t.id == id)
    }

    fn save_text(&mut self, text: Text) -> Result<(), DarisError> {
        let id = text.id;
        self.save_item(TEXTS_FILE, text, |t: &Text| t.id == id)
    }

    fn delete_text(&mut self, id: Uuid) -> Result<bool, DarisError> {
        self.delete_item(TEXTS_FILE, |t: &Text| t.id == id)
    }

    fn list_texts(&self) -> Result<Vec<Text>, DarisError> {
        self.read_collection(TEXTS_FILE)
    }

    fn load_interlinear_text(&self, id: Uuid) -> Result<Option<InterlinearText>, DarisError> {
        self.load_item(INTERLINEAR_FILE, |t: &InterlinearText| t.id == id)
    }

    fn save_interlinear_text(&mut self, text: InterlinearText) -> Result<(), DarisError> {
        let id = text.id;
        self.save_item(INTERLINEAR_FILE, text, |t: &InterlinearText| t.id == id)
    }

    fn delete_interlinear_text(&mut self, id: Uuid) -> Result<bool, DarisError> {
        self.delete_item(INTERLINEAR_FILE, |t: &InterlinearText| t.id == id)
    }

    fn list_interlinear_texts(&self) -> Result<Vec<InterlinearText>, DarisError> {
        self.read_collection(INTERLINEAR_FILE)
    }

    fn load_root(&self, id: Uuid) -> Result<Option<Root>, DarisError> {
        self.load_item(ROOTS_FILE, |r: &Root| r.id == id)
    }

    fn save_root(&mut self, root: Root) -> Result<(), DarisError> {
        let id = root.id;
        self.save_item(ROOTS_FILE, root, |r: &Root| r.id == id)
    }

    fn delete_root(&mut self, id: Uuid) -> Result<bool, DarisError> {
        self.delete_item(ROOTS_FILE, |r: &Root| r.id == id)
    }

    fn list_roots(&self) -> Result<Vec<Root>, DarisError> {
        self.read_collection(ROOTS_FILE)
    }
}

/// Best-effort read used at startup paths where a corrupt file should not
/// take the application down.
pub fn load_collection_or_default<T: DeserializeOwned>(store: &JsonStore, filename: &str) -> Vec<T> {
    match store.read_collection(filename) {
        Ok(items) => items,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", filename, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        core::models::{
            Dialect,
            Difficulty,
            MasteryLevel,
            PartOfSpeech,
        },
        reconcile::requests::WordRequest,
    };

    fn sample_word() -> Word {
        crate::reconcile::reconciler::word_from_request(&WordRequest {
            arabic: "كتاب".to_string(),
            transliteration: "kitab".to_string(),
            translation: "book".to_string(),
            example_sentence: None,
            root: Some("كتب".to_string()),
            part_of_speech: PartOfSpeech::Noun,
            notes: None,
            frequency: 120,
            difficulty: Difficulty::Beginner,
            dialect: Dialect::Msa,
            mastery_level: MasteryLevel::New,
            pronunciation_link: None,
            dictionary_links: Vec::new(),
        })
        .expect("valid word request")
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = JsonStore::open(dir.path()).expect("open store");

        let word = sample_word();
        store.save_word(word.clone()).expect("save");

        let loaded = store.load_word(word.id).expect("load").expect("present");
        assert_eq!(loaded.arabic, "كتاب");
        assert_eq!(loaded.root.as_deref(), Some("كتب"));

        // Reopening the same directory sees the same data
        let reopened = JsonStore::open(dir.path()).expect("reopen");
        assert_eq!(reopened.list_words().expect("list").len(), 1);

        assert!(store.delete_word(word.id).expect("delete"));
        assert!(!store.delete_word(word.id).expect("second delete is a no-op"));
        assert!(store.load_word(word.id).expect("load").is_none());
    }

    #[test]
    fn test_json_store_save_replaces_by_id() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = JsonStore::open(dir.path()).expect("open store");

        let mut word = sample_word();
        store.save_word(word.clone()).expect("save");
        word.translation = "a book".to_string();
        word.updated_at = Utc::now();
        store.save_word(word.clone()).expect("save again");

        let words = store.list_words().expect("list");
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].translation, "a book");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let word = sample_word();
        store.save_word(word.clone()).expect("save");
        assert!(store.load_word(word.id).expect("load").is_some());
        assert!(store.delete_word(word.id).expect("delete"));
        assert!(store.load_word(word.id).expect("load").is_none());
    }
}
