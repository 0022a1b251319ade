pub mod errors;
pub mod models;

pub use errors::DarisError;
pub use models::{
    Dialect, DictionaryLink, Difficulty, InterlinearSentence, InterlinearText, MasteryLevel,
    PartOfSpeech, ReviewMode, Root, Text, Word, WordAlignment,
};
