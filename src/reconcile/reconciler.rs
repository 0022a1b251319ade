//! Applies request payloads to aggregates. Create builds a fresh aggregate
//! with derived fields computed and children stamped with the parent id;
//! update validates first, then overwrites scalars from the payload and
//! replaces owned child collections wholesale. Validation happens before any
//! mutation, so a failed update leaves the aggregate untouched.

use chrono::Utc;
use uuid::Uuid;

use super::requests::{
    AlignmentPayload,
    DictionaryLinkPayload,
    InterlinearTextRequest,
    RootRequest,
    SentencePayload,
    TextRequest,
    WordRequest,
};
use crate::{
    arabic::{
        metrics::word_count,
        root::normalize,
    },
    core::{
        models::{
            DictionaryLink,
            InterlinearSentence,
            InterlinearText,
            Root,
            Text,
            Word,
            WordAlignment,
        },
        DarisError,
    },
};

pub fn word_from_request(req: &WordRequest) -> Result<Word, DarisError> {
    validate_links(&req.dictionary_links)?;

    let now = Utc::now();
    let id = Uuid::new_v4();
    Ok(Word {
        id,
        arabic: req.arabic.clone(),
        transliteration: req.transliteration.clone(),
        translation: req.translation.clone(),
        example_sentence: req.example_sentence.clone(),
        root: req.root.clone(),
        part_of_speech: req.part_of_speech,
        notes: req.notes.clone(),
        frequency: req.frequency,
        difficulty: req.difficulty,
        dialect: req.dialect,
        mastery_level: req.mastery_level,
        pronunciation_link: req.pronunciation_link.clone(),
        dictionary_links: build_links(&req.dictionary_links, id),
        created_at: now,
        updated_at: now,
    })
}

/// Overwrites every scalar from the payload and rebuilds the link collection
/// from scratch; previously attached links are discarded, never merged.
pub fn apply_word_update(req: &WordRequest, word: &mut Word) -> Result<(), DarisError> {
    validate_links(&req.dictionary_links)?;

    word.arabic = req.arabic.clone();
    word.transliteration = req.transliteration.clone();
    word.translation = req.translation.clone();
    word.example_sentence = req.example_sentence.clone();
    word.root = req.root.clone();
    word.part_of_speech = req.part_of_speech;
    word.notes = req.notes.clone();
    word.frequency = req.frequency;
    word.difficulty = req.difficulty;
    word.dialect = req.dialect;
    word.mastery_level = req.mastery_level;
    word.pronunciation_link = req.pronunciation_link.clone();
    word.dictionary_links = build_links(&req.dictionary_links, word.id);
    word.updated_at = Utc::now();
    Ok(())
}

fn validate_links(links: &[DictionaryLinkPayload]) -> Result<(), DarisError> {
    for link in links {
        if link.dictionary_type.requires_url() && link.url.trim().is_empty() {
            return Err(DarisError::validation(
                "dictionary_links",
                "a custom dictionary link must carry a url",
            ));
        }
    }
    Ok(())
}

fn build_links(links: &[DictionaryLinkPayload], word_id: Uuid) -> Vec<DictionaryLink> {
    links
        .iter()
        .map(|link| {
            let url = if link.url.trim().is_empty() {
                // Catalog types fall back to the catalog landing page
                link.dictionary_type.info().base_url.unwrap_or_default().to_string()
            } else {
                link.url.clone()
            };
            DictionaryLink {
                word_id,
                dictionary_type: link.dictionary_type,
                url,
                display_name: link.display_name.clone(),
            }
        })
        .collect()
}

pub fn text_from_request(req: &TextRequest) -> Text {
    let now = Utc::now();
    Text {
        id: Uuid::new_v4(),
        title: req.title.clone(),
        arabic_content: req.arabic_content.clone(),
        transliteration: req.transliteration.clone(),
        translation: req.translation.clone(),
        comments: req.comments.clone(),
        tags: req.tags.clone(),
        difficulty: req.difficulty,
        dialect: req.dialect,
        word_count: word_count(&req.arabic_content),
        created_at: now,
        updated_at: now,
    }
}

pub fn apply_text_update(req: &TextRequest, text: &mut Text) {
    text.title = req.title.clone();
    text.arabic_content = req.arabic_content.clone();
    text.transliteration = req.transliteration.clone();
    text.translation = req.translation.clone();
    text.comments = req.comments.clone();
    text.tags = req.tags.clone();
    text.difficulty = req.difficulty;
    text.dialect = req.dialect;
    text.word_count = word_count(&req.arabic_content);
    text.updated_at = Utc::now();
}

pub fn interlinear_from_request(req: &InterlinearTextRequest) -> Result<InterlinearText, DarisError> {
    validate_sentences(&req.sentences)?;

    let now = Utc::now();
    let id = Uuid::new_v4();
    Ok(InterlinearText {
        id,
        title: req.title.clone(),
        description: req.description.clone(),
        dialect: req.dialect,
        sentences: build_sentences(&req.sentences, id),
        created_at: now,
        updated_at: now,
    })
}

/// Sentences are replaced wholesale: the incoming list becomes the new
/// collection, each sentence and alignment freshly constructed under the
/// existing text id. `sentence_order` values are kept verbatim.
pub fn apply_interlinear_update(
    req: &InterlinearTextRequest,
    text: &mut InterlinearText,
) -> Result<(), DarisError> {
    validate_sentences(&req.sentences)?;

    text.title = req.title.clone();
    text.description = req.description.clone();
    text.dialect = req.dialect;
    text.sentences = build_sentences(&req.sentences, text.id);
    text.updated_at = Utc::now();
    Ok(())
}

fn validate_sentences(sentences: &[SentencePayload]) -> Result<(), DarisError> {
    for (index, sentence) in sentences.iter().enumerate() {
        validate_sentence_payload(sentence, index)?;
    }
    Ok(())
}

fn validate_sentence_payload(sentence: &SentencePayload, index: usize) -> Result<(), DarisError> {
    if sentence.arabic.trim().is_empty() {
        return Err(DarisError::validation(
            "sentences",
            format!("sentence {}: arabic text is required", index),
        ));
    }
    for (alignment_index, alignment) in sentence.alignments.iter().enumerate() {
        if alignment.arabic_tokens.trim().is_empty() {
            return Err(DarisError::validation(
                "alignments",
                format!(
                    "sentence {}, alignment {}: arabic tokens are required",
                    index, alignment_index
                ),
            ));
        }
    }
    Ok(())
}

fn build_sentences(payloads: &[SentencePayload], text_id: Uuid) -> Vec<InterlinearSentence> {
    payloads
        .iter()
        .map(|payload| {
            let sentence_id = Uuid::new_v4();
            InterlinearSentence {
                id: sentence_id,
                text_id,
                arabic: payload.arabic.clone(),
                transliteration: payload.transliteration.clone(),
                translation: payload.translation.clone(),
                annotations: payload.annotations.clone(),
                sentence_order: payload.sentence_order.unwrap_or(0),
                alignments: payload
                    .alignments
                    .iter()
                    .map(|alignment| alignment_from_payload(alignment, sentence_id))
                    .collect(),
            }
        })
        .collect()
}

fn alignment_from_payload(payload: &AlignmentPayload, sentence_id: Uuid) -> WordAlignment {
    WordAlignment {
        sentence_id,
        arabic_tokens: payload.arabic_tokens.clone(),
        transliteration_tokens: payload.transliteration_tokens.clone(),
        translation_tokens: payload.translation_tokens.clone(),
        token_order: payload.token_order.unwrap_or(0),
        word_id: payload.word_id,
    }
}

/// Direct update of a single sentence. Scalars are overwritten; alignments
/// are merged positionally so that the optional-preserve fields
/// (`token_order`, `word_id`) of a surviving alignment stay put when the
/// payload omits them. Payloads beyond the existing collection create fresh
/// alignments; existing alignments beyond the payload are dropped.
pub fn apply_sentence_update(
    payload: &SentencePayload,
    sentence: &mut InterlinearSentence,
) -> Result<(), DarisError> {
    validate_sentence_payload(payload, 0)?;

    sentence.arabic = payload.arabic.clone();
    sentence.transliteration = payload.transliteration.clone();
    sentence.translation = payload.translation.clone();
    sentence.annotations = payload.annotations.clone();
    if let Some(order) = payload.sentence_order {
        sentence.sentence_order = order;
    }

    let mut merged = Vec::with_capacity(payload.alignments.len());
    for (index, alignment_payload) in payload.alignments.iter().enumerate() {
        match sentence.alignments.get(index) {
            Some(existing) => {
                let mut alignment = existing.clone();
                apply_alignment_update(alignment_payload, &mut alignment);
                merged.push(alignment);
            }
            None => merged.push(alignment_from_payload(alignment_payload, sentence.id)),
        }
    }
    sentence.alignments = merged;
    Ok(())
}

/// Token strings always come from the payload; `token_order` and `word_id`
/// only when present. An absent `word_id` leaves an existing reference
/// intact (clearing happens through word deletion, not through updates).
pub fn apply_alignment_update(payload: &AlignmentPayload, alignment: &mut WordAlignment) {
    alignment.arabic_tokens = payload.arabic_tokens.clone();
    alignment.transliteration_tokens = payload.transliteration_tokens.clone();
    alignment.translation_tokens = payload.translation_tokens.clone();
    if let Some(order) = payload.token_order {
        alignment.token_order = order;
    }
    if let Some(word_id) = payload.word_id {
        alignment.word_id = Some(word_id);
    }
}

pub fn root_from_request(req: &RootRequest) -> Result<Root, DarisError> {
    let normalized = validated_root(&req.root)?;

    let now = Utc::now();
    Ok(Root {
        id: Uuid::new_v4(),
        letters: normalized.letters,
        normalized_form: normalized.normalized_form,
        display_form: normalized.display_form,
        letter_count: normalized.letter_count,
        meaning: req.meaning.clone(),
        analysis: req.analysis.clone(),
        word_count: 0,
        created_at: now,
        updated_at: now,
    })
}

pub fn apply_root_update(req: &RootRequest, root: &mut Root) -> Result<(), DarisError> {
    let normalized = validated_root(&req.root)?;

    root.letters = normalized.letters;
    root.normalized_form = normalized.normalized_form;
    root.display_form = normalized.display_form;
    root.letter_count = normalized.letter_count;
    root.meaning = req.meaning.clone();
    root.analysis = req.analysis.clone();
    root.updated_at = Utc::now();
    Ok(())
}

fn validated_root(input: &str) -> Result<crate::arabic::NormalizedRoot, DarisError> {
    let normalized = normalize(input);
    if !normalized.is_valid {
        return Err(DarisError::validation(
            "root",
            format!("'{}' is not a recognizable Arabic root", input),
        ));
    }
    Ok(normalized)
}
