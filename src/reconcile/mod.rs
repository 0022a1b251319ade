pub mod reconciler;

pub mod requests;

pub mod service;


pub use reconciler::{
    apply_alignment_update, apply_interlinear_update, apply_root_update, apply_sentence_update,
    apply_text_update, apply_word_update, interlinear_from_request, root_from_request,
    text_from_request, word_from_request,
};
pub use requests::{
    AlignmentPayload, DictionaryLinkPayload, InterlinearTextRequest, RootRequest, SentencePayload,
    TextRequest, WordRequest,
};
pub use service::ContentService;
