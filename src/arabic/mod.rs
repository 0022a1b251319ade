pub mod metrics;

pub mod root;

pub mod script;

pub use metrics::word_count;
pub use root::{
    normalize,
    same_root,
    NormalizedRoot,
};
