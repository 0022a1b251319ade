/// Number of whitespace-separated segments in `text`. Runs of whitespace
/// collapse into a single boundary; all-whitespace input counts zero.
///
/// Callers that persist a word count always recompute it through here;
/// counts arriving on a request payload are ignored.
pub fn word_count(text: &str) -> usize {
    text.trim().split_whitespace().count()
}
