

/// Decides whether a keyword occurs in already lower-cased text.
pub trait KeywordMatcher: Send + Sync {
    fn matches(&self, text: &str, keyword: &str) -> bool;

    fn matches_any(&self, text: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.matches(text, keyword))
    }
}


/// Plain substring containment with no tokenization or word boundaries.
///
/// Short keywords fire inside longer words ("hot" in "shot", "ate" in "later").
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl KeywordMatcher for SubstringMatcher {
    #[inline]
    fn matches(&self, text: &str, keyword: &str) -> bool {
        text.contains(keyword)
    }
}
