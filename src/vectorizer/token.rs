use indexmap::IndexMap;

/// テキストを正規化されたtermに分割します
/// Split text into normalized terms.
///
/// The whole text is lower-cased first, then split on every run of
/// non-alphanumeric characters; empty pieces are discarded. Fit and query
/// text go through this same function so their terms line up.
///
/// # Examples
/// ```
/// use recipe_recommender::vectorizer::token::tokenize;
/// let terms: Vec<String> = tokenize("Tomato, ONION & garlic-paste").collect();
/// assert_eq!(terms, ["tomato", "onion", "garlic", "paste"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = String> {
    // lowering may emit non-alphanumeric code points (İ -> i + U+0307)
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into_iter()
}

/// TermFrequency 構造体
/// Occurrence counts of the terms of one document.
///
/// Terms are kept in first-seen order; the total counts every occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u32>,
    total_term_count: u64,
}

/// termの追加
impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Tokenize `text` and count its terms
    pub fn from_text(text: &str) -> Self {
        let mut freq = Self::new();
        for term in tokenize(text) {
            freq.add_owned_term(term);
        }
        freq
    }

    /// termを追加する
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// 複数のtermを追加する
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    #[inline]
    fn add_owned_term(&mut self, term: String) {
        *self.term_count.entry(term).or_insert(0) += 1;
        self.total_term_count += 1;
    }
}

/// 情報取得
impl TermFrequency {
    /// あるtermの出現回数, 0 if absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn unique_term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Distinct terms, borrowed
    #[inline]
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(String::as_str).collect()
    }

    /// `(term, count)` pairs in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, count)| (term.as_str(), *count))
    }

    /// カウントを全リセットします
    #[inline]
    pub fn clear(&mut self) {
        self.term_count.clear();
        self.total_term_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_splits_on_punctuation() {
        let terms: Vec<String> = tokenize("  Red-Chilli,  2 cups RICE;;basmati ").collect();
        assert_eq!(terms, ["red", "chilli", "2", "cups", "rice", "basmati"]);
    }

    #[test]
    fn tokenize_blank_text_yields_nothing() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize(" ,;- \t\n").count(), 0);
    }

    #[test]
    fn tokenize_keeps_unicode_letters() {
        let terms: Vec<String> = tokenize("Jalapeño, CRÈME fraîche").collect();
        assert_eq!(terms, ["jalapeño", "crème", "fraîche"]);
    }

    #[test]
    fn tokenize_splits_after_lowercasing() {
        // İ lowers to "i" + U+0307 COMBINING DOT ABOVE, which is not alphanumeric
        let terms: Vec<String> = tokenize("İncir").collect();
        assert_eq!(terms, ["i", "ncir"]);
    }

    #[test]
    fn from_text_counts_repeats() {
        let freq = TermFrequency::from_text("salt, pepper, Salt, oil, salt");
        assert_eq!(freq.term_count("salt"), 3);
        assert_eq!(freq.term_count("pepper"), 1);
        assert_eq!(freq.term_count("butter"), 0);
        assert_eq!(freq.term_sum(), 5);
        assert_eq!(freq.unique_term_num(), 3);
        assert_eq!(freq.term_set_ref_str(), vec!["salt", "pepper", "oil"]);
    }

    #[test]
    fn add_terms_matches_from_text() {
        let mut freq = TermFrequency::new();
        freq.add_terms(&["onion", "garlic"]).add_term("onion");
        assert_eq!(freq, TermFrequency::from_text("onion garlic onion"));
        freq.clear();
        assert!(freq.is_empty());
        assert_eq!(freq.term_sum(), 0);
    }
}
