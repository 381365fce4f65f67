//! TF-IDF text vectorizer
//!
//! ```text
//! tf(t, d)    = count of t in d
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! tfidf(t, d) = tf(t, d) * idf(t), then L2-normalized per document
//! ```
//!
//! Tokens are lowercased runs of two or more word characters; English stop
//! words are dropped. The vocabulary is fit on the current corpus only.

use crate::stopwords::is_stop_word;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("Failed to compile token regex"));

#[derive(Debug, Error, PartialEq)]
pub enum VectorizerError {
    #[error("cannot fit a vectorizer on an empty corpus")]
    EmptyCorpus,

    #[error("empty vocabulary; documents contain only stop words or no tokens")]
    EmptyVocabulary,
}

/// Sparse, L2-normalized document vector; entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfidfVector {
    entries: Vec<(usize, f64)>,
}

impl TfidfVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product; equals cosine similarity since both sides are unit length
    pub fn dot(&self, other: &TfidfVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term -> column, in lexical order
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Result<Self, VectorizerError> {
        if corpus.is_empty() {
            return Err(VectorizerError::EmptyCorpus);
        }

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(VectorizerError::EmptyVocabulary);
        }

        let n = corpus.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Fit on the corpus and vectorize every document in it
    pub fn fit_transform<S: AsRef<str>>(
        corpus: &[S],
    ) -> Result<(Self, Vec<TfidfVector>), VectorizerError> {
        let vectorizer = Self::fit(corpus)?;
        let matrix = corpus
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        Ok((vectorizer, matrix))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vectorize a document in the fitted space; unknown terms are ignored
    pub fn transform(&self, text: &str) -> TfidfVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        TfidfVector { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        assert_eq!(
            tokenize("The ICU nurse in a Boston-MA unit"),
            vec!["icu", "nurse", "boston", "ma", "unit"]
        );
        assert_eq!(
            tokenize("e9b9a7f2-f5c9-4a8c"),
            vec!["e9b9a7f2", "f5c9", "4a8c"]
        );
    }

    #[test]
    fn test_idf_is_smoothed() {
        let corpus = ["icu nurse", "icu tech"];
        let vectorizer = TfidfVectorizer::fit(&corpus).unwrap();
        // icu in both docs: ln(3/3) + 1 = 1; nurse in one: ln(3/2) + 1
        let icu = vectorizer.vocabulary["icu"];
        let nurse = vectorizer.vocabulary["nurse"];
        assert!((vectorizer.idf[icu] - 1.0).abs() < EPS);
        assert!((vectorizer.idf[nurse] - (1.5f64.ln() + 1.0)).abs() < EPS);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let (_, matrix) =
            TfidfVectorizer::fit_transform(&["icu nurse boston", "er nurse nurse denver"]).unwrap();
        for vector in &matrix {
            assert!((vector.dot(vector) - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_identical_text_has_similarity_one() {
        let corpus = ["icu bls boston ma", "er acls denver co"];
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&corpus).unwrap();
        let query = vectorizer.transform("icu bls boston ma");
        assert!((query.dot(&matrix[0]) - 1.0).abs() < EPS);
        assert!(query.dot(&matrix[1]).abs() < EPS);
    }

    #[test]
    fn test_out_of_vocabulary_query_is_zero() {
        let vectorizer = TfidfVectorizer::fit(&["icu nurse"]).unwrap();
        assert!(vectorizer.transform("pediatrics oncology").is_zero());
    }

    #[test]
    fn test_empty_inputs_fail() {
        let empty: [&str; 0] = [];
        assert_eq!(
            TfidfVectorizer::fit(&empty).unwrap_err(),
            VectorizerError::EmptyCorpus
        );
        assert_eq!(
            TfidfVectorizer::fit(&["the and of", "a"]).unwrap_err(),
            VectorizerError::EmptyVocabulary
        );
    }
}
