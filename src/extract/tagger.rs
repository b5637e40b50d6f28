//! Token taggers.
//!
//! The merge step only needs `(text, tag, score)` triples. Two sources are
//! provided:
//!
//! - `HttpNerTagger`: a token-classification inference endpoint
//!   (`POST {"inputs": text}` -> `[{"entity", "word", "score"}, ..]`)
//! - `LexiconTagger`: an offline keyword tagger for known roles and levels

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::domain::TaggedToken;
use crate::error::{AppError, TaggerError};

pub trait Tagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError>;
}

pub struct HttpNerTagger {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpNerTagger {
    pub fn new(url: impl Into<String>, token: Option<String>, timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
            token,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NerEntity {
    #[serde(alias = "entity_group")]
    entity: String,
    word: String,
    score: f64,
}

impl Tagger for HttpNerTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        let mut req = self.client.post(&self.url).json(&json!({ "inputs": text }));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().map_err(|e| TaggerError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(TaggerError::Status(resp.status().as_u16()));
        }

        let entities: Vec<NerEntity> = resp.json().map_err(|e| TaggerError::Decode(e.to_string()))?;
        Ok(entities
            .into_iter()
            .map(|e| TaggedToken::new(e.word, e.entity, e.score))
            .collect())
    }
}

const DEFAULT_ROLES: [&str; 5] = [
    "Data Analyst",
    "Data Scientist",
    "Data Engineer",
    "Machine Learning Engineer",
    "Software Engineer",
];

const LEVEL_WORDS: [&str; 9] = [
    "entry-level",
    "entry",
    "junior",
    "mid-level",
    "mid",
    "senior",
    "lead",
    "staff",
    "principal",
];

/// Keyword tagger emitting `B-ROLE`/`I-ROLE`, `B-LEVEL`, `B-SALARY` and `O`.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    /// Role phrases split into words, longest first.
    roles: Vec<Vec<String>>,
}

impl LexiconTagger {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<Vec<String>> = roles
            .into_iter()
            .map(|r| r.as_ref().split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|words| !words.is_empty())
            .collect();
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        phrases.dedup();
        Self { roles: phrases }
    }

    /// Default roles plus any extra role names (e.g. from the salary table).
    pub fn with_extra_roles<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut all: Vec<String> = DEFAULT_ROLES.iter().map(|r| r.to_string()).collect();
        all.extend(extra.into_iter().map(|r| r.as_ref().to_string()));
        Self::new(all)
    }

    fn match_role(&self, words: &[&str]) -> Option<usize> {
        self.roles
            .iter()
            .find(|phrase| {
                phrase.len() <= words.len()
                    && phrase
                        .iter()
                        .zip(words)
                        .all(|(p, w)| p.eq_ignore_ascii_case(w))
            })
            .map(Vec::len)
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new(DEFAULT_ROLES)
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(trim_punctuation)
            .filter(|w| !w.is_empty())
            .collect();

        let mut out = Vec::with_capacity(words.len());
        let mut i = 0;
        while i < words.len() {
            if let Some(len) = self.match_role(&words[i..]) {
                for (k, w) in words[i..i + len].iter().enumerate() {
                    let tag = if k == 0 { "B-ROLE" } else { "I-ROLE" };
                    out.push(TaggedToken::new(*w, tag, 1.0));
                }
                i += len;
                continue;
            }

            let word = words[i];
            let tag = if is_level(word) {
                "B-LEVEL"
            } else if word.contains('$') {
                "B-SALARY"
            } else {
                "O"
            };
            out.push(TaggedToken::new(word, tag, 1.0));
            i += 1;
        }

        Ok(out)
    }
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '"'))
}

fn is_level(word: &str) -> bool {
    LEVEL_WORDS.iter().any(|l| l.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::merge_tagged_tokens;

    fn tags(tokens: &[TaggedToken]) -> Vec<(&str, &str)> {
        tokens.iter().map(|t| (t.text.as_str(), t.tag.as_str())).collect()
    }

    #[test]
    fn lexicon_tags_roles_levels_and_salaries() {
        let tagger = LexiconTagger::default();
        let out = tagger
            .tag("Looking for an entry-level Data Scientist. The salary range is $90,000–$120,000.")
            .unwrap();
        let t = tags(&out);
        assert!(t.contains(&("entry-level", "B-LEVEL")));
        assert!(t.contains(&("Data", "B-ROLE")));
        assert!(t.contains(&("Scientist", "I-ROLE")));
        assert!(t.contains(&("$90,000–$120,000", "B-SALARY")));
        assert!(t.contains(&("Looking", "O")));
    }

    #[test]
    fn longest_role_phrase_wins() {
        let tagger = LexiconTagger::new(["Engineer", "Machine Learning Engineer"]);
        let out = tagger.tag("machine learning engineer").unwrap();
        assert_eq!(
            tags(&out),
            vec![("machine", "B-ROLE"), ("learning", "I-ROLE"), ("engineer", "I-ROLE")]
        );
    }

    #[test]
    fn extra_roles_are_recognised() {
        let tagger = LexiconTagger::with_extra_roles(["QA Engineer"]);
        let out = tagger.tag("Hiring a QA Engineer").unwrap();
        assert!(tags(&out).contains(&("QA", "B-ROLE")));
    }

    #[test]
    fn sample_posting_merges_to_first_role_word() {
        let tagger = LexiconTagger::default();
        let tokens = tagger
            .tag("Hiring a senior Data Engineer with experience in cloud platforms. Salary up to $175,000.")
            .unwrap();
        let posting = merge_tagged_tokens(&tokens);
        assert_eq!(posting.role, "Data");
        assert_eq!(posting.level, "senior");
        assert_eq!(posting.salary_range.as_deref(), Some("$175,000"));
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(LexiconTagger::default().tag("   ").unwrap().is_empty());
    }

    #[test]
    fn ner_entity_accepts_grouped_label() {
        let e: NerEntity =
            serde_json::from_str(r#"{"entity_group": "B-ROLE", "word": "Data", "score": 0.9, "start": 0}"#).unwrap();
        assert_eq!(e.entity, "B-ROLE");
        assert_eq!(e.word, "Data");
    }
}
