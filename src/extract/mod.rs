//! Structured field extraction from job-posting text.

pub mod merge;
pub mod tagger;

pub use merge::merge_tagged_tokens;
pub use tagger::{HttpNerTagger, LexiconTagger, Tagger};

/// Postings used when no text is supplied.
pub const SAMPLE_DESCRIPTIONS: [&str; 2] = [
    "Looking for an entry-level Data Scientist. The salary range is $90,000–$120,000.",
    "Hiring a senior Data Engineer with experience in cloud platforms. Salary up to $175,000.",
];
