//! Fold a tagged token sequence into a `StructuredPosting`.
//!
//! Rules, applied per token in sequence order:
//!
//! - only segment-start tokens (`B-` prefix) are considered; continuation
//!   tokens are skipped, so a multi-token role keeps only its first word
//! - tag body containing `ROLE` -> role words
//! - else tag body containing `LEVEL` -> level words
//! - else token text containing `$` -> salary range; later hits are appended
//!   with no separator (`"$90,000" + "$120,000"` -> `"$90,000$120,000"`)
//! - anything else is ignored

use crate::domain::{StructuredPosting, TaggedToken};

const SEGMENT_START: &str = "B-";
const ROLE_LABEL: &str = "ROLE";
const LEVEL_LABEL: &str = "LEVEL";
const CURRENCY_MARKER: char = '$';

#[derive(Debug, Default)]
struct PostingAccumulator {
    role: Vec<String>,
    level: Vec<String>,
    salary_range: Option<String>,
}

impl PostingAccumulator {
    fn absorb(mut self, token: &TaggedToken) -> Self {
        let Some(body) = token.tag.strip_prefix(SEGMENT_START) else {
            return self;
        };

        if body.contains(ROLE_LABEL) {
            self.role.push(token.text.clone());
        } else if body.contains(LEVEL_LABEL) {
            self.level.push(token.text.clone());
        } else if token.text.contains(CURRENCY_MARKER) {
            self.salary_range = Some(match self.salary_range.take() {
                Some(existing) => existing + &token.text,
                None => token.text.clone(),
            });
        }
        self
    }

    fn finish(self) -> StructuredPosting {
        StructuredPosting {
            role: self.role.join(" "),
            level: self.level.join(" "),
            salary_range: self.salary_range,
        }
    }
}

pub fn merge_tagged_tokens(tokens: &[TaggedToken]) -> StructuredPosting {
    tokens
        .iter()
        .fold(PostingAccumulator::default(), PostingAccumulator::absorb)
        .finish()
}
