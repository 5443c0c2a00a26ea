//! Context selector: reduces the knowledge base to the slice relevant to a
//! question.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::{FaqEntry, KnowledgeBase, Package, ReducedContext};

/// Maximum number of FAQ entries returned when the question matches any.
const MAX_FAQ_MATCHES: usize = 4;

/// Number of leading FAQ entries returned when nothing matches.
const FAQ_FALLBACK_COUNT: usize = 3;

/// Tokenizer splitting questions on runs of non-word characters.
fn word_splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| Regex::new(r"\W+").expect("valid word-splitting regex"))
}

impl KnowledgeBase {
    /// Derive the per-request context slice for a question.
    ///
    /// Pure and total: any question (including the empty string) produces a
    /// valid view, and the knowledge base is never mutated. Calling twice
    /// with the same question yields the same result.
    #[must_use]
    pub fn reduce(&self, question: &str) -> ReducedContext<'_> {
        let question = question.to_lowercase();

        ReducedContext {
            brand: &self.brand,
            contact: &self.contact,
            packages: self.relevant_packages(&question),
            faq: self.relevant_faq(&question),
        }
    }

    /// Select packages targeted by routing rules whose triggers appear in
    /// the question. When no rule matches, every package is relevant.
    fn relevant_packages(&self, question: &str) -> Vec<&Package> {
        let mut relevant_ids: HashSet<&str> = HashSet::new();

        for rule in &self.routing.package_suggestion_rules {
            let Some(target) = rule.target_package_id.as_deref() else {
                continue;
            };
            let hit = rule
                .triggers
                .iter()
                .filter(|trigger| !trigger.is_empty())
                .any(|trigger| question.contains(trigger.to_lowercase().as_str()));
            if hit {
                relevant_ids.insert(target);
            }
        }

        if relevant_ids.is_empty() {
            self.packages.iter().collect()
        } else {
            self.packages
                .iter()
                .filter(|package| relevant_ids.contains(package.id.as_str()))
                .collect()
        }
    }

    /// Select FAQ entries sharing at least one question word, capped at
    /// [`MAX_FAQ_MATCHES`]. Falls back to the first [`FAQ_FALLBACK_COUNT`]
    /// entries when nothing matches.
    fn relevant_faq(&self, question: &str) -> Vec<&FaqEntry> {
        let words: Vec<&str> = word_splitter()
            .split(question)
            .filter(|word| !word.is_empty())
            .collect();

        let matches: Vec<&FaqEntry> = self
            .faq
            .iter()
            .filter(|entry| {
                if entry.q.is_empty() {
                    return false;
                }
                let entry_question = entry.q.to_lowercase();
                words.iter().any(|word| entry_question.contains(word))
            })
            .take(MAX_FAQ_MATCHES)
            .collect();

        if matches.is_empty() {
            self.faq.iter().take(FAQ_FALLBACK_COUNT).collect()
        } else {
            matches
        }
    }
}
