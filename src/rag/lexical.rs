//! Lexical (non-retrieval) answering: the degraded mode used when no
//! embedding provider is configured. Scheme names resolve through an
//! alias table, fact types through keyword lookup; answers come from the
//! same knowledge base as the semantic engine.

use std::sync::Arc;

use crate::knowledge::FactType;
use crate::knowledge::KnowledgeBase;
use crate::rag::Answer;

/// Shorthand scheme names users actually type, mapped to full names
const SCHEME_ALIASES: [(&str, &str); 13] = [
    ("large cap", "Nippon India Large Cap Fund Direct Growth"),
    ("large-cap", "Nippon India Large Cap Fund Direct Growth"),
    ("largecap", "Nippon India Large Cap Fund Direct Growth"),
    ("flexi cap", "Nippon India Flexi Cap Fund Direct Growth"),
    ("flexi-cap", "Nippon India Flexi Cap Fund Direct Growth"),
    ("flexicap", "Nippon India Flexi Cap Fund Direct Growth"),
    ("elss", "Nippon India ELSS Tax Saver Fund Direct Growth"),
    ("tax saver", "Nippon India ELSS Tax Saver Fund Direct Growth"),
    ("tax-saver", "Nippon India ELSS Tax Saver Fund Direct Growth"),
    ("balanced advantage", "Nippon India Balanced Advantage Fund Direct Growth"),
    ("balanced-advantage", "Nippon India Balanced Advantage Fund Direct Growth"),
    ("liquid fund", "Nippon India Liquid Fund Direct Growth"),
    ("liquid", "Nippon India Liquid Fund Direct Growth"),
];

/// Offline keyword-matching assistant over the knowledge base
#[derive(Debug, Clone)]
pub struct LexicalAssistant {
    knowledge: Arc<KnowledgeBase>,
}

impl LexicalAssistant {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Resolve a scheme name from the question: alias table first, then
    /// full knowledge-base names.
    fn extract_scheme(&self, lower: &str) -> Option<String> {
        for (alias, scheme) in SCHEME_ALIASES {
            if lower.contains(alias) {
                return Some(scheme.to_string());
            }
        }
        self.knowledge
            .schemes
            .keys()
            .find(|name| lower.contains(&name.to_lowercase()))
            .cloned()
    }

    /// Resolve the asked-about fact type from question keywords
    fn extract_fact_type(lower: &str) -> Option<FactType> {
        if lower.contains("expense ratio") || lower.contains("expense") {
            return Some(FactType::ExpenseRatio);
        }
        if lower.contains("exit load") {
            return Some(FactType::ExitLoad);
        }
        if lower.contains("minimum sip") || lower.contains("sip minimum") {
            return Some(FactType::MinimumSip);
        }
        if lower.contains("minimum lump")
            || lower.contains("lump sum")
            || lower.contains("minimum investment")
            || lower.contains("minimum amount")
        {
            return Some(FactType::MinimumLumpSum);
        }
        if lower.contains("lock-in")
            || lower.contains("lock in")
            || lower.contains("lockin")
            || lower.contains("lock")
        {
            return Some(FactType::LockIn);
        }
        if lower.contains("riskometer") || lower.contains("risk") {
            return Some(FactType::Riskometer);
        }
        if lower.contains("benchmark") {
            return Some(FactType::Benchmark);
        }
        if lower.contains("statement")
            || lower.contains("download")
            || lower.contains("capital gain")
            || lower.contains("account statement")
            || lower.contains("tax statement")
        {
            return Some(FactType::StatementDownload);
        }
        None
    }

    /// Answer a question by direct knowledge-base lookup. Advice gating
    /// happens upstream in the pipeline; this only handles factual lookup.
    pub fn answer(&self, question: &str) -> Answer {
        let lower = question.to_lowercase();

        let fact_type = Self::extract_fact_type(&lower);
        if fact_type == Some(FactType::StatementDownload) {
            return self.statement_download_answer(&lower);
        }

        let Some(scheme_name) = self.extract_scheme(&lower) else {
            let names: Vec<&str> = self
                .knowledge
                .schemes
                .keys()
                .map(String::as_str)
                .collect();
            return Answer::plain(format!(
                "I can only answer questions about the following schemes: {}. \
                 Please specify which scheme you're asking about.",
                names.join(", ")
            ));
        };

        let Some(fact_type) = fact_type else {
            return Answer::plain(
                "I can provide information about: expense ratio, exit load, minimum SIP, \
                 minimum lump sum, lock-in (for ELSS), riskometer, benchmark, and statement \
                 downloads. Please ask about one of these facts.",
            );
        };

        let Some(facts) = self.knowledge.scheme(&scheme_name) else {
            return Answer::plain(format!(
                "I don't have information about {} for {scheme_name}.",
                fact_type.label()
            ));
        };

        if fact_type == FactType::ExpenseRatio {
            if let Some(ratio) = &facts.expense_ratio {
                return Answer {
                    answer: format!(
                        "The expense ratio for {scheme_name} is {} for Direct plan and {} for Regular plan.",
                        ratio.direct, ratio.regular
                    ),
                    source_url: Some(ratio.source_url.clone()),
                };
            }
        } else if let Some(fact) = facts.get(fact_type) {
            return Answer {
                answer: format!("{scheme_name}: {}", fact.value),
                source_url: Some(fact.source_url.clone()),
            };
        }

        Answer::plain(format!(
            "I don't have information about {} for {scheme_name}.",
            fact_type.label()
        ))
    }

    fn statement_download_answer(&self, lower: &str) -> Answer {
        if lower.contains("cams") {
            if let Some(info) = self.knowledge.platform("cams") {
                return Answer {
                    answer: format!(
                        "To download capital gains/account/tax statements from CAMS, visit: {}",
                        info.source_url
                    ),
                    source_url: Some(info.source_url.clone()),
                };
            }
        } else if lower.contains("groww") {
            if let Some(info) = self.knowledge.platform("groww") {
                return Answer {
                    answer: format!(
                        "To download reports and statements on Groww, visit: {}",
                        info.source_url
                    ),
                    source_url: Some(info.source_url.clone()),
                };
            }
        }

        // Platform not named (or unknown): list everything we have
        let platforms: Vec<String> = self
            .knowledge
            .statement_download
            .iter()
            .map(|(platform, info)| format!("from {platform} at {}", info.source_url))
            .collect();
        if platforms.is_empty() {
            return Answer::plain(
                "I don't have statement download instructions for any platform.",
            );
        }
        let source_url = self
            .knowledge
            .statement_download
            .values()
            .next_back()
            .map(|info| info.source_url.clone());
        Answer {
            answer: format!("You can download statements {}", platforms.join(" or ")),
            source_url,
        }
    }
}
