//! Templated answer rendering.
//!
//! Turns ranked search hits plus the original question into a
//! human-readable answer. Pure: reads only its inputs and the immutable
//! knowledge base. The nearest-neighbor match identifies which fact (or
//! scheme) the question is about; for multi-valued facts the knowledge
//! base supplies the full composite answer.

use std::sync::Arc;

use crate::knowledge::FactType;
use crate::knowledge::KnowledgeBase;
use crate::rag::Answer;
use crate::rag::LOW_CONFIDENCE_MESSAGE;
use crate::rag::NO_MATCH_MESSAGE;
use crate::store::PlanKind;
use crate::store::SearchHit;

/// Renders matched facts into answer sentences
#[derive(Debug, Clone)]
pub struct FactRenderer {
    knowledge: Arc<KnowledgeBase>,
    confidence_threshold: f32,
}

impl FactRenderer {
    pub fn new(knowledge: Arc<KnowledgeBase>, confidence_threshold: f32) -> Self {
        Self {
            knowledge,
            confidence_threshold,
        }
    }

    /// Render the ranked results into an answer.
    ///
    /// Decision sequence: no results -> fallback; top similarity below the
    /// confidence threshold -> uncertainty message; otherwise branch on
    /// the top result's fact type.
    pub fn render(&self, question: &str, hits: &[SearchHit]) -> Answer {
        let Some(top) = hits.first() else {
            return Answer::plain(NO_MATCH_MESSAGE);
        };

        if top.similarity < self.confidence_threshold {
            return Answer {
                answer: LOW_CONFIDENCE_MESSAGE.to_string(),
                source_url: Some(top.metadata.source_url.clone()),
            };
        }

        match top.metadata.fact_type {
            FactType::ExpenseRatio => self.render_expense_ratio(question, top),
            FactType::StatementDownload => self.render_statement_download(question, top),
            _ => Self::render_simple_fact(top),
        }
    }

    /// Expense ratio answers. The matched record names one plan, but when
    /// the question does not say "direct" or "regular" the match only
    /// identifies the scheme and the knowledge base supplies both values.
    fn render_expense_ratio(&self, question: &str, top: &SearchHit) -> Answer {
        let meta = &top.metadata;
        let (Some(scheme), Some(value)) = (meta.scheme.as_deref(), meta.value.as_deref()) else {
            // Malformed record: fall back to its canonical text
            return Answer {
                answer: meta.text.clone(),
                source_url: Some(meta.source_url.clone()),
            };
        };

        let plan = match meta.fact_sub_type {
            Some(PlanKind::Direct) => PlanKind::Direct,
            _ => PlanKind::Regular,
        };
        let mut answer = format!("The expense ratio for {scheme} {plan} plan is {value}.");

        let lower = question.to_lowercase();
        if !lower.contains("direct") && !lower.contains("regular") {
            if let Some(ratio) = self
                .knowledge
                .scheme(scheme)
                .and_then(|facts| facts.expense_ratio.as_ref())
            {
                answer = format!(
                    "The expense ratio for {scheme} is {} for Direct plan and {} for Regular plan.",
                    ratio.direct, ratio.regular
                );
            }
            // Scheme missing from the knowledge base: keep the single-plan
            // sentence from the matched record
        }

        Answer {
            answer,
            source_url: Some(meta.source_url.clone()),
        }
    }

    /// Statement download answers. A platform named in the question is
    /// resolved directly from the knowledge base so the citation matches
    /// the rendered link; otherwise the matched record's platform is used.
    fn render_statement_download(&self, question: &str, top: &SearchHit) -> Answer {
        let meta = &top.metadata;
        let lower = question.to_lowercase();

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

        let platform = meta.platform.as_deref().unwrap_or("your platform");
        Answer {
            answer: format!(
                "To download statements from {platform}, visit: {}",
                meta.source_url
            ),
            source_url: Some(meta.source_url.clone()),
        }
    }

    /// Any other fact type reads straight off the matched metadata
    fn render_simple_fact(top: &SearchHit) -> Answer {
        let meta = &top.metadata;
        let answer = match (meta.scheme.as_deref(), meta.value.as_deref()) {
            (Some(scheme), Some(value)) => format!("{scheme}: {value}"),
            // Degrade to the canonical fact text rather than failing
            _ => meta.text.clone(),
        };
        Answer {
            answer,
            source_url: Some(meta.source_url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::store::FactRecord;

    const SCHEME: &str = "Nippon India Large Cap Fund Direct Growth";

    fn knowledge() -> Arc<KnowledgeBase> {
        Arc::new(
            serde_json::from_value(serde_json::json!({
                "schemes": {
                    SCHEME: {
                        "expense_ratio": {
                            "direct": "0.66%",
                            "regular": "1.57%",
                            "source_url": "https://example.com/large-cap"
                        },
                        "benchmark": {
                            "value": "BSE 100 TRI",
                            "source_url": "https://example.com/large-cap"
                        }
                    }
                },
                "statement_download": {
                    "cams": {
                        "description": "Download statements from CAMS online",
                        "source_url": "https://example.com/cams"
                    },
                    "groww": {
                        "description": "Download reports from Groww",
                        "source_url": "https://example.com/groww"
                    }
                }
            }))
            .unwrap(),
        )
    }

    fn renderer() -> FactRenderer {
        FactRenderer::new(knowledge(), 0.5)
    }

    fn expense_hit(similarity: f32, plan: PlanKind) -> SearchHit {
        let value = match plan {
            PlanKind::Direct => "0.66%",
            PlanKind::Regular => "1.57%",
        };
        SearchHit {
            index: 0,
            similarity,
            metadata: FactRecord {
                scheme: Some(SCHEME.to_string()),
                fact_type: FactType::ExpenseRatio,
                fact_sub_type: Some(plan),
                platform: None,
                description: None,
                value: Some(value.to_string()),
                source_url: "https://example.com/large-cap".to_string(),
                text: format!("{SCHEME} expense ratio direct plan is {value}"),
            },
        }
    }

    fn statement_hit(platform: &str) -> SearchHit {
        SearchHit {
            index: 0,
            similarity: 0.9,
            metadata: FactRecord {
                scheme: None,
                fact_type: FactType::StatementDownload,
                fact_sub_type: None,
                platform: Some(platform.to_string()),
                description: Some("Download statements".to_string()),
                value: None,
                source_url: format!("https://example.com/{platform}"),
                text: format!("How to download statements from {platform}"),
            },
        }
    }

    #[test]
    fn test_no_results_yields_fallback() {
        let answer = renderer().render("what is the expense ratio?", &[]);
        assert_eq!(answer.answer, NO_MATCH_MESSAGE);
        assert!(answer.source_url.is_none());
    }

    #[test]
    fn test_low_confidence_yields_uncertainty() {
        let hits = vec![expense_hit(0.42, PlanKind::Direct)];
        let answer = renderer().render("something vague about funds", &hits);
        assert_eq!(answer.answer, LOW_CONFIDENCE_MESSAGE);
        assert_eq!(
            answer.source_url.as_deref(),
            Some("https://example.com/large-cap")
        );
    }

    #[test]
    fn test_expense_ratio_without_plan_reports_both_values() {
        let hits = vec![expense_hit(0.9, PlanKind::Direct)];
        let question = format!("What is the expense ratio of {SCHEME}?");
        let answer = renderer().render(&question, &hits);
        assert!(answer.answer.contains("0.66%"), "direct value missing: {}", answer.answer);
        assert!(answer.answer.contains("1.57%"), "regular value missing: {}", answer.answer);
    }

    #[test]
    fn test_expense_ratio_with_explicit_plan_reports_one_value() {
        let hits = vec![expense_hit(0.9, PlanKind::Direct)];
        let answer = renderer().render("expense ratio of the direct plan?", &hits);
        assert!(answer.answer.contains("Direct plan is 0.66%"));
        assert!(!answer.answer.contains("1.57%"));
    }

    #[test]
    fn test_expense_ratio_unknown_scheme_degrades_to_matched_record() {
        let mut hit = expense_hit(0.9, PlanKind::Regular);
        hit.metadata.scheme = Some("Some Unlisted Fund".to_string());
        let answer = renderer().render("what is the expense ratio?", &[hit]);
        assert!(answer.answer.contains("Some Unlisted Fund Regular plan is 1.57%"));
    }

    #[test]
    fn test_statement_download_resolves_cams_from_knowledge_base() {
        // Matched record points at groww; the question names CAMS
        let hits = vec![statement_hit("groww")];
        let answer = renderer().render("How can I download capital gains statement from CAMS?", &hits);
        assert!(answer.answer.contains("https://example.com/cams"));
        assert_eq!(answer.source_url.as_deref(), Some("https://example.com/cams"));
    }

    #[test]
    fn test_statement_download_generic_uses_matched_metadata() {
        let hits = vec![statement_hit("groww")];
        let answer = renderer().render("How do I download my statement?", &hits);
        assert!(answer.answer.contains("groww"));
        assert_eq!(answer.source_url.as_deref(), Some("https://example.com/groww"));
    }

    #[test]
    fn test_simple_fact_renders_scheme_and_value() {
        let hit = SearchHit {
            index: 0,
            similarity: 0.8,
            metadata: FactRecord {
                scheme: Some(SCHEME.to_string()),
                fact_type: FactType::Benchmark,
                fact_sub_type: None,
                platform: None,
                description: None,
                value: Some("BSE 100 TRI".to_string()),
                source_url: "https://example.com/large-cap".to_string(),
                text: String::new(),
            },
        };
        let answer = renderer().render("benchmark?", &[hit]);
        assert_eq!(answer.answer, format!("{SCHEME}: BSE 100 TRI"));
        assert!(answer.source_url.is_some());
    }
}
