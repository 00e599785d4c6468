//! Advice-intent classification.
//!
//! Questions asking for recommendations, comparisons, opinions, or
//! performance predictions are refused before any retrieval happens. The
//! classifier is the word-boundary-regex variant with an allow-list
//! override: statement/download phrasing ("tax statement", "capital
//! gain") reads as factual even though it would otherwise brush against
//! the comparison/performance patterns.

use regex::Regex;

/// Terms that mark a question as factual regardless of advice patterns
const ALLOWED_TERMS: [&str; 5] = [
    "download",
    "statement",
    "capital gain",
    "account statement",
    "tax statement",
];

/// Word-boundary-anchored patterns for advice/opinion/comparison intent.
/// Anchoring avoids substring false positives ("bestow" must not match
/// "best"). Matched against the lowercased question.
const ADVICE_PATTERNS: [&str; 21] = [
    r"\bshould i\b.*\binvest\b",
    r"\bshould i\b.*\bbuy\b",
    r"\bshould i\b.*\bsell\b",
    r"\bis.*\bgood\b",
    r"\bis.*\bbad\b",
    r"\bis.*\bworth\b",
    r"\brecommend\b",
    r"\brecommendation\b",
    r"\bwhich.*\bbetter\b",
    r"\bwhich.*\bbest\b",
    r"\bwhich.*\bworst\b",
    r"\bcompare\b",
    r"\bcomparison\b",
    r"\badvice\b",
    r"\bsuggest\b",
    r"\bopinion\b",
    r"\bwhat.*\breturns\b",
    r"\bwhat.*\bperformance\b",
    r"\bhow much will i get\b",
    r"\bprofit\b.*\bloss\b",
    r"\binvestment advice\b",
];

/// Pattern-based classifier gating all retrieval
#[derive(Debug)]
pub struct AdviceFilter {
    patterns: Vec<Regex>,
}

impl AdviceFilter {
    pub fn new() -> Self {
        let patterns = ADVICE_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("advice pattern is a valid regex"))
            .collect();
        Self { patterns }
    }

    /// Whether the question seeks advice rather than a fact.
    ///
    /// The allow-list override runs first: any allow-listed term makes the
    /// question factual even if an advice pattern would match.
    pub fn is_advice_question(&self, question: &str) -> bool {
        let lower = question.to_lowercase();

        if ALLOWED_TERMS.iter().any(|term| lower.contains(term)) {
            return false;
        }

        self.patterns.iter().any(|pattern| pattern.is_match(&lower))
    }
}

impl Default for AdviceFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refuses_direct_advice() {
        let filter = AdviceFilter::new();
        assert!(filter.is_advice_question("Should I invest in Large Cap Fund?"));
        assert!(filter.is_advice_question("Should I buy this fund now?"));
        assert!(filter.is_advice_question("should i SELL my units?"));
    }

    #[test]
    fn test_refuses_opinion_and_comparison() {
        let filter = AdviceFilter::new();
        assert!(filter.is_advice_question("Is Flexi Cap a good fund?"));
        assert!(filter.is_advice_question("Which fund is better?"));
        assert!(filter.is_advice_question("Can you compare these two schemes?"));
        assert!(filter.is_advice_question("What is your opinion on ELSS?"));
        assert!(filter.is_advice_question("Any recommendation for me?"));
    }

    #[test]
    fn test_refuses_performance_questions() {
        let filter = AdviceFilter::new();
        assert!(filter.is_advice_question("What are the returns of the liquid fund?"));
        assert!(filter.is_advice_question("What is the performance over 5 years?"));
        assert!(filter.is_advice_question("How much will I get after a year?"));
    }

    #[test]
    fn test_allows_factual_questions() {
        let filter = AdviceFilter::new();
        assert!(!filter.is_advice_question("What is the expense ratio of Large Cap Fund?"));
        assert!(!filter.is_advice_question("What is the lock-in period for ELSS?"));
        assert!(!filter.is_advice_question("What is the minimum SIP amount?"));
    }

    #[test]
    fn test_allow_list_overrides_advice_patterns() {
        let filter = AdviceFilter::new();
        // "capital gain" would otherwise be near performance phrasing
        assert!(!filter.is_advice_question("How can I download capital gains statement from CAMS?"));
        assert!(!filter.is_advice_question("Where is my tax statement?"));
        assert!(!filter.is_advice_question("Which is the best way to download my account statement?"));
    }

    #[test]
    fn test_word_boundaries_prevent_substring_matches() {
        let filter = AdviceFilter::new();
        // "bestow" contains "best" but is not a comparison
        assert!(!filter.is_advice_question("Which scheme did the trust bestow the award on?"));
    }
}
