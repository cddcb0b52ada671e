//! Keyword-based language and intent classification.
//!
//! Drives local (demo-mode) reply synthesis: detects whether a message is
//! Chinese, then matches it against a priority-ordered keyword table.

use attendant_core::Persona;

use crate::types::{Classification, Intent, Language};

/// True if `text` contains at least one CJK Unified Ideograph
/// (U+4E00..=U+9FFF).
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c))
}

// =============================================================================
// Rule table
// =============================================================================

/// One keyword group in the priority-ordered rule table.
///
/// A rule matches when any of its keywords occurs as a case-insensitive
/// substring of the message.
#[derive(Clone, Debug)]
pub struct IntentRule {
    pub intent: Intent,
    keywords: Vec<String>,
}

impl IntentRule {
    /// Create a rule; keywords are stored lowercased.
    pub fn new(intent: Intent, keywords: &[&str]) -> Self {
        Self {
            intent,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered rule table for the generic customer-service persona.
///
/// Domain intents come before the greeting group so task-oriented phrasing
/// wins the tie-break: a message containing both "hello" and "order" is an
/// order inquiry. The fixed order is Order, Returns, Technical, Hours,
/// Greeting; anything else falls through to [`Intent::Fallback`].
fn general_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(Intent::Order, &["order", "help", "订单", "帮助"]),
        IntentRule::new(Intent::Returns, &["return", "refund", "退货", "退款"]),
        IntentRule::new(Intent::Technical, &["technical", "issue", "技术", "问题"]),
        IntentRule::new(Intent::Hours, &["business hours", "hours", "营业时间", "时间"]),
        IntentRule::new(Intent::Greeting, &["hello", "hi", "你好"]),
    ]
}

/// Ordered rule table for the 3D print-service persona. Same priority
/// discipline as [`general_rules`], domain vocabulary swapped in.
fn print_service_rules() -> Vec<IntentRule> {
    vec![
        IntentRule::new(Intent::Order, &["order", "quote", "订单", "报价"]),
        IntentRule::new(Intent::Returns, &["reprint", "return", "refund", "重印", "退款"]),
        IntentRule::new(Intent::Technical, &["stl", "model", "file", "模型", "文件"]),
        IntentRule::new(Intent::Hours, &["lead time", "hours", "工期", "营业时间"]),
        IntentRule::new(Intent::Greeting, &["hello", "hi", "你好"]),
    ]
}

// =============================================================================
// IntentClassifier
// =============================================================================

/// Rule-table classifier: first matching group in priority order wins.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Create a classifier over an explicit rule table.
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Create a classifier with the built-in table for `persona`.
    pub fn for_persona(persona: Persona) -> Self {
        match persona {
            Persona::General => Self::new(general_rules()),
            Persona::PrintService => Self::new(print_service_rules()),
        }
    }

    /// Classify one message.
    ///
    /// Pure and deterministic: the same input always yields the same verdict.
    pub fn classify(&self, text: &str) -> Classification {
        let language = if contains_chinese(text) {
            Language::Chinese
        } else {
            Language::Other
        };

        let lowered = text.to_lowercase();
        let intent = self
            .rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Fallback);

        Classification { language, intent }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn general() -> IntentClassifier {
        IntentClassifier::for_persona(Persona::General)
    }

    // ---- Language detection ----

    #[test]
    fn test_chinese_detected() {
        assert!(contains_chinese("你好"));
    }

    #[test]
    fn test_english_not_chinese() {
        assert!(!contains_chinese("hello"));
    }

    #[test]
    fn test_mixed_text_is_chinese() {
        assert!(contains_chinese("hi 你好"));
    }

    #[test]
    fn test_empty_not_chinese() {
        assert!(!contains_chinese(""));
    }

    #[test]
    fn test_block_boundaries() {
        // U+4E00 and U+9FFF are both inside the block.
        assert!(contains_chinese("\u{4e00}"));
        assert!(contains_chinese("\u{9fff}"));
        // Katakana and Hangul are not.
        assert!(!contains_chinese("カタカナ"));
        assert!(!contains_chinese("한국어"));
    }

    // ---- Intent matching ----

    #[test]
    fn test_order_intent() {
        let c = general().classify("Where is my order?");
        assert_eq!(c.intent, Intent::Order);
        assert_eq!(c.language, Language::Other);
    }

    #[test]
    fn test_refund_intent() {
        assert_eq!(general().classify("I want a refund").intent, Intent::Returns);
    }

    #[test]
    fn test_hours_intent() {
        assert_eq!(
            general().classify("What are your business hours?").intent,
            Intent::Hours
        );
    }

    #[test]
    fn test_greeting_intent() {
        assert_eq!(general().classify("hello there").intent, Intent::Greeting);
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        assert_eq!(
            general().classify("tell me a story about dragons").intent,
            Intent::Fallback
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(general().classify("WHERE IS MY ORDER").intent, Intent::Order);
        assert_eq!(general().classify("HELLO").intent, Intent::Greeting);
    }

    #[test]
    fn test_chinese_keywords_match() {
        let c = general().classify("我的订单在哪里");
        assert_eq!(c.language, Language::Chinese);
        assert_eq!(c.intent, Intent::Order);
    }

    #[test]
    fn test_chinese_greeting() {
        let c = general().classify("你好");
        assert_eq!(c.language, Language::Chinese);
        assert_eq!(c.intent, Intent::Greeting);
    }

    // ---- Priority tie-break ----

    #[test]
    fn test_order_beats_greeting() {
        // Matches both the greeting group and the order group; the order
        // group is earlier in the table and must win.
        assert_eq!(
            general().classify("hello, I need help with my order").intent,
            Intent::Order
        );
    }

    #[test]
    fn test_returns_beats_greeting() {
        assert_eq!(
            general().classify("hi, how do I return this?").intent,
            Intent::Returns
        );
    }

    #[test]
    fn test_order_beats_returns() {
        // "order" and "refund" both present; Order is the earlier group.
        assert_eq!(
            general().classify("refund my order please").intent,
            Intent::Order
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = general();
        let first = classifier.classify("hello, I need help with my order");
        for _ in 0..10 {
            assert_eq!(
                classifier.classify("hello, I need help with my order"),
                first
            );
        }
    }

    // ---- Persona tables ----

    #[test]
    fn test_print_service_vocabulary() {
        let classifier = IntentClassifier::for_persona(Persona::PrintService);
        assert_eq!(
            classifier.classify("my STL file won't slice").intent,
            Intent::Technical
        );
        assert_eq!(
            classifier.classify("can I get a quote?").intent,
            Intent::Order
        );
        assert_eq!(
            classifier.classify("what's the lead time?").intent,
            Intent::Hours
        );
    }

    #[test]
    fn test_custom_table() {
        let classifier = IntentClassifier::new(vec![IntentRule::new(
            Intent::Technical,
            &["crash", "broken"],
        )]);
        assert_eq!(classifier.classify("the app crashed").intent, Intent::Technical);
        assert_eq!(classifier.classify("hello").intent, Intent::Fallback);
    }
}
