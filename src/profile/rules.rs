// src/profile/rules.rs
// Data-driven rule tables for profile extraction. Heuristics are ordered
// (pattern, weight) lists rather than hard-coded branches so fixtures can
// exercise them directly.

use once_cell::sync::Lazy;
use regex::Regex;

/// Weight granted by an explicit self-introduction pattern.
pub const EXPLICIT_NAME_WEIGHT: u32 = 10;
/// Weight granted by the bare-token fallbacks.
pub const FALLBACK_NAME_WEIGHT: u32 = 5;

pub struct NameRule {
    pub pattern: Regex,
    pub weight: u32,
}

/// Ordered name-extraction rules. Explicit self-introduction phrasings come
/// first and score higher; bare-token fallbacks come last.
pub static NAME_RULES: Lazy<Vec<NameRule>> = Lazy::new(|| {
    let rule = |pat: &str, weight: u32| NameRule {
        pattern: Regex::new(pat).expect("invalid name rule"),
        weight,
    };
    vec![
        rule(
            r"(?i)(?:mera naam|my name is|i am|i'm|main hun|naam hai)\s+([a-zA-Z]+)",
            EXPLICIT_NAME_WEIGHT,
        ),
        rule(r"(?i)(?:call me|you can call me)\s+([a-zA-Z]+)", EXPLICIT_NAME_WEIGHT),
        rule(r"(?i)^([a-zA-Z]+)\s+(?:hun|hai|here|speaking)$", EXPLICIT_NAME_WEIGHT),
        rule(r"(?i)(?:this is|yeh hai)\s+([a-zA-Z]+)", EXPLICIT_NAME_WEIGHT),
        // Single word that could be a name
        rule(r"(?i)^([a-zA-Z]+)$", FALLBACK_NAME_WEIGHT),
        rule(
            r"(?i)(?:hi|hello|namaste).*?(?:i'm|main)\s+([a-zA-Z]+)",
            FALLBACK_NAME_WEIGHT,
        ),
    ]
});

/// Common words that can never be a name, whatever pattern matched them.
pub const NAME_STOP_WORDS: &[&str] = &[
    "kya", "hai", "what", "how", "the", "and", "but", "that", "this",
    "hello", "hi", "yes", "no", "haan", "nahi", "thanks", "ok", "okay",
    "javascript", "react", "node", "code", "coding", "programming",
];

/// Accepted candidate-name lengths, inclusive.
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 14;

/// Technology vocabulary scanned for learning topics, in scan order.
pub const TOPIC_VOCABULARY: &[&str] = &[
    "javascript", "react", "node", "python", "css", "html", "api", "database",
    "mongodb", "mysql", "express", "vue", "angular", "typescript", "docker",
    "aws", "git", "github", "authentication", "backend", "frontend", "fullstack",
];

/// Topics reported per profile.
pub const TOPIC_CAP: usize = 10;

/// Characters from the secondary script range (Devanagari).
pub static ALT_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{0900}-\u{097F}]").expect("invalid script range"));

/// Lexical markers of the mixed (Hinglish) style.
pub static ALT_STYLE_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(hai|hain|kya|kaise|samjh|nahi)\b").expect("invalid style markers")
});

/// Alternate-style share above which the dominant style flips to mixed.
pub const MIXED_STYLE_RATIO: f64 = 0.3;

pub const ADVANCED_SIGNALS: &[&str] = &[
    "microservices", "kubernetes", "design patterns", "architecture",
    "scaling", "performance", "optimization", "async/await", "promises",
    "middleware", "cors", "jwt", "oauth", "redis", "caching",
];

pub const BEGINNER_SIGNALS: &[&str] = &[
    "what is", "how to", "basics", "beginner", "start", "learn",
    "simple", "easy", "basic", "introduction", "tutorial",
];

pub struct QuestionTypeRule {
    pub category: &'static str,
    pub needles: &'static [&'static str],
}

/// Question-type counters in declaration order; declaration order also
/// breaks ranking ties.
pub const QUESTION_TYPE_RULES: &[QuestionTypeRule] = &[
    QuestionTypeRule { category: "debugging", needles: &["error", "bug", "not working"] },
    QuestionTypeRule { category: "conceptual", needles: &["what is", "explain", "understand"] },
    QuestionTypeRule { category: "project", needles: &["project", "build", "create"] },
    QuestionTypeRule { category: "career", needles: &["career", "job", "interview"] },
];

/// Dominant question types reported per profile.
pub const QUESTION_TYPE_CAP: usize = 2;
