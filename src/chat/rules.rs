// src/chat/rules.rs
// Lexicons for the per-request history annotations and current-message tags.
// Ordered tables, same data-driven shape as the profile rules.

/// Phrases in a user turn that signal the preceding assistant turn needs a
/// clarification note.
pub const CONFUSION_MARKERS: &[&str] = &["confused", "didn't understand", "explain again"];

pub struct ComplexityTier {
    pub label: &'static str,
    pub terms: &'static [&'static str],
}

/// Complexity tiers checked in order; the first match wins.
pub const COMPLEXITY_TIERS: &[ComplexityTier] = &[
    ComplexityTier {
        label: "advanced",
        terms: &[
            "architecture", "microservices", "optimization", "performance",
            "scalability", "design patterns",
        ],
    },
    ComplexityTier {
        label: "intermediate",
        terms: &["async", "promises", "components", "state management", "api", "database"],
    },
    ComplexityTier {
        label: "beginner",
        terms: &["what is", "how to", "basic", "simple", "beginner", "start"],
    },
];

/// Complexity label when no tier matches.
pub const COMPLEXITY_DEFAULT: &str = "general";

/// Vocabulary scanned over recent turns for the current-message topic tag.
pub const RECENT_TOPIC_VOCABULARY: &[&str] = &[
    "react", "javascript", "node", "python", "css", "html", "api", "database",
    "mongodb", "mysql", "express", "docker", "aws", "git", "typescript",
];

/// Prior-turn window scanned for recent topics.
pub const RECENT_TOPIC_WINDOW: usize = 5;

/// Recent topics appended to the current message.
pub const RECENT_TOPIC_CAP: usize = 3;

/// Phrases in the current message that mark it as a follow-up question.
pub const FOLLOW_UP_MARKERS: &[&str] = &[
    "can you explain more",
    "still confused",
    "what about",
    "how about",
    "also",
    "and what",
    "but what",
    "follow up",
];
