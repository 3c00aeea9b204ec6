//! Behavioral profile extraction.
//!
//! Derives a transient `UserProfile` from a user's historical messages.
//! Everything here is a pure, deterministic function over the analysis
//! window; nothing is persisted or cached, and extraction never fails -
//! callers that cannot supply a window simply skip the profile.

pub mod rules;

use crate::store::types::Message;
use rules::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExperienceTier {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl ExperienceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceTier::Beginner => "beginner",
            ExperienceTier::Intermediate => "intermediate",
            ExperienceTier::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageStyle {
    #[default]
    Plain,
    MixedStyle,
}

impl LanguageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageStyle::Plain => "plain",
            LanguageStyle::MixedStyle => "mixed-style",
        }
    }
}

impl std::fmt::Display for LanguageStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived per-request aggregate of a user's interaction history.
/// Recomputed fresh every request, never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub total_messages: usize,
    pub conversation_count: usize,
    pub topics: Vec<&'static str>,
    pub language_style: LanguageStyle,
    pub experience: ExperienceTier,
    pub question_types: Vec<&'static str>,
    pub last_interaction: Option<i64>,
}

/// Build a profile from the analysis window (newest message first).
pub fn build_profile(messages: &[Message], conversation_count: usize) -> UserProfile {
    let texts: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();

    UserProfile {
        name: extract_name(&texts),
        total_messages: messages.len(),
        conversation_count,
        topics: extract_topics(&texts),
        language_style: detect_language_style(&texts),
        experience: assess_experience(&texts),
        question_types: classify_question_types(&texts),
        last_interaction: messages.first().map(|m| m.created_at),
    }
}

/// Best-guess display name, confidence-ranked across the ordered rule list.
/// Ties keep the first-encountered candidate; stop-worded candidates are
/// discarded outright.
pub fn extract_name(texts: &[&str]) -> Option<String> {
    // Insertion order matters for tie-breaking, so no HashMap here.
    let mut candidates: Vec<(String, u32)> = Vec::new();

    for text in texts {
        let content = text.trim();
        for rule in NAME_RULES.iter() {
            let Some(caps) = rule.pattern.captures(content) else {
                continue;
            };
            let Some(m) = caps.get(1) else { continue };
            let name = m.as_str().to_lowercase();

            if NAME_STOP_WORDS.contains(&name.as_str()) {
                continue;
            }
            if name.len() < NAME_MIN_LEN || name.len() > NAME_MAX_LEN {
                continue;
            }

            match candidates.iter_mut().find(|(n, _)| *n == name) {
                Some((_, score)) => *score += rule.weight,
                None => candidates.push((name, rule.weight)),
            }
        }
    }

    let mut best: Option<(&str, u32)> = None;
    for (name, score) in &candidates {
        // Strict comparison keeps the first-encountered candidate on ties.
        if best.map(|(_, s)| *score > s).unwrap_or(true) {
            best = Some((name, *score));
        }
    }

    best.map(|(name, _)| capitalize(name))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Detected learning topics, in vocabulary scan order, capped at
/// `TOPIC_CAP`.
pub fn extract_topics(texts: &[&str]) -> Vec<&'static str> {
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();

    let mut topics = Vec::new();
    for keyword in TOPIC_VOCABULARY {
        if lowered.iter().any(|t| t.contains(keyword)) {
            topics.push(*keyword);
            if topics.len() == TOPIC_CAP {
                break;
            }
        }
    }
    topics
}

/// A message is alternate-style when it contains secondary-script characters
/// or matches the mixed-style lexicon; the dominant style flips to mixed
/// once alternate messages exceed 30% of the plain count.
pub fn detect_language_style(texts: &[&str]) -> LanguageStyle {
    let mut alternate = 0usize;
    let mut plain = 0usize;

    for text in texts {
        if ALT_SCRIPT.is_match(text) || ALT_STYLE_MARKERS.is_match(text) {
            alternate += 1;
        } else {
            plain += 1;
        }
    }

    if alternate as f64 > MIXED_STYLE_RATIO * plain as f64 {
        LanguageStyle::MixedStyle
    } else {
        LanguageStyle::Plain
    }
}

/// Tier from aggregate keyword hits: advanced wins outright, beginner needs
/// more than double the advanced score, everything else is intermediate.
pub fn assess_experience(texts: &[&str]) -> ExperienceTier {
    let mut advanced = 0usize;
    let mut beginner = 0usize;

    for text in texts {
        let content = text.to_lowercase();
        advanced += ADVANCED_SIGNALS.iter().filter(|k| content.contains(*k)).count();
        beginner += BEGINNER_SIGNALS.iter().filter(|k| content.contains(*k)).count();
    }

    if advanced > beginner {
        ExperienceTier::Advanced
    } else if beginner > 2 * advanced {
        ExperienceTier::Beginner
    } else {
        ExperienceTier::Intermediate
    }
}

/// Top question-type categories, zero-hit categories omitted. A message may
/// increment several counters; ranking ties break by declaration order
/// (stable sort).
pub fn classify_question_types(texts: &[&str]) -> Vec<&'static str> {
    let mut counts: Vec<(&'static str, usize)> = QUESTION_TYPE_RULES
        .iter()
        .map(|r| (r.category, 0usize))
        .collect();

    for text in texts {
        let content = text.to_lowercase();
        for (i, rule) in QUESTION_TYPE_RULES.iter().enumerate() {
            if rule.needles.iter().any(|n| content.contains(n)) {
                counts[i].1 += 1;
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .take(QUESTION_TYPE_CAP)
        .map(|(category, _)| category)
        .collect()
}
