// src/chat/enhance.rs
// Appends derived context tags to the current user message before
// submission. Each bracketed line is optional and omitted when its
// precondition yields nothing.

use super::rules::{
    FOLLOW_UP_MARKERS, RECENT_TOPIC_CAP, RECENT_TOPIC_VOCABULARY, RECENT_TOPIC_WINDOW,
};
use crate::profile::UserProfile;
use crate::store::types::{Message, Role};

/// Distinct topics mentioned in the last few prior turns, in mention order.
fn recent_topics(history: &[Message]) -> Vec<&'static str> {
    let start = history.len().saturating_sub(RECENT_TOPIC_WINDOW);
    let mut topics: Vec<&'static str> = Vec::new();

    for msg in &history[start..] {
        let content = msg.content.to_lowercase();
        for keyword in RECENT_TOPIC_VOCABULARY {
            if content.contains(keyword) && !topics.contains(keyword) {
                topics.push(keyword);
            }
        }
    }

    topics.truncate(RECENT_TOPIC_CAP);
    topics
}

/// Follow-up detection: pattern match on the current text, gated on at
/// least one prior user turn existing.
fn is_follow_up(current: &str, history: &[Message]) -> bool {
    if !history.iter().any(|m| m.role() == Some(Role::User)) {
        return false;
    }
    let lowered = current.to_lowercase();
    FOLLOW_UP_MARKERS.iter().any(|p| lowered.contains(p))
}

/// Produce the outgoing user-turn text for the current input.
pub fn enhance_message(
    current: &str,
    profile: Option<&UserProfile>,
    history: &[Message],
) -> String {
    let mut enhanced = current.to_string();

    if !history.is_empty() {
        let topics = recent_topics(history);
        if !topics.is_empty() {
            enhanced.push_str(&format!(
                "\n[Recent conversation topics: {}]",
                topics.join(", ")
            ));
        }
    }

    if let Some(profile) = profile {
        enhanced.push_str(&format!("\n[User experience level: {}]", profile.experience));
    }

    if is_follow_up(current, history) {
        enhanced.push_str("\n[This appears to be a follow-up question to previous discussion]");
    }

    enhanced
}
