// src/chat/annotate.rs
// Walks prior turns and attaches derived signals as bracketed suffixes on
// the outgoing payload. Stored rows are never modified; the annotations live
// only in this one request's prompt.

use super::rules::{COMPLEXITY_DEFAULT, COMPLEXITY_TIERS, CONFUSION_MARKERS};
use crate::llm::Turn;
use crate::store::types::{Message, Role};

/// Complexity tag for a user turn: ordered tiers, first match wins.
pub fn assess_complexity(content: &str) -> &'static str {
    let lowered = content.to_lowercase();
    for tier in COMPLEXITY_TIERS {
        if tier.terms.iter().any(|t| lowered.contains(t)) {
            return tier.label;
        }
    }
    COMPLEXITY_DEFAULT
}

fn signals_confusion(content: &str) -> bool {
    let lowered = content.to_lowercase();
    CONFUSION_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Convert prior history into role-tagged turns with inline annotations:
/// a clarification note lands retroactively on the assistant turn that
/// precedes a confusion signal, and every user turn gets a complexity tag.
/// System turns are dropped.
pub fn annotate_history(history: &[Message]) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(history.len());

    for (i, msg) in history.iter().enumerate() {
        let role = match msg.role() {
            Some(Role::User) => crate::llm::TurnRole::User,
            Some(Role::Assistant) => crate::llm::TurnRole::Assistant,
            _ => continue,
        };

        let mut content = msg.content.clone();

        if role == crate::llm::TurnRole::Assistant {
            if let Some(next) = history.get(i + 1) {
                if next.role() == Some(Role::User) && signals_confusion(&next.content) {
                    content.push_str(
                        "\n[Note: User may need further clarification on this topic]",
                    );
                }
            }
        }

        if role == crate::llm::TurnRole::User {
            content.push_str(&format!(
                "\n[User message complexity: {}]",
                assess_complexity(&msg.content)
            ));
        }

        turns.push(Turn { role, content });
    }

    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::TurnRole;
    use serde_json::Value;

    fn msg(role: &str, content: &str) -> Message {
        Message {
            id: "m".to_string(),
            conversation_id: "c".to_string(),
            role: role.to_string(),
            content: content.to_string(),
            persona: None,
            metadata: Value::Object(Default::default()),
            created_at: 0,
        }
    }

    #[test]
    fn test_confusion_annotates_preceding_assistant_turn() {
        let history = vec![
            msg("assistant", "Closures capture their environment."),
            msg("user", "I'm still confused"),
        ];
        let turns = annotate_history(&history);

        assert_eq!(turns[0].role, TurnRole::Assistant);
        assert!(turns[0]
            .content
            .contains("[Note: User may need further clarification on this topic]"));
        // The confused user turn only carries its complexity tag.
        assert!(!turns[1].content.contains("clarification"));
        assert!(turns[1].content.contains("[User message complexity:"));
    }

    #[test]
    fn test_user_turns_get_complexity_tags() {
        let history = vec![msg("user", "How does microservices architecture scale?")];
        let turns = annotate_history(&history);
        assert!(turns[0].content.ends_with("[User message complexity: advanced]"));
    }

    #[test]
    fn test_complexity_first_tier_wins() {
        // Contains both an advanced term and a beginner phrase.
        assert_eq!(assess_complexity("what is microservices architecture"), "advanced");
        assert_eq!(assess_complexity("async code with promises"), "intermediate");
        assert_eq!(assess_complexity("what is a loop"), "beginner");
        assert_eq!(assess_complexity("tell me a joke"), "general");
    }

    #[test]
    fn test_system_turns_excluded() {
        let history = vec![
            msg("system", "internal"),
            msg("user", "hello there"),
        ];
        let turns = annotate_history(&history);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, TurnRole::User);
    }

    #[test]
    fn test_assistant_without_following_confusion_untouched() {
        let history = vec![
            msg("assistant", "Here's how."),
            msg("user", "thanks, makes sense"),
        ];
        let turns = annotate_history(&history);
        assert_eq!(turns[0].content, "Here's how.");
    }
}
