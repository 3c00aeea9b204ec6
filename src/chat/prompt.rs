// src/chat/prompt.rs
// System-prompt composition: persona base text plus the user-context block.
// Pure and deterministic; an absent profile leaves the base text untouched.

use crate::profile::UserProfile;

/// Merge the persona's base instruction text with the extracted profile.
pub fn compose_system_prompt(base: &str, profile: Option<&UserProfile>) -> String {
    let Some(profile) = profile else {
        return base.to_string();
    };

    let name_line = profile
        .name
        .as_deref()
        .unwrap_or("Not provided yet")
        .to_string();

    let topics = if profile.topics.is_empty() {
        "General programming".to_string()
    } else {
        profile.topics.join(", ")
    };

    let question_types = if profile.question_types.is_empty() {
        "Various".to_string()
    } else {
        profile.question_types.join(", ")
    };

    let name_directive = match profile.name.as_deref() {
        Some(name) => format!("- ALWAYS address the user by their name: {name}"),
        None => "- Ask for their name if not provided yet".to_string(),
    };

    format!(
        "{base}\n\n\
        CURRENT USER CONTEXT:\n\
        - User Name: {name_line}\n\
        - Experience Level: {experience}\n\
        - Preferred Communication Style: {style}\n\
        - Learning Focus: {topics}\n\
        - Common Question Types: {question_types}\n\
        - Total Conversations: {conversations}\n\
        - Messages Analyzed: {messages}\n\n\
        PERSONALIZATION INSTRUCTIONS:\n\
        {name_directive}\n\
        - Adapt your teaching style to their experience level\n\
        - Use their preferred communication style\n\
        - Reference their previous learning topics when relevant\n\
        - Build upon concepts they've already discussed\n\
        - Remember their name and personal details throughout the conversation\n\
        - Acknowledge their progress and learning journey\n\n\
        MEMORY AND CONTINUITY:\n\
        - Remember what you've taught them before\n\
        - Don't repeat basic explanations if they've shown advanced understanding\n\
        - Reference previous conversations naturally when appropriate\n\
        - Adapt complexity based on their demonstrated knowledge\n\n\
        CHAIN-OF-THOUGHT REASONING:\n\
        - Think step-by-step before providing solutions\n\
        - Show your reasoning process when explaining complex concepts\n\
        - Connect new information to previously discussed topics\n\
        - Ask clarifying questions when the context is ambiguous\n\
        - Provide multiple approaches when appropriate",
        experience = profile.experience,
        style = profile.language_style,
        conversations = profile.conversation_count,
        messages = profile.total_messages,
    )
}
