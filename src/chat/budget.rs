// src/chat/budget.rs
// Bounds the composed prompt. History is dropped oldest-first until the
// estimate fits; the system prompt and the current message always survive.

use crate::llm::Turn;

/// Rough token estimate (1 token ~ 4 chars).
pub fn estimate_tokens(s: &str) -> usize {
    s.len() / 4
}

/// Trim annotated history in place so the whole payload fits the budget.
/// Returns how many turns were dropped.
pub fn enforce_budget(
    system_prompt: &str,
    history: &mut Vec<Turn>,
    current_message: &str,
    budget: usize,
) -> usize {
    let fixed = estimate_tokens(system_prompt) + estimate_tokens(current_message);
    let mut history_tokens: usize = history.iter().map(|t| estimate_tokens(&t.content)).sum();

    let mut dropped = 0;
    while fixed + history_tokens > budget && !history.is_empty() {
        let turn = history.remove(0);
        history_tokens -= estimate_tokens(&turn.content);
        dropped += 1;
    }
    dropped
}
