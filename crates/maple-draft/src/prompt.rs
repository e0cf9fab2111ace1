// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt construction for the draft generator.

/// Builds the drafting system prompt: role and tone guidelines, then the
/// organization's brand voice verbatim, then the knowledge snippets
/// verbatim with an instruction to prefer them when relevant.
pub fn build_system_prompt(brand_voice: Option<&str>, knowledge_snippets: &[String]) -> String {
    let mut prompt = String::from(
        "You are an AI customer support assistant. Your role is to help draft \
professional, empathetic, and helpful responses to customer emails.

Key guidelines:
- Be professional but friendly and approachable
- Show empathy and understanding for customer concerns
- Provide clear, actionable solutions
- Keep responses concise but complete
- Use proper grammar and spelling
- Sign off appropriately for business communication",
    );

    if let Some(voice) = brand_voice {
        prompt.push_str("\n\nBrand Voice Guidelines:\n");
        prompt.push_str(voice);
    }

    if !knowledge_snippets.is_empty() {
        prompt.push_str("\n\nRelevant Knowledge Base Information:\n");
        prompt.push_str(&knowledge_snippets.join("\n\n"));
        prompt.push_str(
            "\n\nUse the knowledge base information above to provide accurate \
and specific answers when relevant.",
        );
    }

    prompt
}
