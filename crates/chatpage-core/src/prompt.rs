//! Prompt construction for the upstream completion call.

/// Instruction prepended to every user prompt.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a friendly and helpful chatbot.
Please respond to the user in a human-like manner using well-structured pure HTML.
Do NOT use Markdown, code fences, or any other types of formatting.
Ensure that the HTML is valid, properly structured, and does not contain any additional wrapping or code fences.";

/// Build the single prompt string sent upstream.
pub fn combine(user_prompt: &str) -> String {
    format!("{SYSTEM_INSTRUCTION}\n\nUser: {user_prompt}\nChatbot:")
}
