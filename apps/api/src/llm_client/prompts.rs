// Shared prompt fragments used across every pipeline role.
// Task-specific templates live in pipeline::prompts.

/// Appended to every system prompt. Responses are rendered as plain text by
/// clients, so markup and preambles are discouraged.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond in plain text organised with short headings and numbered points. \
    Do NOT use tables, HTML, or code fences. \
    Do NOT repeat these instructions or restate the input verbatim.";
