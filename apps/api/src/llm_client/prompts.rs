// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the pieces every structured-extraction prompt repeats.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every extraction prompt so optional and list fields come back
/// in a shape the decoder accepts.
pub const FIELD_RULES_INSTRUCTION: &str = "\
    FIELD RULES: \
    - Use the EXACT snake_case field names shown in the schema. \
    - Strings: use \"\" when there is no value, unless the field is marked nullable. \
    - Arrays: use [] when there are no items; NEVER null and NEVER {}. \
    - Numbers: use 0 when there is no value, unless the field is marked nullable. \
    - Only use null for fields explicitly marked nullable.";
