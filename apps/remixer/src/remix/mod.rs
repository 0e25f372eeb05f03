// Remix Endpoint: forwards a templated instruction to the completion model.
// All LLM calls go through llm_client; nothing here talks to Anthropic directly.

pub mod handlers;
pub mod prompts;
