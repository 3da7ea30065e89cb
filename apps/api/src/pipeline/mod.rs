// Resume review and HR advice: prompt templates, the two-stage runner,
// and the HTTP handlers in front of it.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod runner;
