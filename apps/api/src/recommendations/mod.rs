// Contractor remediation recommendations.
// Implements: request validation, prompt construction, model call, response extraction.
// All model calls go through llm_client.

pub mod extraction;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;
