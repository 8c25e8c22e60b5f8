// Resume analysis: prompt template, orchestration and the upload endpoint.
// All generation calls go through llm_client; all document parsing through extraction.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
