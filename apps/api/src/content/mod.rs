//! The content pipeline: request shapes, prompt construction, response
//! normalization and the orchestrator that ties them together.

pub mod content_type;
pub mod form_parser;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompt_builder;
pub mod prompts;
pub mod validator;
