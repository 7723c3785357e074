//! Resume ingestion: PDF text extraction, sanitization and AI extraction of
//! a structured profile.

pub mod handlers;
pub mod parser;
pub mod pdf;
pub mod prompts;
