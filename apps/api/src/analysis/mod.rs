//! Resume analysis pipeline: request building, the provider round trip,
//! defensive validation of the parsed output, and the single-slot result
//! store the dashboard reads from.

pub mod handlers;
pub mod ingest;
pub mod prompts;
pub mod request;
pub mod store;
pub mod validate;
