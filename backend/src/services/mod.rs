pub mod audio;
pub mod llm;
pub mod prompts;
pub mod session;
pub mod session_store;
