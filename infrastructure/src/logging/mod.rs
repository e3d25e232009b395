//! Logging infrastructure: the JSONL session transcript.
//!
//! Provides [`JsonlConversationLogger`], which implements the
//! [`ConversationLogger`](buildpath_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
