//! # services
//!
//! The data access layer of GameHub: forum operations over a
//! [`domains::RecordStore`], record id generation and session state.

pub mod forum;
pub mod ids;
pub mod session;

pub use forum::ForumService;
pub use ids::IdGenerator;
pub use session::Session;
