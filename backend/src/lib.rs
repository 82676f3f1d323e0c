//! Q&A backend: answers, votes, and cookie-session sign-in over Actix Web.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
