//! Request middleware.
//!
//! Purpose: request lifecycle concerns that wrap every route, currently
//! trace identifiers and request completion logging.

pub mod trace;

pub use trace::Trace;
