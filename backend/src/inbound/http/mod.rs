//! HTTP inbound adapter: HTML pages, the answers controller, and session
//! handling.

pub mod answers;
pub mod error;
pub mod health;
pub mod pages;
pub mod questions;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::HttpResponse;
use actix_web::http::header;

pub use error::ApiResult;

/// `302 Found` pointing at `location`.
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
