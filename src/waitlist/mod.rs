//! Waitlist signup endpoint
//!
//! `handler` holds the request logic with no HTTP framework attached;
//! `server` mounts it on an axum router.

pub mod handler;
pub mod server;

pub use handler::{
    handle_waitlist, LogSink, WaitlistError, WaitlistResponse, WaitlistSignup, WaitlistSink,
    CORS_HEADERS, DEFAULT_SOURCE,
};
pub use server::{waitlist_router, SharedSink, WAITLIST_ROUTE};
