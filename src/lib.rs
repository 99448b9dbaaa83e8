//! # LIPA
//!
//! Create, send and track payment links. Identity is delegated to a hosted
//! auth provider (the *Auth Gateway*); this crate only carries the pieces
//! around it:
//!
//! - **Relay** (`relay`): a small axum service exposing
//!   `POST /api/auth/register`, which forwards signups to the gateway with the
//!   user's name attached as profile metadata and relays the outcome verbatim
//!   (201 / 400 / 500).
//! - **Session Store** (`session`): the client-side record of who is logged
//!   in. It is restored once from durable storage at startup, mutated only by
//!   `login` / `logout`, and written back on every mutation. `signup` never
//!   authenticates; the gateway wants the email confirmed first.
//! - **Payment links** (`links`): the dashboard's link list, search and
//!   create-link checks over mock data.
//!
//! Bearer tokens are opaque to the client. There is no expiry check and no
//! refresh: a restored token is trusted until the user logs out.

pub mod cli;
pub mod gateway;
pub mod links;
pub mod relay;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
