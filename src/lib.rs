//! # kuauth (Kathmandu University portal sign-up)
//!
//! `kuauth` is the backend of the portal's registration and login screens.
//! It validates sign-up forms locally and delegates account creation to a
//! managed identity provider (Supabase Auth).
//!
//! ## Registration
//!
//! Students and teachers register with their university address. The email
//! domain, password and (for students) department are checked in order and
//! only the first failure is reported; see [`registration`]. Accepted
//! submissions are sent to the provider with role-tagged metadata and a
//! `<app>/verify` redirect for the confirmation email.
//!
//! ## Login
//!
//! The login form is declared but not connected; its endpoint answers
//! `501 Not Implemented`.

pub mod api;
pub mod cli;
pub mod login;
pub mod provider;
pub mod registration;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
