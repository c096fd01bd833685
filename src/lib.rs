//! # Warden
//!
//! Credential login with brute-force lockout and ephemeral sessions.
//!
//! ## Login
//!
//! `Authenticator::login` checks, in order: blank input, lockout, user lookup,
//! account status and password digest. Every failure past the input check
//! counts toward the lockout of the (trimmed) username; a success clears it
//! and issues a session.
//!
//! - **Lockout:** 5 failures within 15 minutes lock the username until 15
//!   minutes have passed since the last failure. There is no decay schedule.
//! - **Sessions:** 256-bit hex tokens valid for 24 hours. Expiry is checked
//!   lazily on validation; an optional reaper only reclaims memory.
//! - **Messages:** unknown user, inactive user and wrong password return
//!   distinct codes but the same message, so message text does not reveal
//!   which usernames exist.
//!
//! All state lives in memory and is lost on restart.

pub mod auth;
pub mod cli;
pub mod warden;
