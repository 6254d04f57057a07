//! Event validation and normalization
//!
//! Inbound tracking payloads are arbitrary JSON from the browser. Before
//! anything touches the store they go through two steps:
//!
//! 1. **Validate** — structural, type and bound checks against the fixed
//!    rule set ([`validate_event`]). First failure wins; the reason string is
//!    returned to the client verbatim.
//! 2. **Normalize** — shape the payload into the canonical [`Interaction`]
//!    record ([`normalize_event`]): unknown keys are dropped, string fields
//!    are scrubbed, and the server ingestion time is stamped on. This step
//!    never fails.
//!
//! # Usage
//!
//! ```ignore
//! use sideline_tracking::{validate_event, normalize_event, Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let now = clock.now_utc();
//! validate_event(&payload, now)?;
//! let interaction = normalize_event(&payload, now);
//! ```
//!
//! The current time is read once per validation call and injected explicitly
//! so tests can pin it (see [`clock`]).

pub mod clock;
pub mod error;
pub mod event;
pub mod normalize;
pub mod validate;

#[cfg(test)]
mod validate_test;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ValidationError;
pub use event::{EventType, Interaction};
pub use normalize::normalize_event;
pub use validate::{
    MAX_CLOCK_SKEW_SECS, MAX_COORDINATE, MAX_DURATION_MS, MAX_SCROLL_DEPTH, MAX_STRING_LEN,
    MAX_URL_LEN, validate_event,
};
