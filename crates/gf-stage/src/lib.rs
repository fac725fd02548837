//! # gf-stage — GaffForge Stage System
//!
//! Shared vocabulary for everything that observes a gaming device under test:
//! which stage of play the device is in, where in the game cycle it sits, what
//! the last game produced, and the read-only session interface conditions use.
//!
//! ## Philosophy
//!
//! The gaff engine never inspects device internals. It reads STAGES, CYCLE
//! STATE and OUTCOMES through [`SessionView`] and nothing else.

pub mod outcome;
pub mod session;
pub mod stage;
pub mod taxonomy;

pub use outcome::*;
pub use session::*;
pub use stage::*;
pub use taxonomy::*;
