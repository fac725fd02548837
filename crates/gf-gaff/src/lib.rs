//! # gf-gaff — Gaff Sequence Engine
//!
//! Drives a gaming device toward scripted, reproducible outcomes for testing
//! and certification. A sequence is an ordered list of steps; each step waits
//! for its step conditions, constrains the next RNG draw through its decision
//! makers, and verifies the resulting game against its result conditions.
//!
//! ## Features
//!
//! - **Conditions**: game count, awarded prize range, games elapsed, cycle-state
//!   masks, stage gates; stage transitions, progressive awards, no-trigger checks
//! - **Decision Makers**: `SelectSymbols`, `StripFinder`, `MultiStripFinder` over
//!   name filters and the device's real strip layout
//! - **Tick-level Runner**: `SequenceRun::poll` / `observe`, or `GaffSequence::run`
//! - **Registry & Presets**: ordered, read-only, hidden sequences supported
//!
//! ## Architecture
//!
//! ```text
//! GaffContext
//!     │
//!     ├── SelectorTable<P>        (gf-select)
//!     ├── GaffSequences ── GaffSequence ── GaffStep
//!     │                                     ├── StepCondition   ──► SessionView
//!     │                                     ├── DecisionMaker   ──► OutcomeProvider
//!     │                                     └── ResultCondition ──► GameOutcome
//!     └── RunnerConfig
//!           │
//!           v
//!     SequenceRun ──► StepDriver::play_game ──► SequenceReport
//! ```

pub mod condition;
pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod filter;
pub mod presets;
pub mod provider;
pub mod registry;
pub mod sequence;
pub mod step;
pub mod strip;

#[cfg(test)]
pub(crate) mod test_support;

pub use condition::*;
pub use config::*;
pub use context::*;
pub use decision::*;
pub use error::*;
pub use filter::*;
pub use provider::*;
pub use registry::*;
pub use sequence::*;
pub use step::*;
pub use strip::*;
