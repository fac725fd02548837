//! # gf-select — Requirement-matched selection
//!
//! Picks the single matching row from a prioritized table of mutually
//! exclusive configuration records, e.g. the PID (prize/paytable record) for a
//! given denomination.
//!
//! ## Architecture
//!
//! ```text
//! SelectorTable<P>
//!     │
//!     ├── SelectorRecord { requirements, payload: P }   (index 0)
//!     ├── SelectorRecord { requirements, payload: P }
//!     └── ...
//!           │
//!           v
//!     select(&Inputs) → &P   (first fully-matching record wins)
//! ```
//!
//! Requirements inside one record are AND-ed. A record with no requirements at
//! index 0 is a catch-all that wins before any scanning happens; see
//! [`FallbackPolicy`] for what happens to catch-alls elsewhere.

pub mod input;
pub mod requirement;
pub mod table;

pub use input::*;
pub use requirement::*;
pub use table::*;
