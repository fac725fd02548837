//! # gf-lab — Simulated Certification Device
//!
//! A fully deterministic slot device for exercising gaff sequences without
//! hardware. Implements every collaborator interface the gaff engine needs.
//!
//! ## Architecture
//!
//! ```text
//! SimulatedDevice
//!     │
//!     ├── LabConfig (reels × rows, strip sets, feature rules)
//!     ├── ReelStrip sets (BG_R*, FG_A_R*, FG_B_R*)
//!     └── ChaCha8Rng (seeded)
//!           │
//!           v
//!     SessionView + OutcomeProvider + StepDriver → GameOutcome
//! ```

pub mod config;
pub mod device;
pub mod symbols;

pub use config::*;
pub use device::*;
pub use symbols::*;
