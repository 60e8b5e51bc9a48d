//! `wsn-core`: foundational types for the WSN smart-home simulator.
//!
//! This crate is a dependency of every other `wsn-*` crate.  It has no
//! `wsn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `SensorId`                                  |
//! | [`geo`]         | `Position`, Euclidean distance                        |
//! | [`time`]        | `Step`, `SimConfig`                                   |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `WsnError`, `WsnResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `SimConfig` from a TOML file.             |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WsnError, WsnResult};
pub use geo::Position;
pub use ids::{NodeId, SensorId};
pub use rng::SimRng;
pub use time::{SimConfig, Step};
