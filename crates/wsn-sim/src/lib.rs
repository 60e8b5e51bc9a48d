//! `wsn-sim`: the simulation context and its drivers.
//!
//! # Ownership model
//!
//! ```text
//!   SimBuilder ──build──▶ Simulation ──spawn──▶ driver thread (sole owner)
//!                                                 ▲            │
//!                          SimHandle ── Command ──┘            │ publish
//!                              │                               ▼
//!                              └──── snapshot() ◀── RwLock<Snapshot>
//! ```
//!
//! A [`Simulation`] is an ordinary owned value.  Tests and batch tools call
//! its methods directly; interactive front-ends hand it to
//! [`SimDriver::spawn`], which moves it onto a worker thread and returns a
//! [`SimHandle`].  Consumers never share the mutable state: they send
//! [`Command`]s and read immutable [`Snapshot`]s.
//!
//! Every mutation builds a new `NetworkState` / sensor vector and swaps the
//! `Arc`, so a snapshot taken between steps is always internally consistent.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wsn_core::SimConfig;
//! use wsn_sim::{Command, NoopObserver, SimBuilder, SimDriver};
//!
//! let sim = SimBuilder::new(SimConfig::default()).build()?;
//! let handle = SimDriver::spawn(sim, NoopObserver)?;
//! handle.send(Command::ToggleRunning)?;
//! // ... later
//! let (sim, _observer) = handle.shutdown()?;
//! ```

pub mod builder;
pub mod command;
pub mod driver;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use command::{Command, Outcome, TickAction};
pub use driver::{SimDriver, SimHandle};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Simulation, StepReport, TickToken};
pub use snapshot::Snapshot;
