//! `fray-sim` — the concurrent simulation engine of the gridfray framework.
//!
//! # Thread model
//!
//! ```text
//!            ┌────────────────────┐   push    ┌────────────────────┐
//!            │ MovementScheduler  │ ────────▶ │   EncounterQueue   │
//!            │ (worker thread)    │  signal   │  (own lock + cv)   │
//!            └─────────┬──────────┘           └─────────┬──────────┘
//!                      │ write lock                     │ bounded pop
//!                      ▼                                ▼
//!            ┌────────────────────┐   locks   ┌────────────────────┐
//!            │    SharedRoster    │ ◀──────── │   BattleResolver   │
//!            │  (RwLock<Roster>)  │           │  (worker thread)   │
//!            └─────────▲──────────┘           └────────────────────┘
//!                      │ read lock (snapshots)
//!            ┌─────────┴──────────┐
//!            │     SimDriver      │  poll loop, per-second reporting,
//!            │  (calling thread)  │  stop flag / wake / join shutdown
//!            └────────────────────┘
//! ```
//!
//! Cancellation is cooperative: one shared stop flag, checked at the top of
//! every loop iteration and after every bounded wait.  The roster lock is
//! never held across a queue wait.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `parallel` | Runs encounter-detection queries on Rayon's pool.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fray_sim::{NoopReporter, SimBuilder};
//!
//! let mut driver = SimBuilder::new(config)
//!     .attach_sink(Box::new(ConsoleSink::new()))
//!     .build()?;
//! let report = driver.run(&mut NoopReporter)?;
//! println!("{} survivors", report.survivors.len());
//! ```

pub mod driver;
pub mod error;
pub mod movement;
pub mod proximity;
pub mod reporter;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use driver::{SimBuilder, SimDriver};
pub use error::{SimError, SimResult};
pub use movement::MovementScheduler;
pub use reporter::{NoopReporter, SimReport, SimReporter};
