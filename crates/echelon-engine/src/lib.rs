//! # echelon-engine
//!
//! The row-reduction engine behind the echelon calculator:
//!
//! - Roman-numeral row labels (`I`, `II`, `III`, ...)
//! - A parser for user-typed row operations like `I = I + 3*II`
//! - Gauss-Jordan elimination with partial pivoting and step recording
//! - A solution classifier (unique / infinite / inconsistent)
//! - A linear undo/redo history of matrix snapshots
//! - [`Session`], the single owner type a UI drives
//!
//! All arithmetic is exact-rational; floating point appears only in pivot
//! magnitude comparisons. Every public operation either fully succeeds or
//! leaves the session unchanged.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod elimination;
pub mod history;
pub mod operation;
pub mod roman;
pub mod session;

pub use classify::{classify, Classification, ParametricEquation};
pub use elimination::{apply_step, compute_steps, Elimination, Step, StepKind};
pub use history::{History, HistoryEntry};
pub use operation::{OperationError, RowOperation};
pub use roman::{from_roman, to_roman};
pub use session::{EngineError, Session};
