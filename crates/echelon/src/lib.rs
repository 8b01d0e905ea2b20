//! # Echelon
//!
//! An exact-rational Gauss-Jordan elimination engine with step recording,
//! built as a reusable library for row-reduction teaching tools.
//!
//! Echelon keeps an augmented matrix of exact fractions, accepts
//! user-typed row operations like `I = I + 3*II`, plans and replays a full
//! reduction to reduced row echelon form, classifies the system
//! (unique / infinite / inconsistent), and tracks a linear undo/redo
//! history of snapshots. All arithmetic is exact; floating point is used
//! only to compare pivot magnitudes.
//!
//! ## Quick Start
//!
//! ```rust
//! use echelon::prelude::*;
//!
//! let mut session = Session::new(2, 3);
//! session.import_delimited("1\t1\t3\n2\t-1\t0").unwrap();
//! session.apply_all_steps().unwrap();
//!
//! match session.classify() {
//!     Classification::Unique(values) => {
//!         assert_eq!(values[0], Rational::from_integer(1));
//!         assert_eq!(values[1], Rational::from_integer(2));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use echelon_engine as engine;
pub use echelon_matrix as matrix;
pub use echelon_rational as rational;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use echelon_engine::{
        classify, compute_steps, from_roman, to_roman, Classification, EngineError, History,
        RowOperation, Session, Step, StepKind,
    };
    pub use echelon_matrix::{Matrix, MatrixError};
    pub use echelon_rational::{Rational, RationalError};
}
