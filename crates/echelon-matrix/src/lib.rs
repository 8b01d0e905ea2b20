//! # echelon-matrix
//!
//! Dense matrices of exact rationals with the three elementary row
//! operations: swap, scale by a nonzero scalar, and add a scalar multiple
//! of one row into another.
//!
//! Matrices here are small augmented systems edited cell by cell, so the
//! storage is a plain row-major vector and every mutation is in place.
//! `Clone` produces a fully independent snapshot, which is what the history
//! layer relies on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod matrix;


pub use matrix::{Matrix, MatrixError};
