//! # echelon-rational
//!
//! Exact rational arithmetic for the echelon row-reduction engine.
//!
//! This crate wraps `dashu` to provide a [`Rational`] scalar that is always
//! stored in lowest terms with a positive denominator. Every arithmetic
//! operation is exact; the only lossy conversion is [`Rational::to_f64`],
//! which exists for magnitude comparisons during pivot selection and must
//! never be used for equality checks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod rational;

#[cfg(test)]
mod proptests;

pub use rational::{Rational, RationalError};
