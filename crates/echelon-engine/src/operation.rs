//! Parsing and applying user-typed row operations.
//!
//! An operation is a single line of the form `TARGET = TERM (+|- TERM)*`,
//! e.g. `I = I + 3*II` or `III = 2*III - 1/2*I`. The target and every term
//! name a row by its Roman label; a term's coefficient defaults to 1 and
//! may be an integer, decimal, or fraction literal.

use num_traits::{One, Zero};
use thiserror::Error;

use echelon_matrix::{Matrix, MatrixError};
use echelon_rational::{Rational, RationalError};

use crate::roman::from_roman;

/// Errors produced while parsing a row operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The text is not of the form `TARGET = EXPRESSION`.
    #[error("invalid syntax (expected something like \"I = I + 3*II\")")]
    Syntax,

    /// A row label that does not name a row of the current matrix.
    #[error("invalid row label: {0:?}")]
    InvalidRow(String),

    /// A right-hand side with no recognizable row terms.
    #[error("no row terms on the right-hand side")]
    EmptyExpression,

    /// A coefficient that does not parse as a number.
    #[error(transparent)]
    Coefficient(#[from] RationalError),
}

/// A parsed row operation: `target := Σ coefficient_i * row_i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowOperation {
    /// Zero-based index of the row being overwritten.
    pub target: usize,
    /// (zero-based source row, coefficient) terms, in written order.
    pub terms: Vec<(usize, Rational)>,
}

impl RowOperation {
    /// Parses an operation line against a matrix with `num_rows` rows.
    ///
    /// # Errors
    ///
    /// - [`OperationError::Syntax`] unless the text contains exactly one `=`
    ///   and the right-hand side is a well-formed sum of terms;
    /// - [`OperationError::InvalidRow`] when a label does not map to
    ///   `1..=num_rows`;
    /// - [`OperationError::EmptyExpression`] when the right-hand side is
    ///   empty;
    /// - [`OperationError::Coefficient`] for an unparseable coefficient.
    pub fn parse(text: &str, num_rows: usize) -> Result<Self, OperationError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

        let (lhs, rhs) = compact.split_once('=').ok_or(OperationError::Syntax)?;
        if rhs.contains('=') {
            return Err(OperationError::Syntax);
        }

        let target = parse_label(lhs, num_rows)?;
        let terms = parse_terms(rhs, num_rows)?;
        Ok(Self { target, terms })
    }

    /// Applies the operation to a matrix.
    ///
    /// The weighted sum of the source rows is computed into a temporary row
    /// first and only then written over the target, so a target that reads
    /// itself (`I = I + 3*II`) sees the pre-operation value of every source
    /// row, its own included.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfBounds`] if the operation was parsed
    /// against a larger matrix; nothing is written in that case.
    pub fn apply(&self, matrix: &mut Matrix) -> Result<(), MatrixError> {
        let (rows, cols) = (matrix.num_rows(), matrix.num_cols());
        let check = |row: usize| {
            if row < rows {
                Ok(())
            } else {
                Err(MatrixError::IndexOutOfBounds {
                    row,
                    col: 0,
                    rows,
                    cols,
                })
            }
        };
        check(self.target)?;
        for (row, _) in &self.terms {
            check(*row)?;
        }

        let mut result = vec![Rational::zero(); cols];
        for (row, coefficient) in &self.terms {
            for (j, acc) in result.iter_mut().enumerate() {
                *acc = &*acc + &(&matrix[(*row, j)] * coefficient);
            }
        }
        for (j, value) in result.into_iter().enumerate() {
            matrix[(self.target, j)] = value;
        }
        Ok(())
    }
}

fn parse_label(label: &str, num_rows: usize) -> Result<usize, OperationError> {
    match from_roman(label) {
        Some(n) if (1..=num_rows).contains(&n) => Ok(n - 1),
        _ => Err(OperationError::InvalidRow(label.to_string())),
    }
}

/// Scans the right-hand side into `[sign][coefficient][*]ROMAN` terms.
fn parse_terms(rhs: &str, num_rows: usize) -> Result<Vec<(usize, Rational)>, OperationError> {
    if rhs.is_empty() {
        return Err(OperationError::EmptyExpression);
    }

    let mut terms = Vec::new();
    let chars: Vec<char> = rhs.chars().collect();
    let mut pos = 0;

    while pos < chars.len() {
        // Optional sign; a leading + on the first term is accepted too
        let negative = match chars[pos] {
            '+' => {
                pos += 1;
                false
            }
            '-' => {
                pos += 1;
                true
            }
            _ if terms.is_empty() => false,
            // Later terms must be joined by an explicit + or -
            _ => return Err(OperationError::Syntax),
        };

        // Optional coefficient: digits, decimal point, fraction slash
        let coeff_start = pos;
        while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.' || chars[pos] == '/') {
            pos += 1;
        }
        let coefficient = if pos > coeff_start {
            let literal: String = chars[coeff_start..pos].iter().collect();
            literal.parse::<Rational>()?
        } else {
            Rational::one()
        };

        // Optional multiplication symbol
        if pos < chars.len() && chars[pos] == '*' {
            pos += 1;
        }

        // Roman row label
        let label_start = pos;
        while pos < chars.len() && matches!(chars[pos], 'I' | 'V' | 'X') {
            pos += 1;
        }
        if pos == label_start {
            return Err(OperationError::Syntax);
        }
        let label: String = chars[label_start..pos].iter().collect();
        let row = parse_label(&label, num_rows)?;

        let coefficient = if negative {
            coefficient.negate()
        } else {
            coefficient
        };
        terms.push((row, coefficient));
    }

    if terms.is_empty() {
        return Err(OperationError::EmptyExpression);
    }
    Ok(terms)
}
