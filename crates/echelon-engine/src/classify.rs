//! Solution classification for augmented systems.
//!
//! The last matrix column holds the right-hand-side constants; every other
//! column is a variable column. Classification is safe to call at any point
//! during a reduction: a matrix that is not yet in reduced form simply
//! reports [`Classification::NotReduced`] and makes no numeric claim.

use std::fmt;

use num_traits::{One, Zero};

use echelon_matrix::Matrix;
use echelon_rational::Rational;

/// The state of the linear system held in an augmented matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// A row reads `0 = c` with `c` nonzero; the system has no solution.
    Inconsistent,
    /// Exactly one solution; entry `i` is the value of variable `i`.
    Unique(Vec<Rational>),
    /// A solution family with free variables.
    Infinite {
        /// Zero-based variable columns with no leading entry.
        free: Vec<usize>,
        /// One parametric equation per leading row.
        equations: Vec<ParametricEquation>,
    },
    /// Not in reduced row echelon form yet; no numeric claim made.
    NotReduced,
}

/// A dependent variable expressed in terms of the free variables:
/// `variable = constant + Σ coefficient_i * free_i`.
///
/// Coefficients are stored already negated relative to the matrix entry, so
/// they read off directly into the equation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParametricEquation {
    /// Zero-based index of the dependent variable.
    pub variable: usize,
    /// Constant term.
    pub constant: Rational,
    /// (free variable index, coefficient) terms; zero coefficients omitted.
    pub terms: Vec<(usize, Rational)>,
}

impl fmt::Display for ParametricEquation {
    /// Renders e.g. `x1 = 2 - 1/2*x3 + x4`, omitting zero terms and the
    /// redundant 1 in unit coefficients.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{} = ", self.variable + 1)?;

        let mut pieces: Vec<String> = Vec::new();
        if !self.constant.is_zero() {
            pieces.push(self.constant.to_string());
        }
        for (var, coefficient) in &self.terms {
            let name = format!("x{}", var + 1);
            let piece = if coefficient.is_one() {
                format!("+ {name}")
            } else if coefficient.negate().is_one() {
                format!("- {name}")
            } else if coefficient.is_negative() {
                format!("- {}*{name}", coefficient.negate())
            } else {
                format!("+ {}*{name}", coefficient)
            };
            pieces.push(piece);
        }

        if pieces.is_empty() {
            return write!(f, "0");
        }
        let mut rendered = pieces.join(" ");
        // No leading "+ " when the constant term is zero
        if let Some(rest) = rendered.strip_prefix("+ ") {
            rendered = rest.to_string();
        }
        write!(f, "{rendered}")
    }
}

/// Classifies the system held in `matrix`.
///
/// Inconsistency wins over everything else; after that the matrix counts as
/// reduced when the leading entry of every nonzero row is exactly 1, and
/// the leading-entry count against the variable-column count decides
/// between a unique solution and a solution family.
#[must_use]
pub fn classify(matrix: &Matrix) -> Classification {
    let cols = matrix.num_cols();
    if cols < 2 {
        // No variable columns to speak about
        return Classification::NotReduced;
    }
    let vars = cols - 1;

    // 0 = c rows first
    for i in 0..matrix.num_rows() {
        let all_zero = (0..vars).all(|j| matrix[(i, j)].is_zero());
        if all_zero && !matrix[(i, cols - 1)].is_zero() {
            return Classification::Inconsistent;
        }
    }

    // Leading entries, top to bottom
    let mut leading: Vec<(usize, usize)> = Vec::new();
    let mut reduced = true;
    for i in 0..matrix.num_rows() {
        for j in 0..vars {
            if !matrix[(i, j)].is_zero() {
                if !matrix[(i, j)].is_one() {
                    reduced = false;
                }
                leading.push((i, j));
                break;
            }
        }
    }

    if !reduced {
        return Classification::NotReduced;
    }

    if leading.len() == vars {
        let mut values = vec![Rational::zero(); vars];
        for &(row, col) in &leading {
            values[col] = matrix[(row, cols - 1)].clone();
        }
        return Classification::Unique(values);
    }

    if leading.len() > vars {
        // More leading rows than variables cannot be a reduced form
        return Classification::NotReduced;
    }

    let leading_cols: Vec<usize> = leading.iter().map(|&(_, col)| col).collect();
    let free: Vec<usize> = (0..vars).filter(|j| !leading_cols.contains(j)).collect();

    let equations = leading
        .iter()
        .map(|&(row, col)| {
            let terms = free
                .iter()
                .filter(|&&j| !matrix[(row, j)].is_zero())
                .map(|&j| (j, matrix[(row, j)].negate()))
                .collect();
            ParametricEquation {
                variable: col,
                constant: matrix[(row, cols - 1)].clone(),
                terms,
            }
        })
        .collect();

    Classification::Infinite { free, equations }
}
