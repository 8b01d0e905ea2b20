//! Gauss-Jordan elimination with partial pivoting and step recording.
//!
//! [`compute_steps`] plans the full reduction of a matrix to reduced row
//! echelon form without touching the caller's matrix; callers replay the
//! recorded steps against their own matrix with [`apply_step`], one at a
//! time or all at once.
//!
//! Pivot selection compares approximate magnitudes (`to_f64`) with a strict
//! `>`, first-seen row winning ties, and a zero pivot skips its column
//! without eliminating. Both behaviors are load-bearing for which variables
//! the classifier later reports as free, so they must not be "improved".

use num_traits::{One, Zero};

use echelon_matrix::{Matrix, MatrixError};
use echelon_rational::Rational;

use crate::roman::to_roman;

/// One planned elementary row operation (or an informational note).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// Swap two rows.
    Swap {
        /// First row.
        row1: usize,
        /// Second row.
        row2: usize,
    },
    /// Scale a row by a nonzero factor.
    Scale {
        /// Row to scale.
        row: usize,
        /// Scale factor.
        factor: Rational,
    },
    /// Add `factor` times a source row into a target row.
    AddMultiple {
        /// Row being modified.
        target: usize,
        /// Row being read.
        source: usize,
        /// Multiplier applied to the source row.
        factor: Rational,
    },
    /// A note with no matrix effect (e.g. a zero pivot was skipped).
    Info,
}

impl StepKind {
    /// Returns true if replaying this step mutates the matrix.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StepKind::Info)
    }
}

/// A planned step together with its human-readable description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// What to do.
    pub kind: StepKind,
    /// How to present it, with Roman row labels.
    pub description: String,
}

/// The result of planning a full reduction.
#[derive(Clone, Debug)]
pub struct Elimination {
    /// The ordered step sequence.
    pub steps: Vec<Step>,
    /// The matrix after every step has been applied.
    pub final_matrix: Matrix,
}

/// Plans the Gauss-Jordan reduction of `matrix` to RREF.
///
/// Works on a private clone; the caller's matrix is never mutated. The last
/// column is treated as the augmented constant column and is never chosen
/// as a pivot column.
#[must_use]
pub fn compute_steps(matrix: &Matrix) -> Elimination {
    let mut m = matrix.clone();
    let mut steps = Vec::new();
    let num_rows = m.num_rows();
    let pivot_cols = num_rows.min(m.num_cols().saturating_sub(1));

    for col in 0..pivot_cols {
        // Partial pivoting: the candidate with the largest approximate
        // magnitude, strict `>` so the first-seen row wins ties.
        let mut pivot_row = col;
        for row in col + 1..num_rows {
            if m[(row, col)].to_f64().abs() > m[(pivot_row, col)].to_f64().abs() {
                pivot_row = row;
            }
        }

        if pivot_row != col {
            let kind = StepKind::Swap {
                row1: col,
                row2: pivot_row,
            };
            let description = format!("Swap {} <-> {}", to_roman(col + 1), to_roman(pivot_row + 1));
            push_applied(&mut m, &mut steps, kind, description);
        }

        let pivot = m[(col, col)].clone();
        if pivot.is_zero() {
            // Rank-deficient column: note it and move on, the classifier
            // picks the free variable up from the leading-column scan.
            steps.push(Step {
                kind: StepKind::Info,
                description: format!("Pivot is 0 in column {} - possible special cases", col + 1),
            });
            continue;
        }

        if !pivot.is_one() {
            if let Ok(factor) = pivot.recip() {
                let description =
                    format!("{} = {}*{}", to_roman(col + 1), factor, to_roman(col + 1));
                let kind = StepKind::Scale { row: col, factor };
                push_applied(&mut m, &mut steps, kind, description);
            }
        }

        // Full reduction: clear the column in every other row, above and
        // below the pivot.
        for row in 0..num_rows {
            if row == col {
                continue;
            }
            let entry = m[(row, col)].clone();
            if entry.is_zero() {
                continue;
            }
            let factor = entry.negate();
            let description = format!(
                "{} = {} + ({})*{}",
                to_roman(row + 1),
                to_roman(row + 1),
                factor,
                to_roman(col + 1)
            );
            let kind = StepKind::AddMultiple {
                target: row,
                source: col,
                factor,
            };
            push_applied(&mut m, &mut steps, kind, description);
        }
    }

    Elimination {
        steps,
        final_matrix: m,
    }
}

/// Replays one planned step against a matrix. [`StepKind::Info`] is a no-op.
///
/// # Errors
///
/// Returns [`MatrixError::ZeroRowScale`] for a zero scale factor, which a
/// planned sequence never contains.
pub fn apply_step(matrix: &mut Matrix, kind: &StepKind) -> Result<(), MatrixError> {
    match kind {
        StepKind::Swap { row1, row2 } => {
            matrix.swap_rows(*row1, *row2);
            Ok(())
        }
        StepKind::Scale { row, factor } => matrix.scale_row(*row, factor),
        StepKind::AddMultiple {
            target,
            source,
            factor,
        } => {
            matrix.add_scaled_row(*target, *source, factor);
            Ok(())
        }
        StepKind::Info => Ok(()),
    }
}

/// Applies a step to the planning matrix and records it.
fn push_applied(m: &mut Matrix, steps: &mut Vec<Step>, kind: StepKind, description: String) {
    if apply_step(m, &kind).is_ok() {
        steps.push(Step { kind, description });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn int_matrix(rows: &[&[i64]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| Rational::from_integer(v)).collect())
                .collect(),
        )
    }

    fn assert_rref_identity_augmented(m: &Matrix, constants: &[Rational]) {
        let vars = m.num_cols() - 1;
        for i in 0..m.num_rows().min(vars) {
            for j in 0..vars {
                let expected = if i == j { rat(1, 1) } else { rat(0, 1) };
                assert_eq!(m[(i, j)], expected, "entry ({i}, {j})");
            }
        }
        for (i, c) in constants.iter().enumerate() {
            assert_eq!(&m[(i, m.num_cols() - 1)], c);
        }
    }

    #[test]
    fn test_caller_matrix_untouched() {
        let m = int_matrix(&[&[2, 1, 3], &[1, -1, 0]]);
        let before = m.clone();
        let _ = compute_steps(&m);
        assert_eq!(m, before);
    }

    #[test]
    fn test_unique_system() {
        // x1 + x2 = 3, 2*x1 - x2 = 0  =>  x1 = 1, x2 = 2
        let m = int_matrix(&[&[1, 1, 3], &[2, -1, 0]]);
        let plan = compute_steps(&m);
        assert_rref_identity_augmented(&plan.final_matrix, &[rat(1, 1), rat(2, 1)]);
    }

    #[test]
    fn test_steps_replay_to_final_matrix() {
        let m = int_matrix(&[&[1, 1, 3], &[2, -1, 0]]);
        let plan = compute_steps(&m);

        let mut replay = m.clone();
        for step in &plan.steps {
            apply_step(&mut replay, &step.kind).unwrap();
        }
        assert_eq!(replay, plan.final_matrix);
    }

    #[test]
    fn test_partial_pivot_swaps_largest_magnitude() {
        // Column 0 candidates are 1 and 2; partial pivoting brings 2 up
        let m = int_matrix(&[&[1, 1, 3], &[2, -1, 0]]);
        let plan = compute_steps(&m);
        assert_eq!(
            plan.steps[0].kind,
            StepKind::Swap { row1: 0, row2: 1 }
        );
    }

    #[test]
    fn test_pivot_tie_keeps_first_row() {
        // Equal magnitudes: strict > means no swap is planned
        let m = int_matrix(&[&[2, 0, 1], &[-2, 1, 0]]);
        let plan = compute_steps(&m);
        assert!(!plan
            .steps
            .iter()
            .any(|s| matches!(s.kind, StepKind::Swap { .. })));
    }

    #[test]
    fn test_zero_pivot_column_emits_info_and_skips() {
        // Column 0 is entirely zero: an info step, no elimination there
        let m = int_matrix(&[&[0, 1, 2], &[0, 0, 0]]);
        let plan = compute_steps(&m);
        assert!(matches!(plan.steps[0].kind, StepKind::Info));
        // Column 1 still gets reduced
        assert_eq!(plan.final_matrix[(0, 1)], rat(1, 1));
    }

    #[test]
    fn test_rank_deficient_reduces_consistently() {
        // Second row is twice the first
        let m = int_matrix(&[&[1, 1, 2], &[2, 2, 4]]);
        let plan = compute_steps(&m);
        let f = &plan.final_matrix;
        assert_eq!(f[(0, 0)], rat(1, 1));
        assert_eq!(f[(0, 1)], rat(1, 1));
        assert_eq!(f[(0, 2)], rat(2, 1));
        for j in 0..3 {
            assert_eq!(f[(1, j)], rat(0, 1), "row 1 should be zeroed (col {j})");
        }
    }

    #[test]
    fn test_scale_step_uses_reciprocal() {
        let m = int_matrix(&[&[4, 2, 8]]);
        let plan = compute_steps(&m);
        assert!(plan.steps.iter().any(|s| matches!(
            &s.kind,
            StepKind::Scale { row: 0, factor } if *factor == rat(1, 4)
        )));
        assert_eq!(plan.final_matrix[(0, 0)], rat(1, 1));
        assert_eq!(plan.final_matrix[(0, 1)], rat(1, 2));
        assert_eq!(plan.final_matrix[(0, 2)], rat(2, 1));
    }

    #[test]
    fn test_fractional_entries_stay_exact() {
        // 1/3*x1 + 1/6*x2 = 1, 1/2*x1 - x2 = -1
        let m = Matrix::from_rows(vec![
            vec![rat(1, 3), rat(1, 6), rat(1, 1)],
            vec![rat(1, 2), rat(-1, 1), rat(-1, 1)],
        ]);
        let plan = compute_steps(&m);
        // Same system as 2*x1 + x2 = 6, x1 - 2*x2 = -2
        assert_rref_identity_augmented(&plan.final_matrix, &[rat(2, 1), rat(2, 1)]);
    }

    #[test]
    fn test_single_column_matrix_plans_nothing() {
        // One column means no variable columns at all
        let m = int_matrix(&[&[5], &[2]]);
        let plan = compute_steps(&m);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.final_matrix, m);
    }
}
