//! A single calculator session: one matrix, its history, and the
//! step-by-step solve state.
//!
//! Sessions own all of their state; any number of independent sessions can
//! coexist. Every mutating method either fully succeeds (and records a
//! history snapshot) or returns an error with no observable effect.

use thiserror::Error;

use echelon_matrix::{Matrix, MatrixError};
use echelon_rational::{Rational, RationalError};

use crate::classify::{classify, Classification};
use crate::elimination::{apply_step, compute_steps, Elimination, Step};
use crate::history::{History, HistoryEntry};
use crate::operation::{OperationError, RowOperation};
use crate::roman::to_roman;

/// Any error a session operation can report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Unparseable number text.
    #[error(transparent)]
    Number(#[from] RationalError),

    /// A rejected matrix mutation.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// A malformed row-operation line.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// One calculator session.
#[derive(Clone, Debug)]
pub struct Session {
    matrix: Matrix,
    history: History,
    pending_steps: Vec<Step>,
    next_step: usize,
}

impl Session {
    /// Creates a session with a fresh rows-by-cols zero matrix, recorded as
    /// the first history entry.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let matrix = Matrix::zeros(rows, cols);
        let mut history = History::new();
        history.push(matrix.clone(), "Matrix created");
        Self {
            matrix,
            history,
            pending_steps: Vec::new(),
            next_step: 0,
        }
    }

    /// Returns the current matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Returns the history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the last `n` history entries, oldest first.
    #[must_use]
    pub fn recent_history(&self, n: usize) -> &[HistoryEntry] {
        self.history.recent(n)
    }

    /// Replaces the matrix with a fresh rows-by-cols zero matrix.
    ///
    /// History is not reset: the replacement is recorded as one more entry,
    /// so it can be undone.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.matrix = Matrix::zeros(rows, cols);
        self.abandon_steps();
        self.history
            .push(self.matrix.clone(), format!("Matrix created ({rows}x{cols})"));
    }

    /// Zeroes the matrix, keeping its dimensions.
    pub fn clear(&mut self) {
        self.matrix = Matrix::zeros(self.matrix.num_rows(), self.matrix.num_cols());
        self.abandon_steps();
        self.history.push(self.matrix.clone(), "Matrix reset");
    }

    /// Sets one cell from text (integer, decimal, or fraction).
    ///
    /// # Errors
    ///
    /// [`RationalError::InvalidNumber`] via [`EngineError::Matrix`] for bad
    /// text, [`MatrixError::IndexOutOfBounds`] for bad indices; the matrix
    /// and history are unchanged on error.
    pub fn set_cell(&mut self, row: usize, col: usize, text: &str) -> Result<(), EngineError> {
        self.matrix.set_text(row, col, text)?;
        self.after_mutation(format!("Value changed at ({}, {})", to_roman(row + 1), col + 1));
        Ok(())
    }

    /// Sets one cell to a rational value.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfBounds`] for bad indices.
    pub fn set_cell_value(
        &mut self,
        row: usize,
        col: usize,
        value: Rational,
    ) -> Result<(), EngineError> {
        self.matrix.set(row, col, value)?;
        self.after_mutation(format!("Value changed at ({}, {})", to_roman(row + 1), col + 1));
        Ok(())
    }

    /// Parses and applies a row-operation line like `I = I + 3*II`.
    ///
    /// # Errors
    ///
    /// Any [`OperationError`]; the matrix and history are unchanged on
    /// error.
    pub fn apply_operation(&mut self, text: &str) -> Result<RowOperation, EngineError> {
        let op = RowOperation::parse(text, self.matrix.num_rows())?;
        op.apply(&mut self.matrix)?;
        self.after_mutation(format!("Operation: {}", text.trim()));
        Ok(op)
    }

    /// Swaps two rows.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfBounds`] if either row is out of range.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<(), EngineError> {
        self.check_row(r1)?;
        self.check_row(r2)?;
        self.matrix.swap_rows(r1, r2);
        self.after_mutation(format!(
            "Swapped rows {} and {}",
            to_roman(r1 + 1),
            to_roman(r2 + 1)
        ));
        Ok(())
    }

    /// Scales a row by a nonzero factor.
    ///
    /// # Errors
    ///
    /// [`MatrixError::ZeroRowScale`] for a zero factor,
    /// [`MatrixError::IndexOutOfBounds`] for a bad row.
    pub fn scale_row(&mut self, row: usize, factor: &Rational) -> Result<(), EngineError> {
        self.check_row(row)?;
        self.matrix.scale_row(row, factor)?;
        self.after_mutation(format!("{} = {}*{}", to_roman(row + 1), factor, to_roman(row + 1)));
        Ok(())
    }

    /// Scales a row by a factor given as text.
    ///
    /// # Errors
    ///
    /// As [`Session::scale_row`], plus [`RationalError::InvalidNumber`].
    pub fn scale_row_text(&mut self, row: usize, factor: &str) -> Result<(), EngineError> {
        let factor: Rational = factor.parse::<Rational>().map_err(EngineError::Number)?;
        self.scale_row(row, &factor)
    }

    /// Adds `factor` times the source row into the target row.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfBounds`] if either row is out of range.
    pub fn add_multiple(
        &mut self,
        target: usize,
        source: usize,
        factor: &Rational,
    ) -> Result<(), EngineError> {
        self.check_row(target)?;
        self.check_row(source)?;
        self.matrix.add_scaled_row(target, source, factor);
        self.after_mutation(format!(
            "{} = {} + ({})*{}",
            to_roman(target + 1),
            to_roman(target + 1),
            factor,
            to_roman(source + 1)
        ));
        Ok(())
    }

    /// Plans the full reduction of the current matrix without mutating it.
    #[must_use]
    pub fn compute_steps(&self) -> Elimination {
        compute_steps(&self.matrix)
    }

    /// Plans a reduction and stores it for [`Session::apply_next_step`].
    ///
    /// Returns the number of planned steps.
    pub fn begin_steps(&mut self) -> usize {
        let plan = compute_steps(&self.matrix);
        self.pending_steps = plan.steps;
        self.next_step = 0;
        self.pending_steps.len()
    }

    /// Applies the next pending mutating step, skipping informational ones.
    ///
    /// Returns the applied step's description, or `None` once the sequence
    /// is exhausted. Each applied step records one history entry.
    ///
    /// # Errors
    ///
    /// [`MatrixError`] if a stored step no longer fits the matrix (the
    /// pending sequence is cleared by any other mutation, so this does not
    /// happen in normal use).
    pub fn apply_next_step(&mut self) -> Result<Option<String>, EngineError> {
        while self.next_step < self.pending_steps.len() {
            let step = self.pending_steps[self.next_step].clone();
            self.next_step += 1;
            if !step.kind.is_mutation() {
                continue;
            }
            apply_step(&mut self.matrix, &step.kind)?;
            self.history.push(self.matrix.clone(), step.description.clone());
            return Ok(Some(step.description));
        }
        Ok(None)
    }

    /// Plans and applies the entire reduction in one call.
    ///
    /// Records a single history entry for the batch and returns the number
    /// of mutating steps applied.
    ///
    /// # Errors
    ///
    /// [`MatrixError`] if a planned step fails to apply, which a fresh plan
    /// never does.
    pub fn apply_all_steps(&mut self) -> Result<usize, EngineError> {
        let plan = compute_steps(&self.matrix);
        let mut applied = 0;
        for step in &plan.steps {
            if step.kind.is_mutation() {
                apply_step(&mut self.matrix, &step.kind)?;
                applied += 1;
            }
        }
        self.abandon_steps();
        self.history.push(self.matrix.clone(), "Fully solved");
        Ok(applied)
    }

    /// Classifies the current system (unique / infinite / inconsistent /
    /// not yet reduced).
    #[must_use]
    pub fn classify(&self) -> Classification {
        classify(&self.matrix)
    }

    /// Steps back one history entry. Returns false at the start.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.history.undo() {
            self.matrix = snapshot.clone();
            self.pending_steps.clear();
            self.next_step = 0;
            true
        } else {
            false
        }
    }

    /// Steps forward one history entry. Returns false at the end.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.history.redo() {
            self.matrix = snapshot.clone();
            self.pending_steps.clear();
            self.next_step = 0;
            true
        } else {
            false
        }
    }

    /// Records the current matrix as a history entry under `description`.
    ///
    /// Mutating methods snapshot automatically; this is for callers that
    /// want to label a point in time themselves.
    pub fn push_history(&mut self, description: &str) {
        self.history.push(self.matrix.clone(), description);
    }

    /// Discards all history except the current entry.
    pub fn clear_history(&mut self) {
        self.history.clear_to_current();
    }

    /// Renders the matrix as tab-separated cell text, one row per line.
    #[must_use]
    pub fn export_grid(&self) -> String {
        self.matrix
            .to_text_grid()
            .into_iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders the matrix as labeled rows: `I: [v1, v2, ...]` per line.
    #[must_use]
    pub fn export_labeled(&self) -> String {
        self.matrix
            .to_text_grid()
            .into_iter()
            .enumerate()
            .map(|(i, row)| format!("{}: [{}]", to_roman(i + 1), row.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replaces the matrix with one parsed from delimited text.
    ///
    /// Rows are lines; cells split on tabs, commas, or semicolons. The
    /// matrix takes the dimensions of the input (the first line sets the
    /// column count); empty cells stay zero.
    ///
    /// # Errors
    ///
    /// [`RationalError::InvalidNumber`] for empty input or an unparseable
    /// cell; the session is unchanged on error.
    pub fn import_delimited(&mut self, text: &str) -> Result<(), EngineError> {
        let lines: Vec<&str> = text.trim().lines().collect();
        let cols = lines
            .first()
            .map(|line| line.split(['\t', ',', ';']).count())
            .unwrap_or(0);
        if lines.is_empty() || cols == 0 {
            return Err(RationalError::InvalidNumber(text.to_string()).into());
        }

        let mut imported = Matrix::zeros(lines.len(), cols);
        for (i, line) in lines.iter().enumerate() {
            for (j, cell) in line.split(['\t', ',', ';']).enumerate().take(cols) {
                let cell = cell.trim();
                if !cell.is_empty() {
                    imported.set_text(i, j, cell)?;
                }
            }
        }

        self.matrix = imported;
        self.abandon_steps();
        self.history.push(self.matrix.clone(), "Matrix imported");
        Ok(())
    }

    fn check_row(&self, row: usize) -> Result<(), MatrixError> {
        if row < self.matrix.num_rows() {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfBounds {
                row,
                col: 0,
                rows: self.matrix.num_rows(),
                cols: self.matrix.num_cols(),
            })
        }
    }

    /// A successful mutation invalidates any pending plan and snapshots.
    fn after_mutation(&mut self, description: String) {
        self.abandon_steps();
        self.history.push(self.matrix.clone(), description);
    }

    fn abandon_steps(&mut self) {
        self.pending_steps.clear();
        self.next_step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn rat(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn session_2x3(rows: [[i64; 3]; 2]) -> Session {
        let mut s = Session::new(2, 3);
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                s.set_cell_value(i, j, Rational::from_integer(v)).unwrap();
            }
        }
        s
    }

    #[test]
    fn test_new_session_is_zeroed_and_snapshotted() {
        let s = Session::new(3, 4);
        for i in 0..3 {
            for j in 0..4 {
                assert!(s.matrix()[(i, j)].is_zero());
            }
        }
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history().current().unwrap().description, "Matrix created");
    }

    #[test]
    fn test_failed_set_cell_leaves_no_trace() {
        let mut s = Session::new(2, 2);
        let history_len = s.history().len();
        assert!(s.set_cell(0, 0, "not a number").is_err());
        assert!(s.set_cell(5, 0, "1").is_err());
        assert!(s.matrix()[(0, 0)].is_zero());
        assert_eq!(s.history().len(), history_len);
    }

    #[test]
    fn test_apply_operation_records_history() {
        let mut s = session_2x3([[1, 0, 5], [0, 1, 2]]);
        let op = s.apply_operation("I = I + 3*II").unwrap();
        assert_eq!(op.target, 0);
        assert_eq!(s.matrix()[(0, 1)], rat(3, 1));
        assert_eq!(s.matrix()[(0, 2)], rat(11, 1));
        assert_eq!(
            s.history().current().unwrap().description,
            "Operation: I = I + 3*II"
        );
    }

    #[test]
    fn test_failed_operation_leaves_no_trace() {
        let mut s = session_2x3([[1, 0, 5], [0, 1, 2]]);
        let history_len = s.history().len();
        assert!(s.apply_operation("I = 4*VII").is_err());
        assert_eq!(s.matrix()[(0, 2)], rat(5, 1));
        assert_eq!(s.history().len(), history_len);
    }

    #[test]
    fn test_full_solve_and_classify() {
        let mut s = session_2x3([[1, 1, 3], [2, -1, 0]]);
        s.apply_all_steps().unwrap();
        assert_eq!(
            s.classify(),
            Classification::Unique(vec![rat(1, 1), rat(2, 1)])
        );
        assert_eq!(s.history().current().unwrap().description, "Fully solved");
    }

    #[test]
    fn test_step_by_step_matches_full_solve() {
        let mut stepped = session_2x3([[1, 1, 3], [2, -1, 0]]);
        let mut batch = stepped.clone();

        let planned = stepped.begin_steps();
        assert!(planned > 0);
        let mut applied = 0;
        while stepped.apply_next_step().unwrap().is_some() {
            applied += 1;
        }
        let batch_applied = batch.apply_all_steps().unwrap();

        assert_eq!(applied, batch_applied);
        assert_eq!(stepped.matrix(), batch.matrix());
        // One history entry per applied step, versus one for the batch
        assert_eq!(stepped.history().len(), batch.history().len() + applied - 1);
    }

    #[test]
    fn test_step_mode_skips_info_steps() {
        // All-zero first column plans an info step that must not stall
        let mut s = session_2x3([[0, 1, 2], [0, 0, 0]]);
        s.begin_steps();
        while s.apply_next_step().unwrap().is_some() {}
        assert!(s.apply_next_step().unwrap().is_none());
    }

    #[test]
    fn test_infinite_classification_after_solve() {
        let mut s = session_2x3([[1, 1, 2], [2, 2, 4]]);
        s.apply_all_steps().unwrap();
        match s.classify() {
            Classification::Infinite { free, .. } => assert_eq!(free, vec![1]),
            other => panic!("expected Infinite, got {other:?}"),
        }
    }

    #[test]
    fn test_inconsistent_classification() {
        let mut s = Session::new(1, 3);
        s.set_cell(0, 2, "5").unwrap();
        assert_eq!(s.classify(), Classification::Inconsistent);
    }

    #[test]
    fn test_undo_redo_restores_snapshots() {
        let mut s = Session::new(1, 2);
        s.set_cell(0, 0, "1").unwrap();
        s.set_cell(0, 1, "2").unwrap();

        assert!(s.undo());
        assert!(s.matrix()[(0, 1)].is_zero());
        assert!(s.redo());
        assert_eq!(s.matrix()[(0, 1)], rat(2, 1));
        assert!(!s.redo());

        // Pushing after an undo drops the redo branch
        s.undo();
        s.set_cell(0, 1, "7").unwrap();
        assert!(!s.redo());
        assert_eq!(s.matrix()[(0, 1)], rat(7, 1));
    }

    #[test]
    fn test_exports() {
        let mut s = Session::new(2, 2);
        s.set_cell(0, 0, "1/2").unwrap();
        s.set_cell(1, 1, "-3").unwrap();
        assert_eq!(s.export_grid(), "1/2\t0\n0\t-3");
        assert_eq!(s.export_labeled(), "I: [1/2, 0]\nII: [0, -3]");
    }

    #[test]
    fn test_import_delimited() {
        let mut s = Session::new(1, 1);
        s.import_delimited("1\t2\t3\n4,5,6\n7;8;1/2").unwrap();
        assert_eq!(s.matrix().num_rows(), 3);
        assert_eq!(s.matrix().num_cols(), 3);
        assert_eq!(s.matrix()[(2, 2)], rat(1, 2));
        assert_eq!(s.history().current().unwrap().description, "Matrix imported");

        // A bad cell aborts the import and keeps the old matrix
        assert!(s.import_delimited("1\tfoo").is_err());
        assert_eq!(s.matrix().num_rows(), 3);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Session::new(1, 2);
        let b = Session::new(1, 2);
        a.set_cell(0, 0, "9").unwrap();
        assert!(b.matrix()[(0, 0)].is_zero());
    }
}
