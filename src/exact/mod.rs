//! Adapter for the external exact-solution evaluator.
//!
//! The radially symmetric exact solution is computed by the compiled
//! `exactP` evaluator from the PISM source tree; this crate only consumes
//! it through a narrow interface. The [`ExactSolution`] trait is the seam:
//! the production implementation ([`ExactPTool`]) shells out to the
//! evaluator, while tests substitute synthetic solutions.
//!
//! The harness passes the radius-sorted sequence's `r` values verbatim,
//! ascending, without reordering or deduplication, and the evaluator must
//! answer with one sample per radius in the same order. Once the samples
//! are back, [`pair_with_index`] zips them with the radial index into a
//! single sequence of paired records so the radius bookkeeping and the
//! solution values cannot drift out of sync.

mod tool;

pub use tool::ExactPTool;

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::RadialIndex;

/// Error type for exact-solution evaluation.
#[derive(Debug, Error)]
pub enum ExactError {
    /// The evaluator executable is absent.
    #[error("exact-solution evaluator not found at '{}'; build it with 'make exactP' in the PISM source tree", .0.display())]
    ToolMissing(PathBuf),

    /// The evaluator could not be launched or fed.
    #[error("failed to run exact-solution evaluator: {0}")]
    Launch(#[from] std::io::Error),

    /// The evaluator exited with a non-zero status.
    #[error("exact-solution evaluator exited with {status}: {stderr}")]
    ToolFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// A line of evaluator output could not be parsed.
    #[error("cannot parse evaluator output line {line}: '{content}'")]
    BadOutput { line: usize, content: String },

    /// The evaluator answered with the wrong number of samples.
    #[error("evaluator returned {actual} samples for {expected} radii")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Exact solution values at a single radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactSample {
    /// Ice thickness [m].
    pub h: f64,
    /// Sliding speed magnitude [m s-1].
    pub magvb: f64,
    /// Critical water thickness [m]; reported by the evaluator but unused
    /// by the harness.
    pub w_crit: f64,
    /// Water thickness [m].
    pub w: f64,
    /// Water pressure [Pa].
    pub p: f64,
}

/// The exact-solution evaluator contract.
///
/// Implementations must return exactly one sample per input radius, in the
/// same order as the input.
pub trait ExactSolution {
    fn evaluate(
        &self,
        radii: &[f64],
        eps_abs: f64,
        eps_rel: f64,
    ) -> Result<Vec<ExactSample>, ExactError>;
}

/// A radius record paired with its exact solution.
///
/// Keeping radius, grid cell, and solution in one record removes the
/// possibility of iterating two same-length sequences out of lockstep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialSample {
    /// Distance from the origin.
    pub r: f64,
    /// Row index (y axis) of the originating cell.
    pub row: usize,
    /// Column index (x axis) of the originating cell.
    pub col: usize,
    /// Exact solution at this radius.
    pub solution: ExactSample,
}

/// Zip evaluator output with the radial index into paired records.
///
/// Fails with [`ExactError::LengthMismatch`] if the evaluator did not
/// answer one sample per radius.
pub fn pair_with_index(
    index: &RadialIndex,
    samples: Vec<ExactSample>,
) -> Result<Vec<RadialSample>, ExactError> {
    if samples.len() != index.len() {
        return Err(ExactError::LengthMismatch {
            expected: index.len(),
            actual: samples.len(),
        });
    }

    Ok(index
        .ascending()
        .iter()
        .zip(samples)
        .map(|(record, solution)| RadialSample {
            r: record.r,
            row: record.row,
            col: record.col,
            solution,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CartesianGrid;

    fn flat_samples(n: usize) -> Vec<ExactSample> {
        vec![
            ExactSample {
                h: 1.0,
                magvb: 2.0,
                w_crit: 0.0,
                w: 3.0,
                p: 4.0,
            };
            n
        ]
    }

    #[test]
    fn test_pairing_preserves_order() {
        let grid = CartesianGrid::new(4, 2.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        let samples: Vec<ExactSample> = index
            .radii()
            .iter()
            .map(|&r| ExactSample {
                h: r,
                magvb: 0.0,
                w_crit: 0.0,
                w: 0.0,
                p: 0.0,
            })
            .collect();

        let paired = pair_with_index(&index, samples).unwrap();
        assert_eq!(paired.len(), index.len());
        for sample in &paired {
            assert_eq!(sample.solution.h, sample.r);
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let grid = CartesianGrid::new(3, 1.0).unwrap();
        let index = RadialIndex::from_grid(&grid);

        let err = pair_with_index(&index, flat_samples(5)).unwrap_err();
        assert!(matches!(
            err,
            ExactError::LengthMismatch {
                expected: 9,
                actual: 5
            }
        ));
    }
}
