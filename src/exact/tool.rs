//! Subprocess adapter for the compiled `exactP` evaluator.
//!
//! Wire format: the two tolerances are passed as arguments, the radii are
//! written to the evaluator's stdin one per line, and the evaluator answers
//! with one line per radius containing five whitespace-separated values:
//!
//! ```text
//! h  magvb  w_crit  w  p
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::{ExactError, ExactSample, ExactSolution};

/// Runs the external `exactP` evaluator.
#[derive(Debug, Clone)]
pub struct ExactPTool {
    path: PathBuf,
}

impl ExactPTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the evaluator executable.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ExactSolution for ExactPTool {
    fn evaluate(
        &self,
        radii: &[f64],
        eps_abs: f64,
        eps_rel: f64,
    ) -> Result<Vec<ExactSample>, ExactError> {
        if !self.path.is_file() {
            return Err(ExactError::ToolMissing(self.path.clone()));
        }

        let mut child = Command::new(&self.path)
            .arg(format!("{eps_abs:e}"))
            .arg(format!("{eps_rel:e}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            for r in radii {
                writeln!(stdin, "{r:.17e}")?;
            }
            // dropping stdin closes the pipe and lets the evaluator finish
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ExactError::ToolFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_output(&String::from_utf8_lossy(&output.stdout), radii.len())
    }
}

/// Parse evaluator stdout into samples, enforcing one line per radius.
fn parse_output(stdout: &str, expected: usize) -> Result<Vec<ExactSample>, ExactError> {
    let mut samples = Vec::with_capacity(expected);

    for (i, line) in stdout.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let values: Vec<f64> = trimmed
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| ExactError::BadOutput {
                line: i + 1,
                content: line.to_string(),
            })?;

        if values.len() != 5 {
            return Err(ExactError::BadOutput {
                line: i + 1,
                content: line.to_string(),
            });
        }

        samples.push(ExactSample {
            h: values[0],
            magvb: values[1],
            w_crit: values[2],
            w: values[3],
            p: values[4],
        });
    }

    if samples.len() != expected {
        return Err(ExactError::LengthMismatch {
            expected,
            actual: samples.len(),
        });
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let tool = ExactPTool::new("/nonexistent/exactP");
        let err = tool.evaluate(&[0.0, 1.0], 1e-12, 1e-15).unwrap_err();
        assert!(matches!(err, ExactError::ToolMissing(_)));
    }

    #[test]
    fn test_parse_well_formed_output() {
        let stdout = "100.0 1.0e-6 0.5 0.9 80000.0\n200.0 2.0e-6 0.6 1.0 90000.0\n";
        let samples = parse_output(stdout, 2).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].h, 100.0);
        assert_eq!(samples[0].magvb, 1.0e-6);
        assert_eq!(samples[1].p, 90000.0);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let stdout = "\n1 2 3 4 5\n\n6 7 8 9 10\n";
        let samples = parse_output(stdout, 2).unwrap();
        assert_eq!(samples[1].w, 9.0);
    }

    #[test]
    fn test_parse_rejects_short_line() {
        let err = parse_output("1 2 3\n", 1).unwrap_err();
        assert!(matches!(err, ExactError::BadOutput { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_output("1 2 x 4 5\n", 1).unwrap_err();
        assert!(matches!(err, ExactError::BadOutput { .. }));
    }

    #[test]
    fn test_parse_enforces_length() {
        let err = parse_output("1 2 3 4 5\n", 3).unwrap_err();
        assert!(matches!(
            err,
            ExactError::LengthMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }
}
