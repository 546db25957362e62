//! Parsing of solver output files.
//!
//! Basis output is one expression per line. Normal-form output is a
//! sequence of three-line blocks:
//!
//! ```text
//! x*y*z
//! is reduced to
//! -z*y*x
//! ```
//!
//! In both formats blank lines and `%` comments are skipped and a
//! trailing `,` or `;` is ignored.

use ncalg_core::{FreeAlgebra, NcPoly};
use ncalg_rings::Field;

use crate::error::BridgeError;

/// Marker line separating an input from its normal form.
pub const REDUCED_MARKER: &str = "is reduced to";

/// Content lines with their one-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('%'))
        .map(|(i, l)| (i, l.trim_end_matches([',', ';']).trim_end()))
}

fn parse_line<F: Field>(
    algebra: &FreeAlgebra<F>,
    line_no: usize,
    line: &str,
) -> Result<NcPoly<F>, BridgeError> {
    algebra.parse(line).map_err(|e| BridgeError::MalformedOutput {
        line: line_no,
        message: e.to_string(),
    })
}

/// Parses basis output into monic generators.
///
/// # Errors
///
/// Returns [`BridgeError::MalformedOutput`] for a line that is not an
/// expression over the algebra's generators.
pub fn parse_basis_output<F: Field>(
    algebra: &FreeAlgebra<F>,
    text: &str,
) -> Result<Vec<NcPoly<F>>, BridgeError> {
    content_lines(text)
        .map(|(i, line)| parse_line(algebra, i, line).map(|g| g.make_monic()))
        .filter(|g| g.as_ref().map_or(true, |g| !g.is_zero()))
        .collect()
}

/// Parses normal-form output into the results, in order.
///
/// # Errors
///
/// Returns [`BridgeError::MalformedOutput`] when a block is incomplete or
/// an expression does not parse.
pub fn parse_normal_form_output<F: Field>(
    algebra: &FreeAlgebra<F>,
    text: &str,
) -> Result<Vec<NcPoly<F>>, BridgeError> {
    let mut lines = content_lines(text);
    let mut results = Vec::new();

    while let Some((input_no, input)) = lines.next() {
        if input == REDUCED_MARKER {
            return Err(BridgeError::MalformedOutput {
                line: input_no,
                message: "marker without an input expression".to_string(),
            });
        }
        match lines.next() {
            Some((_, REDUCED_MARKER)) => {}
            Some((n, other)) => {
                return Err(BridgeError::MalformedOutput {
                    line: n,
                    message: format!("expected `{REDUCED_MARKER}`, found `{other}`"),
                })
            }
            None => {
                return Err(BridgeError::MalformedOutput {
                    line: input_no,
                    message: format!("input without `{REDUCED_MARKER}`"),
                })
            }
        }
        let Some((result_no, result)) = lines.next() else {
            return Err(BridgeError::MalformedOutput {
                line: input_no,
                message: "missing normal form".to_string(),
            });
        };
        results.push(parse_line(algebra, result_no, result)?);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncalg_rings::Q;

    fn xyz() -> FreeAlgebra<Q> {
        FreeAlgebra::new(&["x", "y", "z"]).unwrap()
    }

    #[test]
    fn test_basis_output() {
        let a = xyz();
        let text = "% basis computed\n\n2*y*x + 2*x*y,\n z^2 - x ;\n0\n";
        let basis = parse_basis_output(&a, text).unwrap();
        assert_eq!(
            basis,
            vec![a.parse("y*x + x*y").unwrap(), a.parse("z^2 - x").unwrap()]
        );
        assert!(basis.iter().all(|g| g.leading_coeff() == Some(&Q::from_integer(1))));
    }

    #[test]
    fn test_basis_output_rejects_garbage() {
        let a = xyz();
        let err = parse_basis_output(&a, "x*y\nw*x\n").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedOutput { line: 2, .. }));
    }

    #[test]
    fn test_normal_form_output() {
        let a = xyz();
        let text = "x*y*z\nis reduced to\n-z*y*x\n\n3*x\nis reduced to\n0\n";
        let results = parse_normal_form_output(&a, text).unwrap();
        assert_eq!(results, vec![a.parse("-z*y*x").unwrap(), a.zero()]);
    }

    #[test]
    fn test_normal_form_output_needs_marker() {
        let a = xyz();
        let err = parse_normal_form_output(&a, "x\ny\nz\n").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedOutput { line: 2, .. }));

        let err = parse_normal_form_output(&a, "x\nis reduced to\n").unwrap_err();
        assert!(matches!(err, BridgeError::MalformedOutput { line: 1, .. }));
    }
}
