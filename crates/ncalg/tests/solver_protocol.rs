//! The solver text format and a scripted stand-in for the solver.

use ncalg::bridge::decode::{parse_basis_output, parse_normal_form_output};
use ncalg::bridge::encode::basis_file_contents;
use ncalg::prelude::*;

fn sklyanin_basis() -> GroebnerBasis<Q> {
    let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
    let relations = sklyanin_relations(&a, &Q::new(1, 2), &Q::new(1, 3), &Q::from_integer(-1)).unwrap();
    LocalCompletion::default().complete(&a, &relations, Some(3)).unwrap()
}

#[test]
fn basis_survives_the_text_format() {
    let basis = sklyanin_basis();
    let text = basis_file_contents(&basis);
    assert_eq!(text.lines().count(), basis.len());

    let parsed = parse_basis_output(basis.algebra(), &text).unwrap();
    let rebuilt = GroebnerBasis::from_generators(basis.algebra(), parsed).unwrap();
    assert_eq!(rebuilt.elements(), basis.elements());
}

#[test]
fn normal_form_blocks_parse_in_order() {
    let basis = sklyanin_basis();
    let a = basis.algebra();
    let inputs = ["x*y*z", "y*x*z", "z^3"];
    let text: String = inputs
        .iter()
        .map(|s| {
            let nf = normal_form(&a.parse(s).unwrap(), &basis);
            format!("{s}\nis reduced to\n{nf}\n")
        })
        .collect();

    let results = parse_normal_form_output(a, &text).unwrap();
    assert_eq!(results.len(), 3);
    for (s, r) in inputs.iter().zip(&results) {
        assert_eq!(r, &normal_form(&a.parse(s).unwrap(), &basis));
    }
}

#[cfg(unix)]
mod scripted {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // echoes generators as the basis and elements as their own normal forms
    const ECHO: &str = r#"
out=$(awk -F'"' '/^\(setoutput /{print $2}' "$1")
if grep -q '^(compute)$' "$1"; then
  awk '/^\(.*\);$/ { print substr($0, 2, length($0) - 3) ";" }' "$1" > "$out"
else
  awk '/^\(.*\);$/ { e = substr($0, 2, length($0) - 3); print e; print "is reduced to"; print e }' "$1" > "$out"
fi
"#;

    fn solver(dir: &Path) -> ExternalSolver {
        let script = dir.join("solver.sh");
        fs::write(&script, ECHO).unwrap();
        let config = BridgeConfig::new("/bin/sh")
            .with_args([script.display().to_string()])
            .with_temp_root(dir);
        ExternalSolver::new(config).unwrap()
    }

    #[test]
    fn external_engine_backs_an_ideal() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let dir = TempDir::new().unwrap();
        let solver = solver(dir.path());

        let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
        let relations = skew_polynomial_ring_relations(&a, &Q::from_integer(-1));
        let ideal = TwoSidedIdeal::new(&a, relations).unwrap();
        let q = ideal.quotient(&solver, Some(4)).unwrap();

        assert_eq!(q.basis().len(), 3);
        assert_eq!(q.basis().truncated_at(), Some(4));
        assert_eq!(q.element("x*y*z").unwrap(), a.parse("-z*y*x").unwrap());
        assert!(solver.cached_basis_file(q.basis().id()).is_some());
    }

    #[test]
    fn engine_offloads_large_batches() {
        let dir = TempDir::new().unwrap();
        let engine = ReductionEngine::with_solver(solver(dir.path()))
            .with_thresholds(ReductionThresholds::default().with_max_term_count(1));
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        let basis = GroebnerBasis::from_generators(&a, [a.parse("x*y - y*x").unwrap()]).unwrap();

        let batch = vec![a.parse("y^2").unwrap(), a.parse("1/2*y").unwrap()];
        assert!(engine.should_offload(&batch));
        // the stand-in returns its input, so the result shows the batch
        // went through the file protocol with denominators restored
        assert_eq!(engine.normal_forms(&basis, &batch).unwrap(), batch);
    }

    #[test]
    fn missing_solver_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = BridgeConfig::new(dir.path().join("no-such-solver")).with_temp_root(dir.path());
        let solver = ExternalSolver::new(config).unwrap();
        let a = FreeAlgebra::<Q>::new(&["x"]).unwrap();
        let err = solver.compute_basis(&a, &[a.parse("x^2").unwrap()], None).unwrap_err();
        assert!(matches!(err, BridgeError::SolverUnavailable { .. }));
    }
}
