//! The external solver as a basis engine.
//!
//! Each call writes a session script into a fresh workspace, runs the
//! solver and decodes its output file. Every basis that passes through
//! the bridge is serialized once into a cache directory owned by the
//! bridge; later normal-form requests read that file instead of
//! recomputing the basis.

use std::fs;
use std::io;
use std::path::PathBuf;

use ncalg_core::{FreeAlgebra, NcPoly};
use ncalg_groebner::{BasisEngine, GroebnerBasis, GroebnerError};
use ncalg_rings::{Field, FieldKind};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::BridgeConfig;
use crate::decode::{parse_basis_output, parse_normal_form_output};
use crate::encode::{basis_file_contents, clear_denominators, element_line};
use crate::error::BridgeError;
use crate::process::{run_solver, Workspace};
use crate::script::{Request, SessionScript};

/// The characteristic to announce to the solver.
///
/// # Errors
///
/// Returns [`BridgeError::UnsupportedCoefficients`] for anything but the
/// rationals and prime fields.
pub fn supported_characteristic(kind: FieldKind) -> Result<u64, BridgeError> {
    kind.characteristic()
        .ok_or(BridgeError::UnsupportedCoefficients { kind })
}

/// Bridge to an external batch Gröbner-basis solver.
#[derive(Debug)]
pub struct ExternalSolver {
    config: BridgeConfig,
    cache_dir: TempDir,
    basis_files: Mutex<FxHashMap<u64, PathBuf>>,
}

impl ExternalSolver {
    /// Creates a bridge and its basis-file cache directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from creating the cache directory.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("ncalg-bases-");
        let cache_dir = match &config.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(Self {
            config,
            cache_dir,
            basis_files: Mutex::new(FxHashMap::default()),
        })
    }

    /// Creates a bridge configured from the environment.
    ///
    /// # Errors
    ///
    /// See [`ExternalSolver::new`].
    pub fn from_env() -> Result<Self, BridgeError> {
        Self::new(BridgeConfig::from_env())
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The file a basis was serialized to, if it has been.
    #[must_use]
    pub fn cached_basis_file(&self, basis_id: u64) -> Option<PathBuf> {
        self.basis_files.lock().get(&basis_id).cloned()
    }

    /// Serializes `basis` into the cache unless it is already there.
    fn register_basis<F: Field>(&self, basis: &GroebnerBasis<F>) -> Result<PathBuf, BridgeError> {
        let mut files = self.basis_files.lock();
        if let Some(path) = files.get(&basis.id()) {
            return Ok(path.clone());
        }
        let path = self.cache_dir.path().join(format!("basis-{}.txt", basis.id()));
        fs::write(&path, basis_file_contents(basis))?;
        debug!("cached basis {} in {}", basis.id(), path.display());
        files.insert(basis.id(), path.clone());
        Ok(path)
    }

    /// Writes the script, runs the solver and returns the output text.
    fn run(&self, script: &SessionScript, workspace: &Workspace) -> Result<String, BridgeError> {
        let script_path = workspace.script_path();
        fs::write(&script_path, script.render())?;
        run_solver(&self.config, &script_path, &workspace.transcript_path())?;
        fs::read_to_string(&script.output).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BridgeError::MalformedOutput {
                line: 0,
                message: "solver wrote no output file".to_string(),
            },
            _ => e.into(),
        })
    }

    fn run_in_workspace(
        &self,
        build: impl FnOnce(PathBuf) -> SessionScript,
    ) -> Result<String, BridgeError> {
        let workspace = Workspace::new(&self.config)?;
        let script = build(workspace.output_path());
        let result = self.run(&script, &workspace);
        workspace.finish();
        result
    }

    /// Completes `generators` to a Gröbner basis with the solver.
    ///
    /// The returned basis is registered in the basis-file cache.
    ///
    /// # Errors
    ///
    /// Rejects unsupported coefficients and foreign generators before
    /// spawning anything; otherwise reports process and output errors.
    pub fn compute_basis<F: Field>(
        &self,
        algebra: &FreeAlgebra<F>,
        generators: &[NcPoly<F>],
        degree_limit: Option<u32>,
    ) -> Result<GroebnerBasis<F>, BridgeError> {
        let characteristic = supported_characteristic(F::kind())?;
        if generators.iter().any(|g| g.algebra() != algebra) {
            return Err(GroebnerError::AlgebraMismatch.into());
        }

        let lines: Vec<String> = generators
            .iter()
            .filter(|g| !g.is_zero())
            .map(|g| element_line(&clear_denominators(g).0))
            .collect();
        if lines.is_empty() {
            return Ok(GroebnerBasis::empty(algebra).with_truncation(degree_limit));
        }

        info!(
            generators = lines.len(),
            limit = ?degree_limit,
            "computing basis with {}",
            self.config.executable.display()
        );
        let text = self.run_in_workspace(|output| SessionScript {
            characteristic,
            weights: algebra.weights().to_vec(),
            max_degree: degree_limit,
            variables: algebra.names().to_vec(),
            output,
            request: Request::Compute { generators: lines },
        })?;

        let elements = parse_basis_output(algebra, &text)?;
        let basis = GroebnerBasis::from_generators(algebra, elements)?.with_truncation(degree_limit);
        self.register_basis(&basis)?;
        debug!(size = basis.len(), "solver basis decoded");
        Ok(basis)
    }

    /// Normal forms of `elements` with respect to `basis`.
    ///
    /// Zero elements are not sent; their results are zero. The basis is
    /// read from the cache file, so it is never recomputed.
    ///
    /// # Errors
    ///
    /// As [`ExternalSolver::compute_basis`], plus
    /// [`BridgeError::ResultCountMismatch`] when the output does not
    /// answer every submitted element.
    pub fn normal_forms<F: Field>(
        &self,
        basis: &GroebnerBasis<F>,
        elements: &[NcPoly<F>],
    ) -> Result<Vec<NcPoly<F>>, BridgeError> {
        let characteristic = supported_characteristic(F::kind())?;
        let algebra = basis.algebra();
        if elements.iter().any(|e| e.algebra() != algebra) {
            return Err(GroebnerError::AlgebraMismatch.into());
        }
        if basis.is_empty() {
            return Ok(elements.iter().map(|e| e.clone().mark_reduced()).collect());
        }

        let submitted: Vec<(usize, NcPoly<F>, F)> = elements
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_zero())
            .map(|(i, e)| {
                let (scaled, scale) = clear_denominators(e);
                (i, scaled, scale)
            })
            .collect();
        let mut results: Vec<NcPoly<F>> = elements.iter().map(|_| algebra.zero()).collect();
        if submitted.is_empty() {
            return Ok(results);
        }

        let basis_file = self.register_basis(basis)?;
        info!(
            elements = submitted.len(),
            basis = basis.id(),
            "reducing with {}",
            self.config.executable.display()
        );
        let text = self.run_in_workspace(|output| SessionScript {
            characteristic,
            weights: algebra.weights().to_vec(),
            max_degree: basis.truncated_at(),
            variables: algebra.names().to_vec(),
            output,
            request: Request::NormalForms {
                basis_file,
                hseries_minima: 2 * basis.max_degree(),
                elements: submitted.iter().map(|(_, e, _)| element_line(e)).collect(),
            },
        })?;

        let decoded = parse_normal_form_output(algebra, &text)?;
        if decoded.len() != submitted.len() {
            return Err(BridgeError::ResultCountMismatch {
                expected: submitted.len(),
                found: decoded.len(),
            });
        }
        for ((i, _, scale), nf) in submitted.iter().zip(decoded) {
            let nf = match scale.inv() {
                Some(inv) if !scale.is_one() => nf.scale(&inv),
                _ => nf,
            };
            results[*i] = nf.mark_reduced();
        }
        Ok(results)
    }
}

impl<F: Field> BasisEngine<F> for ExternalSolver {
    fn name(&self) -> &'static str {
        "external"
    }

    fn complete(
        &self,
        algebra: &FreeAlgebra<F>,
        generators: &[NcPoly<F>],
        degree_limit: Option<u32>,
    ) -> Result<GroebnerBasis<F>, GroebnerError> {
        self.compute_basis(algebra, generators, degree_limit)
            .map_err(|e| match e {
                BridgeError::Groebner(inner) => inner,
                other => GroebnerError::engine("external", other),
            })
    }
}

#[cfg(all(test, unix))]
pub(crate) mod tests {
    use super::*;
    use ncalg_groebner::skew_polynomial_ring_relations;
    use ncalg_rings::{Ring, GF101, Q};
    use std::path::Path;

    /// Echoes generators back as the basis and every element back as its
    /// own normal form. Fails unless the basis file named in a
    /// normal-form script exists.
    pub(crate) const ECHO_SOLVER: &str = r#"
out=$(awk -F'"' '/^\(setoutput /{print $2}' "$1")
if grep -q '^(compute)$' "$1"; then
  awk '/^\(.*\);$/ { print substr($0, 2, length($0) - 3) "," }' "$1" > "$out"
else
  basis=$(awk -F'"' '/^\(readbasis /{print $2}' "$1")
  test -f "$basis" || exit 7
  awk '/^\(.*\);$/ { e = substr($0, 2, length($0) - 3); print e; print "is reduced to"; print e }' "$1" > "$out"
fi
"#;

    pub(crate) fn fake_config(dir: &Path, body: &str) -> BridgeConfig {
        let path = dir.join("solver.sh");
        fs::write(&path, body).unwrap();
        BridgeConfig::new("/bin/sh")
            .with_args([path.display().to_string()])
            .with_temp_root(dir)
    }

    fn xyz<F: Field>() -> FreeAlgebra<F> {
        FreeAlgebra::new(&["x", "y", "z"]).unwrap()
    }

    #[test]
    fn test_rejects_unsupported_coefficients() {
        let err = supported_characteristic(FieldKind::Other("Q(i)")).unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedCoefficients { .. }));
        assert_eq!(supported_characteristic(FieldKind::Prime(101)).unwrap(), 101);
        assert_eq!(supported_characteristic(FieldKind::Rational).unwrap(), 0);
    }

    #[test]
    fn test_compute_basis_round_trip() {
        let dir = TempDir::new().unwrap();
        let solver = ExternalSolver::new(fake_config(dir.path(), ECHO_SOLVER)).unwrap();
        let a = xyz::<Q>();
        let mut gens = skew_polynomial_ring_relations(&a, &Q::from_integer(-1));
        gens[0] = gens[0].scale(&Q::new(1, 2));

        let basis = solver.compute_basis(&a, &gens, Some(4)).unwrap();
        assert_eq!(basis.len(), 3);
        assert_eq!(basis.truncated_at(), Some(4));
        for g in &gens {
            assert_eq!(basis.get(g.leading_word().unwrap(), &()), Some(&g.make_monic()));
        }

        let cached = solver.cached_basis_file(basis.id()).unwrap();
        let contents = fs::read_to_string(cached).unwrap();
        assert_eq!(parse_basis_output(&a, &contents).unwrap().len(), 3);
    }

    #[test]
    fn test_normal_forms_reinsert_zeros_and_unscale() {
        let dir = TempDir::new().unwrap();
        let solver = ExternalSolver::new(fake_config(dir.path(), ECHO_SOLVER)).unwrap();
        let a = xyz::<Q>();
        let basis = GroebnerBasis::from_generators(&a, vec![a.parse("x*y + y*x").unwrap()]).unwrap();

        let elements = vec![a.parse("1/2*z*y - 1/3").unwrap(), a.zero(), a.parse("y").unwrap()];
        let results = solver.normal_forms(&basis, &elements).unwrap();
        assert_eq!(results, elements);
        assert!(results.iter().all(NcPoly::is_reduced));
        assert!(solver.cached_basis_file(basis.id()).is_some());
    }

    #[test]
    fn test_prime_field_sets_modulus() {
        let dir = TempDir::new().unwrap();
        let body = format!("grep -q '^(setmodulus 101)$' \"$1\" || exit 9\n{ECHO_SOLVER}");
        let solver = ExternalSolver::new(fake_config(dir.path(), &body)).unwrap();
        let a = xyz::<GF101>();
        let gens = vec![a.parse("2*y*x - x*y").unwrap()];
        let basis = solver.compute_basis(&a, &gens, None).unwrap();
        assert_eq!(basis.len(), 1);
        assert_eq!(basis.elements()[0].leading_coeff(), Some(&GF101::one()));
    }

    #[test]
    fn test_count_mismatch() {
        let dir = TempDir::new().unwrap();
        let body = r#"
out=$(awk -F'"' '/^\(setoutput /{print $2}' "$1")
printf 'x\nis reduced to\n0\n' > "$out"
"#;
        let solver = ExternalSolver::new(fake_config(dir.path(), body)).unwrap();
        let a = xyz::<Q>();
        let basis = GroebnerBasis::from_generators(&a, vec![a.parse("x*x").unwrap()]).unwrap();
        let err = solver
            .normal_forms(&basis, &[a.parse("x").unwrap(), a.parse("y").unwrap()])
            .unwrap_err();
        assert!(matches!(
            err,
            BridgeError::ResultCountMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_engine_failure_is_wrapped() {
        let dir = TempDir::new().unwrap();
        let solver = ExternalSolver::new(fake_config(dir.path(), "echo broken >&2\nexit 2\n")).unwrap();
        let a = xyz::<Q>();
        let err = BasisEngine::complete(&solver, &a, &[a.parse("x*y").unwrap()], None).unwrap_err();
        match err {
            GroebnerError::Engine { engine, source } => {
                assert_eq!(engine, "external");
                let bridge = source.downcast_ref::<BridgeError>().unwrap();
                assert!(matches!(bridge, BridgeError::SolverFailed { code: Some(2), .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_inputs_skip_the_solver() {
        let dir = TempDir::new().unwrap();
        // would fail if it were ever run
        let solver = ExternalSolver::new(fake_config(dir.path(), "exit 1\n")).unwrap();
        let a = xyz::<Q>();

        let basis = solver.compute_basis(&a, &[a.zero()], Some(3)).unwrap();
        assert!(basis.is_empty());

        let f = a.parse("x*y").unwrap();
        assert_eq!(solver.normal_forms(&basis, &[f.clone()]).unwrap(), vec![f]);

        let nonempty = GroebnerBasis::from_generators(&a, vec![a.parse("x").unwrap()]).unwrap();
        assert_eq!(solver.normal_forms(&nonempty, &[a.zero()]).unwrap(), vec![a.zero()]);
    }
}
