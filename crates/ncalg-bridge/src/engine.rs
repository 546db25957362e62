//! Dispatch between local and offloaded normal forms.

use ncalg_core::NcPoly;
use ncalg_groebner::{normal_form, GroebnerBasis};
use ncalg_rings::Field;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BridgeError;
use crate::solver::ExternalSolver;

/// When a batch is large enough to send to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionThresholds {
    /// Offload when some element has a higher weighted degree.
    pub max_degree: u32,
    /// Offload when the batch has more terms in total.
    pub max_term_count: usize,
}

impl Default for ReductionThresholds {
    fn default() -> Self {
        Self {
            max_degree: 12,
            max_term_count: 40,
        }
    }
}

impl ReductionThresholds {
    /// Set the degree threshold
    #[must_use]
    pub fn with_max_degree(mut self, max_degree: u32) -> Self {
        self.max_degree = max_degree;
        self
    }

    /// Set the term-count threshold
    #[must_use]
    pub fn with_max_term_count(mut self, max_term_count: usize) -> Self {
        self.max_term_count = max_term_count;
        self
    }

    /// Returns true if the batch exceeds either threshold.
    #[must_use]
    pub fn exceeded_by<F: Field>(&self, elements: &[NcPoly<F>]) -> bool {
        let terms: usize = elements.iter().map(NcPoly::len).sum();
        terms > self.max_term_count || elements.iter().any(|e| e.degree() > self.max_degree)
    }
}

/// Computes normal forms locally, or with the external solver once a
/// batch crosses the thresholds.
///
/// Without a solver every batch is reduced locally. Solver errors are
/// returned as they are; there is no local fallback.
#[derive(Debug, Default)]
pub struct ReductionEngine {
    thresholds: ReductionThresholds,
    solver: Option<ExternalSolver>,
}

impl ReductionEngine {
    /// An engine that never offloads.
    #[must_use]
    pub fn local() -> Self {
        Self::default()
    }

    /// An engine that offloads large batches to `solver`.
    #[must_use]
    pub fn with_solver(solver: ExternalSolver) -> Self {
        Self {
            thresholds: ReductionThresholds::default(),
            solver: Some(solver),
        }
    }

    /// Set the thresholds
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ReductionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// The thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &ReductionThresholds {
        &self.thresholds
    }

    /// The solver, if one is attached.
    #[must_use]
    pub fn solver(&self) -> Option<&ExternalSolver> {
        self.solver.as_ref()
    }

    /// Returns true if this batch would go to the solver.
    #[must_use]
    pub fn should_offload<F: Field>(&self, elements: &[NcPoly<F>]) -> bool {
        self.solver.is_some() && self.thresholds.exceeded_by(elements)
    }

    /// Normal forms of a batch.
    ///
    /// # Errors
    ///
    /// Only offloaded batches can fail; see
    /// [`ExternalSolver::normal_forms`].
    pub fn normal_forms<F: Field>(
        &self,
        basis: &GroebnerBasis<F>,
        elements: &[NcPoly<F>],
    ) -> Result<Vec<NcPoly<F>>, BridgeError> {
        match &self.solver {
            Some(solver) if self.thresholds.exceeded_by(elements) => {
                debug!(elements = elements.len(), "offloading normal forms");
                solver.normal_forms(basis, elements)
            }
            _ => Ok(elements.iter().map(|e| normal_form(e, basis)).collect()),
        }
    }

    /// Normal form of a single element.
    ///
    /// # Errors
    ///
    /// See [`ReductionEngine::normal_forms`].
    pub fn normal_form<F: Field>(
        &self,
        basis: &GroebnerBasis<F>,
        f: &NcPoly<F>,
    ) -> Result<NcPoly<F>, BridgeError> {
        let mut results = self.normal_forms(basis, std::slice::from_ref(f))?;
        Ok(results.pop().unwrap_or_else(|| basis.algebra().zero()))
    }
}
