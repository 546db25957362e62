//! The basis-completion seam.

use ncalg_core::{FreeAlgebra, NcPoly};
use ncalg_rings::Field;

use crate::basis::GroebnerBasis;
use crate::error::GroebnerError;

/// Something that can complete a set of generators to a Gröbner basis.
///
/// Implemented in-process by [`LocalCompletion`](crate::LocalCompletion)
/// and by the external solver bridge.
pub trait BasisEngine<F: Field> {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Completes `generators` to a Gröbner basis of the two-sided ideal
    /// they generate, complete at least up to weighted degree
    /// `degree_limit` when one is given.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures through
    /// [`GroebnerError::Engine`].
    fn complete(
        &self,
        algebra: &FreeAlgebra<F>,
        generators: &[NcPoly<F>],
        degree_limit: Option<u32>,
    ) -> Result<GroebnerBasis<F>, GroebnerError>;
}
