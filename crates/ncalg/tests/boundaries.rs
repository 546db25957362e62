//! Degenerate inputs: zero elements, empty bases, empty matrices.

use ncalg::prelude::*;

fn xyz() -> FreeAlgebra<Q> {
    FreeAlgebra::new(&["x", "y", "z"]).unwrap()
}

#[test]
fn zero_reduces_to_zero() {
    let a = xyz();
    let basis = GroebnerBasis::from_generators(&a, [a.parse("x*y - y*x").unwrap()]).unwrap();
    let nf = normal_form(&a.zero(), &basis);
    assert!(nf.is_zero());
    assert!(nf.is_reduced());
}

#[test]
fn empty_basis_leaves_elements_alone() {
    let a = xyz();
    let basis = GroebnerBasis::empty(&a);
    let f = a.parse("x*y*z - 3*z^2 + 1").unwrap();
    assert_eq!(normal_form(&f, &basis), f);

    let q = QuotientAlgebra::new(basis);
    assert_eq!(q.hilbert_function(3), vec![1, 3, 9, 27]);
}

#[test]
fn ideal_of_zeros_has_empty_basis() {
    let a = xyz();
    let ideal = TwoSidedIdeal::new(&a, vec![a.zero(), a.zero()]).unwrap();
    assert!(ideal.generators().is_empty());
    let basis = ideal.groebner_basis(&LocalCompletion::default(), Some(3)).unwrap();
    assert!(basis.is_empty());
    assert!(!ideal.contains(&a.parse("x").unwrap(), &LocalCompletion::default(), None).unwrap());
}

#[test]
fn unit_ideal_collapses_everything() {
    let a = xyz();
    let ideal = TwoSidedIdeal::new(&a, vec![a.parse("x - 1").unwrap()]).unwrap();
    let q = ideal.quotient(&LocalCompletion::default(), Some(3)).unwrap();
    assert_eq!(q.element("x^3").unwrap(), a.one());
}

#[test]
fn local_reduction_engine_matches_normal_form() {
    let a = xyz();
    let basis = GroebnerBasis::from_generators(&a, [a.parse("z*y - x").unwrap()]).unwrap();
    let engine = ReductionEngine::local();
    let elements = vec![a.parse("z*y*z*y").unwrap(), a.zero()];
    let results = engine.normal_forms(&basis, &elements).unwrap();
    assert_eq!(results, vec![a.parse("x^2").unwrap(), a.zero()]);
}

#[test]
fn kernel_of_empty_matrix() {
    let a = xyz();
    let q = QuotientAlgebra::new(GroebnerBasis::empty(&a));
    let m = NcMatrix::zeros(&a, 0, 0);
    let kernel = right_kernel(&q, &m, 1, &KernelOptions::default()).unwrap();
    assert_eq!((kernel.num_rows(), kernel.num_cols()), (0, 0));
}

#[test]
fn mismatched_algebras_are_rejected() {
    let a = xyz();
    let b = xyz();
    assert!(matches!(
        TwoSidedIdeal::new(&a, vec![b.parse("x").unwrap()]),
        Err(GroebnerError::AlgebraMismatch)
    ));

    let q = QuotientAlgebra::new(GroebnerBasis::empty(&a));
    let m = NcMatrix::parse(&b, &[&["x"]]).unwrap();
    assert!(matches!(
        right_kernel(&q, &m, 0, &KernelOptions::default()),
        Err(MatrixError::AlgebraMismatch)
    ));
}

#[test]
fn sklyanin_needs_three_generators() {
    let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
    let one = Q::from_integer(1);
    assert!(matches!(
        sklyanin_relations(&a, &one, &one, &one),
        Err(GroebnerError::GeneratorCount { expected: 3, found: 2 })
    ));
}
