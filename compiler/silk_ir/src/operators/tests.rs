use super::*;

#[test]
fn binary_symbols_round_trip() {
    for op in BinaryOp::ALL {
        assert_eq!(BinaryOp::from_symbol(op.as_symbol()), Some(op));
    }
}

#[test]
fn comparison_symbols_round_trip() {
    for op in ComparisonOp::ALL {
        assert_eq!(ComparisonOp::from_symbol(op.as_symbol()), Some(op));
    }
}

#[test]
fn unknown_symbols_are_rejected() {
    assert_eq!(BinaryOp::from_symbol("%"), None);
    assert_eq!(BinaryOp::from_symbol(""), None);
    assert_eq!(BinaryOp::from_symbol(">"), None);
    assert_eq!(ComparisonOp::from_symbol(">="), None);
    assert_eq!(ComparisonOp::from_symbol("+"), None);
}

#[test]
fn comparison_semantics() {
    assert!(ComparisonOp::Gt.compare(2.0, 1.0));
    assert!(!ComparisonOp::Gt.compare(1.0, 1.0));
    assert!(ComparisonOp::Lt.compare(-1.0, 0.0));
    assert!(ComparisonOp::Eq.compare(0.5, 0.5));
    assert!(!ComparisonOp::Eq.compare(f64::NAN, f64::NAN));
}
