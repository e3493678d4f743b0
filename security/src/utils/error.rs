use core::fmt;

/// This is an error that could occur while evaluating curve parameters.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SecurityError {
    /// The field order and the subgroup order share a common factor.
    NotCoprime,
    /// The subgroup order is smaller than 2.
    InvalidSubgroupOrder,
    /// The curve order (or the derived twist order) is not an integer larger than 1.
    InvalidCurveOrder,
    /// An extension modulus was not monic, or had degree 0.
    InvalidModulus,
    /// An extension modulus was reducible over its coefficient field.
    ReducibleModulus,
    /// The curve polynomial is not a cubic.
    InvalidCurve,
    /// Two objects that should live over the same field do not.
    FieldMismatch,
    /// A polynomial that must have a root in a field has none.
    NoRootFound,
    /// The field is too large to enumerate its points.
    FieldTooLarge,
    /// The operation is not defined in characteristic 2.
    UnsupportedCharacteristic,
    /// During a computation, we divided by zero.
    DivisionByZero,
}

impl ark_std::error::Error for SecurityError {}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            SecurityError::NotCoprime => write!(f, "field order and subgroup order are not coprime"),
            SecurityError::InvalidSubgroupOrder => write!(f, "subgroup order must be at least 2"),
            SecurityError::InvalidCurveOrder => write!(f, "curve or twist order is not larger than 1"),
            SecurityError::InvalidModulus => write!(f, "extension modulus must be monic of positive degree"),
            SecurityError::ReducibleModulus => write!(f, "extension modulus is reducible"),
            SecurityError::InvalidCurve => write!(f, "curve polynomial must be a cubic"),
            SecurityError::FieldMismatch => write!(f, "operands are defined over different fields"),
            SecurityError::NoRootFound => write!(f, "polynomial has no root in the field"),
            SecurityError::FieldTooLarge => write!(f, "field is too large for point enumeration"),
            SecurityError::UnsupportedCharacteristic => {
                write!(f, "operation is not supported in characteristic 2")
            },
            SecurityError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}
