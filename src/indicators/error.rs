use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: need more than {required} prices, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("period must be positive")]
    InvalidPeriod,

    #[error("non-finite price at index {index}")]
    NonFinitePrice { index: usize },
}
