use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("unsupported field kind: {kind}")]
    UnsupportedKind { kind: &'static str },
    #[error("invalid target, expected a struct, got {kind}")]
    InvalidTarget { kind: &'static str },
    #[error("truncated input, needed {needed} bytes but only {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    #[error("sequence of {len} elements exceeds the limit of {max}")]
    SequenceTooLong { len: usize, max: usize },
    #[error("records nested deeper than the limit of {max}")]
    DepthLimitExceeded { max: usize },
    #[error("{remaining} trailing bytes left after decoding")]
    TrailingBytes { remaining: usize },
}
