/// Contract violations reported by the windowing core.
///
/// These are programmer errors: callers are expected to validate indices before calling in.
/// Runtime conditions such as "the scroll target was never reached" are not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("invalid range: `to` ({to}) is less than `from` ({from})")]
    InvalidRange { from: usize, to: usize },
    #[error("scroll target index must be non-negative (got {index})")]
    InvalidArgument { index: i64 },
}
