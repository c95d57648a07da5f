use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("label sequence length {got} does not match route length {expected}")]
    LabelLengthMismatch {
        expected: usize,
        got:      usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
