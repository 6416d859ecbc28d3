use crate::{OutputIndex, Utxo};
use thiserror::Error;

/// The reason a transaction failed validation against the UTXO pool.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ValidationError {
    #[error("input {input} claims UTXO {utxo} which is not in the pool")]
    UnknownInput { input: usize, utxo: Utxo },

    #[error("input {input} has an invalid signature for UTXO {utxo}")]
    BadSignature { input: usize, utxo: Utxo },

    #[error("input {input} claims UTXO {utxo} which is already claimed by this transaction")]
    DoubleSpend { input: usize, utxo: Utxo },

    /// The output at the input's claimed index is negative or doesn't exist.
    #[error("input {input}: output at index {output_index} is negative or missing")]
    NegativeOutput {
        input: usize,
        output_index: OutputIndex,
    },

    #[error("insufficient input value: have {inputs}, outputs need {outputs}")]
    Insufficient { inputs: i64, outputs: i64 },

    #[error("transaction value sum overflows")]
    ValueOverflow,
}
