use crate::{
    Ed25519Verifier, EpochPolicy, OutputIndex, SignatureVerifier, Transaction, TxHandlerConfig,
    Utxo, UtxoPool, ValidationError,
};
use std::collections::HashSet;
use tracing::debug;

/// Validates transactions against a UTXO pool and settles them in epochs.
///
/// The handler owns its pool: it copies the pool it is created from and never touches the
/// caller's instance again. Every validation reads the current state of that copy, and every
/// epoch mutates it in place, so consecutive epochs build on each other.
pub struct TxHandler<V = Ed25519Verifier> {
    utxo_pool: UtxoPool,
    verifier: V,
    config: TxHandlerConfig,
}

impl TxHandler<Ed25519Verifier> {
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self::with_config(utxo_pool, TxHandlerConfig::default())
    }

    pub fn with_config(utxo_pool: &UtxoPool, config: TxHandlerConfig) -> Self {
        Self::with_verifier(utxo_pool, Ed25519Verifier, config)
    }
}

impl<V: SignatureVerifier> TxHandler<V> {
    pub fn with_verifier(utxo_pool: &UtxoPool, verifier: V, config: TxHandlerConfig) -> Self {
        Self {
            utxo_pool: UtxoPool::copy_of(utxo_pool),
            verifier,
            config,
        }
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    pub fn into_utxo_pool(self) -> UtxoPool {
        self.utxo_pool
    }

    pub fn config(&self) -> &TxHandlerConfig {
        &self.config
    }

    pub fn is_valid(&self, transaction: &Transaction) -> bool {
        self.validate(transaction).is_ok()
    }

    /// A transaction is valid if:
    ///   1. All outputs claimed by its inputs are in the current UTXO pool.
    ///   2. The signature on each input verifies against the claimed output's public key.
    ///   3. No UTXO is claimed more than once.
    ///   4. For each input, the transaction's own output at the input's claimed output index
    ///      exists and is non-negative.
    ///   5. The sum of claimed output values is at least the sum of the transaction's outputs.
    /// Checks run input by input and stop at the first failure. The pool is never modified.
    pub fn validate(&self, transaction: &Transaction) -> Result<(), ValidationError> {
        let mut claimed_utxos = HashSet::with_capacity(transaction.inputs().len());
        let mut input_sum: i64 = 0;

        for (input_index, input) in transaction.inputs().iter().enumerate() {
            let utxo = input.utxo();

            if !self.utxo_pool.contains(&utxo) {
                return Err(ValidationError::UnknownInput {
                    input: input_index,
                    utxo,
                });
            }
            let spent_output = self.utxo_pool.lookup(&utxo);

            let signed = match transaction.raw_data_to_sign(input_index) {
                Some(message) => {
                    self.verifier
                        .verify(spent_output.public_key(), &message, input.signature())
                }
                None => false,
            };
            if !signed {
                return Err(ValidationError::BadSignature {
                    input: input_index,
                    utxo,
                });
            }

            if !claimed_utxos.insert(utxo) {
                return Err(ValidationError::DoubleSpend {
                    input: input_index,
                    utxo,
                });
            }

            // The amount is read from this transaction's outputs, not from the spent output.
            let declared_output = input
                .output_index()
                .as_position()
                .and_then(|position| transaction.outputs().get(position));
            match declared_output {
                Some(output) if output.amount() >= 0 => {}
                _ => {
                    return Err(ValidationError::NegativeOutput {
                        input: input_index,
                        output_index: *input.output_index(),
                    })
                }
            }

            input_sum = input_sum
                .checked_add(spent_output.amount())
                .ok_or(ValidationError::ValueOverflow)?;
        }

        let output_sum = transaction
            .outputs()
            .iter()
            .try_fold(0i64, |sum, output| sum.checked_add(output.amount()))
            .ok_or(ValidationError::ValueOverflow)?;

        if input_sum >= output_sum {
            Ok(())
        } else {
            Err(ValidationError::Insufficient {
                inputs: input_sum,
                outputs: output_sum,
            })
        }
    }

    /// Handles one epoch: every candidate is validated against the current pool, in the given
    /// order, exactly once.
    /// Returns the candidates selected by the configured `EpochPolicy`. Each selected
    /// transaction is committed before the next candidate is validated: its claimed UTXOs are
    /// removed from the pool and its outputs are added under its id.
    pub fn handle_txs(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        let policy = self.config.epoch_policy();
        let mut selected = vec![];

        for transaction in candidates {
            let validation = self.validate(transaction);
            if let Err(e) = &validation {
                debug!(transaction = %transaction.id(), error = %e, "Transaction is invalid");
            }

            let commit = match policy {
                EpochPolicy::CommitRejected => validation.is_err(),
                EpochPolicy::CommitAccepted => validation.is_ok(),
            };
            if commit {
                self.commit(transaction);
                selected.push(transaction.clone());
            }
        }

        debug!(
            ?policy,
            candidates = candidates.len(),
            selected = selected.len(),
            pool_size = self.utxo_pool.len(),
            "Epoch handled"
        );
        selected
    }

    fn commit(&mut self, transaction: &Transaction) {
        for input in transaction.inputs() {
            self.utxo_pool.remove(&input.utxo());
        }
        for (index, output) in transaction.outputs().iter().enumerate() {
            let utxo = Utxo::new(*transaction.id(), OutputIndex::new(index as i32));
            self.utxo_pool.insert(utxo, output.clone());
        }
    }
}
