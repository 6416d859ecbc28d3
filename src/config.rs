use serde::{Deserialize, Serialize};

/// Selects which transactions of an epoch are returned and committed to the pool.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum EpochPolicy {
    /// Transactions that fail validation are returned, their inputs are removed from the pool
    /// and their outputs are added to it. Valid transactions leave the pool untouched.
    CommitRejected,
    /// Valid transactions are returned and committed. Invalid ones leave the pool untouched.
    CommitAccepted,
}

impl Default for EpochPolicy {
    fn default() -> Self {
        EpochPolicy::CommitRejected
    }
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TxHandlerConfig {
    #[serde(default)]
    epoch_policy: EpochPolicy,
}

impl TxHandlerConfig {
    pub fn new(epoch_policy: EpochPolicy) -> Self {
        Self { epoch_policy }
    }

    pub fn epoch_policy(&self) -> EpochPolicy {
        self.epoch_policy
    }
}
