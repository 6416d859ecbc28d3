use crate::{TransactionOutput, Utxo};
use std::collections::HashMap;

/// A pool of confirmed and unspent transaction outputs.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct UtxoPool {
    // Unspent transaction outputs, indexed by their transaction ID and their index in the
    // transaction.
    utxos: HashMap<Utxo, TransactionOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Creates an independent pool holding the same outputs as `other`.
    pub fn copy_of(other: &UtxoPool) -> Self {
        other.clone()
    }

    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.utxos.contains_key(utxo)
    }

    pub fn get(&self, utxo: &Utxo) -> Option<&TransactionOutput> {
        self.utxos.get(utxo)
    }

    /// Returns the output for `utxo`.
    ///
    /// # Panics
    /// If the pool doesn't contain `utxo`. Use `get` unless membership has been checked.
    pub fn lookup(&self, utxo: &Utxo) -> &TransactionOutput {
        match self.utxos.get(utxo) {
            Some(output) => output,
            None => panic!("UTXO: {} is not in the pool", utxo),
        }
    }

    /// Adds the output, overwriting any output previously stored under `utxo`.
    pub fn insert(&mut self, utxo: Utxo, output: TransactionOutput) {
        self.utxos.insert(utxo, output);
    }

    /// Removes the output if present.
    pub fn remove(&mut self, utxo: &Utxo) {
        self.utxos.remove(utxo);
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// All unspent outputs in the pool, sorted.
    pub fn all_utxos(&self) -> Vec<Utxo> {
        let mut utxos = self.utxos.keys().copied().collect::<Vec<Utxo>>();
        utxos.sort();
        utxos
    }
}

#[cfg(test)]
mod tests {
    use crate::{OutputIndex, PublicKey, Sha256, TransactionId, TransactionOutput, Utxo, UtxoPool};

    fn utxo(seed: u8, index: i32) -> Utxo {
        Utxo::new(
            TransactionId::new(Sha256::from_raw([seed; 32])),
            OutputIndex::new(index),
        )
    }

    fn output(amount: i64) -> TransactionOutput {
        TransactionOutput::new(PublicKey::new([1; 32]), amount)
    }

    #[test]
    fn insert_lookup_remove() {
        let mut pool = UtxoPool::new();
        assert!(pool.is_empty());

        pool.insert(utxo(1, 0), output(10));
        assert!(pool.contains(&utxo(1, 0)));
        assert!(!pool.contains(&utxo(1, 1)));
        assert_eq!(pool.lookup(&utxo(1, 0)).amount(), 10);
        assert_eq!(pool.get(&utxo(1, 1)), None);

        pool.remove(&utxo(1, 0));
        assert!(!pool.contains(&utxo(1, 0)));
        assert!(pool.is_empty());
    }

    #[test]
    fn insert_overwrites() {
        let mut pool = UtxoPool::new();
        pool.insert(utxo(1, 0), output(10));
        pool.insert(utxo(1, 0), output(25));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.lookup(&utxo(1, 0)).amount(), 25);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut pool = UtxoPool::new();
        pool.insert(utxo(1, 0), output(10));
        pool.remove(&utxo(2, 0));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    #[should_panic(expected = "is not in the pool")]
    fn lookup_absent_panics() {
        UtxoPool::new().lookup(&utxo(1, 0));
    }

    #[test]
    fn copy_is_independent() {
        let mut original = UtxoPool::new();
        original.insert(utxo(1, 0), output(10));

        let mut copy = UtxoPool::copy_of(&original);
        copy.remove(&utxo(1, 0));
        copy.insert(utxo(2, 0), output(5));

        assert!(original.contains(&utxo(1, 0)));
        assert!(!original.contains(&utxo(2, 0)));
        assert_eq!(original.len(), 1);
        assert_eq!(copy.all_utxos(), vec![utxo(2, 0)]);
    }

    #[test]
    fn all_utxos_sorted() {
        let mut pool = UtxoPool::new();
        pool.insert(utxo(3, 0), output(1));
        pool.insert(utxo(1, 1), output(1));
        pool.insert(utxo(1, 0), output(1));
        assert_eq!(pool.all_utxos(), vec![utxo(1, 0), utxo(1, 1), utxo(3, 0)]);
    }
}
