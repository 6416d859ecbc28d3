use crate::{PublicKey, Sha256, Utxo};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

/// A SHA-256 hash of the raw transaction data.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionId(Sha256);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// The index of the transaction output.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
pub struct OutputIndex(i32);

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OutputIndex {
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Returns the position in an output list, or None if the index can't address one,
    /// e.g. because it is negative.
    pub fn as_position(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    pub fn to_be_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    // 32 bytes. A pointer to the transaction containing the UTXO to be spent.
    utxo_id: TransactionId,
    // 4 bytes. The number of UTXO to be spent, the first one is 0.
    output_index: OutputIndex,
    // Signature over `Transaction::raw_data_to_sign` for this input's position.
    signature: Vec<u8>,
}

impl Display for TransactionInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.utxo_id, self.output_index)
    }
}

impl TransactionInput {
    /// Creates an unsigned input. The signature is attached once the payload is known.
    pub fn new(utxo_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            utxo_id,
            output_index,
            signature: vec![],
        }
    }

    pub fn with_signature(mut self, signature: Vec<u8>) -> Self {
        self.signature = signature;
        self
    }

    pub fn set_signature(&mut self, signature: Vec<u8>) {
        self.signature = signature;
    }

    pub fn utxo_id(&self) -> &TransactionId {
        &self.utxo_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The unspent output this input claims.
    pub fn utxo(&self) -> Utxo {
        Utxo::new(self.utxo_id, self.output_index)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    public_key: PublicKey,
    amount: i64,
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.amount, self.public_key)
    }
}

impl TransactionOutput {
    pub fn new(public_key: PublicKey, amount: i64) -> Self {
        Self { public_key, amount }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    fn write_bytes(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(&self.amount.to_be_bytes());
        data.extend_from_slice(self.public_key.as_bytes());
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl Transaction {
    /// Finalizes the transaction, i.e. its id is the hash of the raw transaction data,
    /// signatures included. Inputs must be signed before calling this.
    pub fn new(inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>) -> Self {
        let id = TransactionId::new(Sha256::digest(&Self::raw_data_of(&inputs, &outputs)));
        Self {
            id,
            inputs,
            outputs,
        }
    }

    /// Assembles a transaction whose id has been computed elsewhere.
    /// The id is taken as-is and never recomputed.
    pub fn from_raw_parts(
        id: TransactionId,
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
    ) -> Self {
        Self {
            id,
            inputs,
            outputs,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    /// Returns the bytes the owner of the output claimed by input at `index` must sign,
    /// or None if there is no such input.
    pub fn raw_data_to_sign(&self, index: usize) -> Option<Vec<u8>> {
        Self::signable_payload(&self.inputs, &self.outputs, index)
    }

    /// The payload signed for input at `index`: the claimed output identifier followed by
    /// every output of the transaction.
    /// Exposed over parts so that inputs can be signed before the transaction is finalized.
    pub fn signable_payload(
        inputs: &[TransactionInput],
        outputs: &[TransactionOutput],
        index: usize,
    ) -> Option<Vec<u8>> {
        let input = inputs.get(index)?;
        let mut data = Vec::with_capacity(36 + outputs.len() * 40);
        data.extend_from_slice(input.utxo_id.as_slice());
        data.extend_from_slice(&input.output_index.to_be_bytes());
        for output in outputs {
            output.write_bytes(&mut data);
        }
        Some(data)
    }

    /// Serializes all inputs, signatures included, followed by all outputs.
    pub fn raw_data(&self) -> Vec<u8> {
        Self::raw_data_of(&self.inputs, &self.outputs)
    }

    fn raw_data_of(inputs: &[TransactionInput], outputs: &[TransactionOutput]) -> Vec<u8> {
        let mut data = vec![];
        for input in inputs {
            data.extend_from_slice(input.utxo_id.as_slice());
            data.extend_from_slice(&input.output_index.to_be_bytes());
            data.extend_from_slice(&input.signature);
        }
        for output in outputs {
            output.write_bytes(&mut data);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use crate::{OutputIndex, PublicKey, Sha256, Transaction, TransactionId};
    use crate::{TransactionInput, TransactionOutput};

    fn input(seed: u8, index: i32) -> TransactionInput {
        TransactionInput::new(
            TransactionId::new(Sha256::from_raw([seed; 32])),
            OutputIndex::new(index),
        )
    }

    fn output(seed: u8, amount: i64) -> TransactionOutput {
        TransactionOutput::new(PublicKey::new([seed; 32]), amount)
    }

    #[test]
    fn signable_payload_layout() {
        let inputs = vec![input(1, 0), input(2, 3)];
        let outputs = vec![output(7, 10)];
        let payload = Transaction::signable_payload(&inputs, &outputs, 1).unwrap();

        let mut expected = vec![2; 32];
        expected.extend_from_slice(&[0, 0, 0, 3]);
        expected.extend_from_slice(&10i64.to_be_bytes());
        expected.extend_from_slice(&[7; 32]);
        assert_eq!(payload, expected);
    }

    #[test]
    fn signable_payload_differs_per_input() {
        let tx = Transaction::new(vec![input(1, 0), input(1, 1)], vec![output(7, 10)]);
        assert_ne!(tx.raw_data_to_sign(0), tx.raw_data_to_sign(1));
    }

    #[test]
    fn signable_payload_out_of_range_is_none() {
        let tx = Transaction::new(vec![input(1, 0)], vec![output(7, 10)]);
        assert_eq!(tx.raw_data_to_sign(1), None);
    }

    #[test]
    fn signable_payload_excludes_signatures() {
        let unsigned = Transaction::new(vec![input(1, 0)], vec![output(7, 10)]);
        let signed = Transaction::new(
            vec![input(1, 0).with_signature(vec![9; 64])],
            vec![output(7, 10)],
        );
        assert_eq!(unsigned.raw_data_to_sign(0), signed.raw_data_to_sign(0));
        assert_ne!(unsigned.id(), signed.id());
    }

    #[test]
    fn id_is_hash_of_raw_data() {
        let tx = Transaction::new(vec![input(1, 0)], vec![output(7, 10), output(8, 5)]);
        assert_eq!(
            *tx.id(),
            TransactionId::new(Sha256::digest(&tx.raw_data()))
        );
    }

    #[test]
    fn from_raw_parts_keeps_given_id() {
        let id = TransactionId::new(Sha256::from_raw([42; 32]));
        let tx = Transaction::from_raw_parts(id, vec![input(1, 0)], vec![output(7, 10)]);
        assert_eq!(*tx.id(), id);
    }

    #[test]
    fn negative_output_index_has_no_position() {
        assert_eq!(OutputIndex::new(-1).as_position(), None);
        assert_eq!(OutputIndex::new(2).as_position(), Some(2));
    }
}
