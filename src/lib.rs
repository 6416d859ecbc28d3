pub mod config;
pub mod hash;
pub mod public_key;
pub mod signature;
pub mod transaction;
pub mod tx_handler;
pub mod utxo;
pub mod utxo_pool;
pub mod validation_error;

pub use self::{
    config::*, hash::*, public_key::*, signature::*, transaction::*, tx_handler::*, utxo::*,
    utxo_pool::*, validation_error::*,
};
