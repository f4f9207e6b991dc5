//! # Library providing the construction and verification of the transactions
//! of a two-party DLC from the messages exchanged during its negotiation.

#![crate_name = "dlc_manager"]
// Coding conventions
#![forbid(unsafe_code)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(dead_code)]
#![deny(unused_imports)]
#![deny(missing_docs)]

extern crate bitcoin;
extern crate dlc;
extern crate dlc_messages;
extern crate log;
extern crate secp256k1_zkp;

pub mod error;
mod signature_verifier;
pub mod tx_builder;

pub use error::Error;
pub use tx_builder::{DlcTxBuilder, Party};
