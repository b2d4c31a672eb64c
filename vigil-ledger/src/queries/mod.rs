//! SQL operations over the ledger schema.

pub mod run_ops;
