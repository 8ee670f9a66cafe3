//! Hierarchical chart of accounts: a forest of account trees keyed by
//! account number, where posting a transaction propagates the balance change
//! through every ancestor and voiding one reverses it exactly.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod worker;
