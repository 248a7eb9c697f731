pub mod cipher;
pub mod config;
pub mod corpus;
pub mod error;
pub mod key;
pub mod model;
pub mod optimizer;
pub mod scorer;
pub mod stats;
// cmd and reports are binary modules (see main.rs); they own all user-facing I/O.
