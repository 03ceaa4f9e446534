//! Common building blocks shared across the type modules

pub mod errors;
