#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
pub mod macros;
pub mod commitment;
pub mod ff;
pub mod hashing_utils;
pub mod serde_utils;
pub mod solve_discrete_log;
