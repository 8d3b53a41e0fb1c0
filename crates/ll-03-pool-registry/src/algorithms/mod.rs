//! # Algorithms Module
//!
//! Swap math for reserve pools.

pub mod constant_product;

pub use constant_product::{apply_swap_to_reserves, constant_product_k, get_amount_out, swap_fee};
