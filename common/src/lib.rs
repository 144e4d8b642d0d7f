#![no_std]

pub mod escrow;
pub mod registry;
pub mod storage;
