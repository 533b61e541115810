#![cfg(test)]

pub mod common;
pub mod check_tests;
pub mod property_tests;
