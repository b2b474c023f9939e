//! Value Object Module

pub mod condition;
