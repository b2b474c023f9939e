//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, verify-only comparison)
//! - Bearer-token mint/verify (HS256 JWT with typed claims)
//! - Authorization middleware and identity extractor
//! - Random code/name generation
//! - Upload content-type validation
//! - Blob storage (filesystem-backed)
//! - Email delivery abstraction

pub mod bearer;
pub mod blob;
pub mod crypto;
pub mod email;
pub mod password;
pub mod token;
pub mod upload;
