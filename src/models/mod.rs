//! Data models for accounts and credentials.
//!
//! This module contains the types shared between the API client and the
//! session manager:
//!
//! - `User`: the server-sourced identity record
//! - `TokenPair`: the access/refresh credential pair
//! - `RegisterRequest`: the account-creation request body

pub mod token;
pub mod user;

pub use token::TokenPair;
pub use user::{RegisterRequest, User};
