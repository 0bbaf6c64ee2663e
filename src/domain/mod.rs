//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `membership` - Plans, members and the subscription lifecycle
//! - `payment` - Ledger entries and gateway signature verification
//! - `access` - Operators, roles and the authorization table

pub mod access;
pub mod foundation;
pub mod membership;
pub mod payment;
