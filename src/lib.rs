//! Memberdesk - membership back office.
//!
//! Keeps a catalogue of plans, the members subscribed to them, and the
//! ledger of payments that renew those subscriptions. A periodic reconciler
//! expires members whose window has lapsed; operators reach all of it
//! through a role-checked HTTP API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
