//! Storage layer
//!
//! SQLite (embedded) is the durable store. The in-memory store from
//! `roster-core` can stand in for it when persistence is not wanted.

pub mod db;

pub use db::Database;
