//! HTTP handlers

pub mod health;
pub mod pages;

pub use health::health;
