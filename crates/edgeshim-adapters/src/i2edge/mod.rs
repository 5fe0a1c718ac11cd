//! i2Edge partner adapter

pub mod client;
pub mod common;
pub mod schemas;

pub use client::I2EdgeClient;
