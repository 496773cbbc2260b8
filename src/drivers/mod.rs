// src/drivers/mod.rs
// Shipped ContextDriver implementations.

pub mod headless;

pub use headless::HeadlessDriver;
