// src/model/mod.rs

pub mod container;

pub use container::{Container, ItemStore};
