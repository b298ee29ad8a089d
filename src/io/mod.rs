// src/io/mod.rs

pub mod generate;
pub mod report;
