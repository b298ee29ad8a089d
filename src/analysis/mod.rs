// src/analysis/mod.rs

pub mod analyzer;
pub mod reader;
pub mod record;

pub use analyzer::SalesAnalyzer;
pub use reader::SalesReader;
pub use record::SalesRecord;
