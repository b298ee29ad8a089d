// src/analysis/analyzer.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::record::SalesRecord;

/// Read-filter-map-reduce aggregations over a set of sales records.
///
/// Grouped results come back as `BTreeMap`s so the report prints in a
/// stable, sorted order every run.
pub struct SalesAnalyzer<'a> {
    records: &'a [SalesRecord],
}

impl<'a> SalesAnalyzer<'a> {
    pub fn new(records: &'a [SalesRecord]) -> Self {
        Self { records }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Sum of revenue across all transactions.
    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|r| r.total_revenue).sum()
    }

    fn revenue_grouped_by<F>(&self, key: F) -> BTreeMap<String, f64>
    where
        F: Fn(&SalesRecord) -> &str,
    {
        let mut grouped = BTreeMap::new();
        for record in self.records {
            *grouped.entry(key(record).to_string()).or_insert(0.0) += record.total_revenue;
        }
        grouped
    }

    pub fn revenue_by_category(&self) -> BTreeMap<String, f64> {
        self.revenue_grouped_by(|r| &r.category)
    }

    pub fn revenue_by_region(&self) -> BTreeMap<String, f64> {
        self.revenue_grouped_by(|r| &r.region)
    }

    pub fn revenue_by_customer_type(&self) -> BTreeMap<String, f64> {
        self.revenue_grouped_by(|r| &r.customer_type)
    }

    /// Top `n` products ranked by total revenue, highest first.
    pub fn top_products_by_revenue(&self, n: usize) -> Vec<(String, f64)> {
        let grouped = self.revenue_grouped_by(|r| &r.product);
        let mut ranked: Vec<(String, f64)> = grouped.into_iter().collect();
        // Descending by revenue; revenue is never NaN in well-formed data.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(n);
        ranked
    }

    pub fn average_revenue_per_transaction(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.total_revenue() / self.records.len() as f64
    }

    /// Revenue per month, keyed `YYYY-MM`. Records whose date is not in
    /// `YYYY-MM-DD` form are skipped rather than failing the analysis.
    pub fn revenue_by_month(&self) -> BTreeMap<String, f64> {
        let mut monthly = BTreeMap::new();
        for record in self.records {
            let Some(month) = month_key(&record.date) else {
                continue;
            };
            *monthly.entry(month.to_string()).or_insert(0.0) += record.total_revenue;
        }
        monthly
    }

    /// Unique products per category, sorted within each category.
    pub fn products_by_category(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for record in self.records {
            grouped
                .entry(record.category.clone())
                .or_default()
                .insert(record.product.clone());
        }
        grouped
            .into_iter()
            .map(|(category, products)| (category, products.into_iter().collect()))
            .collect()
    }

    /// Transactions whose revenue meets `threshold`.
    pub fn high_value_transactions(&self, threshold: f64) -> Vec<&SalesRecord> {
        self.records
            .iter()
            .filter(|r| r.total_revenue >= threshold)
            .collect()
    }

    /// Nested grouping: product -> region -> revenue.
    pub fn revenue_by_product_and_region(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        let mut grouped: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for record in self.records {
            *grouped
                .entry(record.product.clone())
                .or_default()
                .entry(record.region.clone())
                .or_insert(0.0) += record.total_revenue;
        }
        grouped
    }

    pub fn total_quantity_sold(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.quantity)).sum()
    }

    pub fn average_quantity_per_transaction(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.total_quantity_sold() as f64 / self.records.len() as f64
    }
}

/// `"2024-01-15"` -> `"2024-01"`; `None` when the date is malformed.
fn month_key(date: &str) -> Option<&str> {
    let month = date.get(..7)?;
    let mut parts = date.split('-');
    let year_ok = parts.next().is_some_and(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()));
    let month_ok = parts.next().is_some_and(|m| m.len() == 2 && m.chars().all(|c| c.is_ascii_digit()));
    let day_ok = parts.next().is_some_and(|d| d.len() == 2 && d.chars().all(|c| c.is_ascii_digit()));
    (year_ok && month_ok && day_ok && parts.next().is_none()).then_some(month)
}
