// src/io/generate.rs

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Normal};

use crate::analysis::SalesRecord;

/// Product catalog for the synthetic data set: name, category, unit price.
const CATALOG: &[(&str, &str, f64)] = &[
    ("Laptop Pro", "Electronics", 1200.00),
    ("Monitor 27in", "Electronics", 300.00),
    ("Mechanical Keyboard", "Electronics", 90.00),
    ("Desk Chair", "Furniture", 150.00),
    ("Standing Desk", "Furniture", 450.00),
    ("Bookshelf", "Furniture", 120.00),
    ("Notebook Pack", "Office Supplies", 12.50),
    ("Pen Set", "Office Supplies", 8.00),
];

const REGIONS: &[&str] = &["North", "South", "East", "West"];
const CUSTOMER_TYPES: &[&str] = &["Business", "Consumer", "Government"];

/// Generates a synthetic sales data set of `rows` transactions.
///
/// Quantities are sampled from a Normal (Bell Curve) distribution so the
/// aggregations have realistic spread.
///
/// # Arguments
/// * `rows` - Number of transactions to generate.
pub fn generate_sales_data(rows: usize) -> Vec<SalesRecord> {
    let mut rng = thread_rng();
    // Mean order size of 10 units with some volatility.
    let quantity_dist = Normal::new(10.0, 4.0).expect("valid distribution parameters");

    let mut records = Vec::with_capacity(rows);

    for _ in 0..rows {
        let &(product, category, unit_price) = CATALOG
            .choose(&mut rng)
            .expect("catalog is non-empty");
        let region = REGIONS.choose(&mut rng).expect("regions are non-empty");
        let customer_type = CUSTOMER_TYPES
            .choose(&mut rng)
            .expect("customer types are non-empty");

        // Round the sample, clamp negatives to zero, and keep at least
        // one unit so every row is a real transaction.
        let sampled: f64 = quantity_dist.sample(&mut rng);
        let quantity = sampled.round().max(1.0) as u32;

        let month: u32 = rng.gen_range(1..=12);
        let day: u32 = rng.gen_range(1..=28);

        records.push(SalesRecord {
            date: format!("2024-{month:02}-{day:02}"),
            product: product.to_string(),
            category: category.to_string(),
            region: region.to_string(),
            customer_type: customer_type.to_string(),
            quantity,
            unit_price,
            total_revenue: f64::from(quantity) * unit_price,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_number_of_rows() {
        assert_eq!(generate_sales_data(0).len(), 0);
        assert_eq!(generate_sales_data(50).len(), 50);
    }

    #[test]
    fn rows_are_internally_consistent() {
        for record in generate_sales_data(100) {
            assert!(record.quantity >= 1);
            assert!(record.unit_price > 0.0);
            assert_eq!(
                record.total_revenue,
                f64::from(record.quantity) * record.unit_price
            );
            assert!(REGIONS.contains(&record.region.as_str()));
            assert!(CUSTOMER_TYPES.contains(&record.customer_type.as_str()));
            // Dates must parse into the monthly aggregation.
            assert!(record.date.starts_with("2024-"));
            assert_eq!(record.date.len(), 10);
        }
    }
}
