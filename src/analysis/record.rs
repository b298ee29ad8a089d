// src/analysis/record.rs

use serde::{Deserialize, Serialize};

/// One sales transaction, matching the CSV header of the sales data set
/// (`Date,Product,Category,Region,Customer_Type,Quantity,Unit_Price,Total_Revenue`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Customer_Type")]
    pub customer_type: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Unit_Price")]
    pub unit_price: f64,
    #[serde(rename = "Total_Revenue")]
    pub total_revenue: f64,
}
