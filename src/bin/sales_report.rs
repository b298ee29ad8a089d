// src/bin/sales_report.rs

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use conveyor::analysis::{SalesAnalyzer, SalesReader};
use conveyor::io::generate::generate_sales_data;
use conveyor::io::report::write_sales_data;
use conveyor::ConveyorError;

const DEFAULT_DATA_FILE: &str = "data/sales_data.csv";
const GENERATED_ROWS: usize = 200;

fn print_section(title: &str) {
    println!();
    println!("{}", "=".repeat(80));
    println!("{title}");
    println!("{}", "=".repeat(80));
}

fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

fn print_grouped(title: &str, data: &BTreeMap<String, f64>) {
    println!("\n{title}:");
    println!("{}", "-".repeat(80));
    for (key, value) in data {
        println!("  {key:30}: {:>15}", format_currency(*value));
    }
}

/// Uses the existing data file, or generates a synthetic one so the
/// report can always run.
fn ensure_data_file(path: &Path) -> Result<(), ConveyorError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    println!(
        "No data file at '{}'; generating {} synthetic transactions.",
        path.display(),
        GENERATED_ROWS
    );
    write_sales_data(path, &generate_sales_data(GENERATED_ROWS))
}

fn run(data_file: &Path) -> Result<(), ConveyorError> {
    ensure_data_file(data_file)?;

    let reader = SalesReader::from_path(data_file)?;
    let records = reader.read_all()?;
    let analyzer = SalesAnalyzer::new(&records);

    print_section("Sales Data Analysis");
    println!("\nAnalyzing data from: {}", data_file.display());

    print_section("Analysis 1: Total Revenue");
    let total_revenue = analyzer.total_revenue();
    println!("\nTotal Revenue: {}", format_currency(total_revenue));

    print_section("Analysis 2: Revenue by Product Category");
    print_grouped("Revenue by Category", &analyzer.revenue_by_category());

    print_section("Analysis 3: Revenue by Region");
    print_grouped("Revenue by Region", &analyzer.revenue_by_region());

    print_section("Analysis 4: Revenue by Customer Type");
    print_grouped(
        "Revenue by Customer Type",
        &analyzer.revenue_by_customer_type(),
    );

    print_section("Analysis 5: Top 5 Products by Revenue");
    println!("\nTop Products:");
    println!("{}", "-".repeat(80));
    for (rank, (product, revenue)) in analyzer.top_products_by_revenue(5).iter().enumerate() {
        println!(
            "  {}. {product:40}: {:>15}",
            rank + 1,
            format_currency(*revenue)
        );
    }

    print_section("Analysis 6: Average Revenue per Transaction");
    println!(
        "\nAverage Revenue per Transaction: {}",
        format_currency(analyzer.average_revenue_per_transaction())
    );

    print_section("Analysis 7: Sales by Month");
    print_grouped("Monthly Sales", &analyzer.revenue_by_month());

    print_section("Analysis 8: Products Grouped by Category");
    println!("\nProducts by Category:");
    println!("{}", "-".repeat(80));
    for (category, products) in analyzer.products_by_category() {
        println!("\n  {category}:");
        for product in products {
            println!("    - {product}");
        }
    }

    print_section("Analysis 9: High Value Transactions (>= $2,000)");
    let high_value = analyzer.high_value_transactions(2000.0);
    println!("\nNumber of High Value Transactions: {}", high_value.len());
    if !high_value.is_empty() {
        println!("\nHigh Value Transactions:");
        println!("{}", "-".repeat(80));
        for (i, transaction) in high_value.iter().take(10).enumerate() {
            println!(
                "  {}. {} | {:30} | {:>15}",
                i + 1,
                transaction.date,
                transaction.product,
                format_currency(transaction.total_revenue)
            );
        }
        if high_value.len() > 10 {
            println!("  ... and {} more transactions", high_value.len() - 10);
        }
    }

    print_section("Analysis 10: Revenue by Product and Region (Nested Grouping)");
    println!("\nRevenue by Product and Region:");
    println!("{}", "-".repeat(80));
    for (product, regions) in analyzer.revenue_by_product_and_region() {
        println!("\n  {product}:");
        for (region, revenue) in regions {
            println!("    {region:20}: {:>15}", format_currency(revenue));
        }
    }

    print_section("Analysis 11: Total Quantity Sold");
    println!(
        "\nTotal Quantity Sold: {} units",
        analyzer.total_quantity_sold()
    );

    print_section("Analysis 12: Average Quantity per Transaction");
    println!(
        "\nAverage Quantity per Transaction: {:.2} units",
        analyzer.average_quantity_per_transaction()
    );

    print_section("Analysis Summary");
    println!("\nAll analyses completed successfully!");
    println!("Total Records Analyzed: {}", analyzer.record_count());
    println!("Total Revenue: {}", format_currency(total_revenue));
    println!(
        "Number of Categories: {}",
        analyzer.revenue_by_category().len()
    );
    println!("Number of Regions: {}", analyzer.revenue_by_region().len());

    print_section("Analysis Complete");
    Ok(())
}

fn main() {
    // Optional override: `sales_report path/to/data.csv`
    let data_file = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    if let Err(e) = run(&data_file) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
