// src/main.rs

use std::time::Duration;

use conveyor::io::report;
use conveyor::sim::{PipelineRun, SimulationConfig};

fn print_banner(title: &str) {
    println!("{}", "=".repeat(80));
    println!("{title}");
    println!("{}", "=".repeat(80));
}

fn main() {
    print_banner("Producer-Consumer Pattern Demonstration");
    println!();

    // 1. SETUP CONFIGURATION
    let config = SimulationConfig {
        queue_capacity: 5,
        item_count: 20,
        production_delay: Duration::from_millis(100),
        consumption_delay: Duration::from_millis(150),
        ..SimulationConfig::default()
    };

    // 2. BUILD THE PIPELINE
    // Source seeded with Item-1..=20, empty destination, shared queue.
    let run = match PipelineRun::new(config.clone()) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Failed to build pipeline: {e}");
            std::process::exit(1);
        }
    };
    println!(
        "Initialized source container with {} items",
        run.source().len()
    );
    println!("Source items: {:?}", run.source().snapshot());
    println!("Initialized destination container (empty)");
    println!(
        "Created shared blocking queue with capacity: {}",
        run.queue().capacity()
    );
    println!(
        "Production delay: {:?}, consumption delay: {:?}",
        config.production_delay, config.consumption_delay
    );
    println!();

    // 3. RUN SIMULATION
    // The consumer starts first to exercise empty-queue blocking; the
    // driver joins the producer, lets the queue drain, then stops the
    // consumer.
    print_banner("Starting Producer-Consumer Simulation");
    let report = match run.run() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            std::process::exit(1);
        }
    };
    println!();

    // 4. DISPLAY RESULTS
    print_banner("Simulation Results");
    println!("Source container status: {}", run.source());
    println!("Source remaining items: {:?}", run.source().snapshot());
    println!("Destination container status: {}", run.destination());
    println!("Destination items: {:?}", run.destination().snapshot());
    println!("Shared queue status:");
    println!("  - Current size: {}", run.queue().len());
    println!("  - Is empty: {}", run.queue().is_empty());
    println!("  - Is full: {}", run.queue().is_full());
    println!("Producer statistics: {} items produced", report.produced);
    println!("Consumer statistics: {} items consumed", report.consumed);
    println!();

    // 5. EXPORT RUN LOG
    let output_file = "run_log.csv";
    match report::write_run_log(output_file, &report.workers) {
        Ok(_) => println!("Success! Run log written to ./{output_file}"),
        Err(e) => eprintln!("Error writing CSV: {e}"),
    }
    println!();

    // 6. DATA INTEGRITY VERIFICATION
    print_banner("Data Integrity Verification");
    println!("Total items initially: {}", report.seeded);
    println!("Items produced: {}", report.produced);
    println!("Items consumed: {}", report.consumed);
    println!("Items in destination: {}", report.sink_total);
    println!("Items remaining in source: {}", report.source_remaining);
    println!("Items in queue: {}", report.queue_remaining);
    println!();

    if report.is_conserved() {
        println!("SUCCESS: All items are accounted for. Data integrity maintained.");
    } else {
        // A mismatch would mean an item was lost or duplicated in
        // flight: a logic defect, never expected behavior.
        println!(
            "WARNING: Item count mismatch. Expected {}, accounted for {}",
            report.seeded,
            report.accounted()
        );
    }

    println!();
    print_banner("Simulation Complete");
}
