//! Integration Test Harness
//!
//! Runs every integration test category and prints a summary.
//!
//! # Usage
//!
//! Run all tests:
//! ```text
//! cargo run -p integration-tests
//! ```
//!
//! Run one category:
//! ```text
//! cargo test -p integration-tests --test tree_tests
//! cargo test -p integration-tests --test iterator_tests
//! cargo test -p integration-tests --test grammar_tests
//! cargo test -p integration-tests --test stress_tests
//! ```

use std::process::Command;
use std::time::{Duration, Instant};

/// Test category
#[derive(Debug, Clone)]
struct TestCategory {
    name: &'static str,
    description: &'static str,
    test_name: &'static str,
}

const TEST_CATEGORIES: &[TestCategory] = &[
    TestCategory {
        name: "Tree Tests",
        description: "Bind, resolve, unbind and destroy across nested contexts",
        test_name: "tree_tests",
    },
    TestCategory {
        name: "Iterator Tests",
        description: "Batched listing, snapshots and iterator lifecycle",
        test_name: "iterator_tests",
    },
    TestCategory {
        name: "Grammar Tests",
        description: "Stringified names, escaping and corbaname URLs",
        test_name: "grammar_tests",
    },
    TestCategory {
        name: "Stress Tests",
        description: "Many threads against one naming tree",
        test_name: "stress_tests",
    },
];

fn print_banner() {
    println!("{}", "=".repeat(80));
    println!("  Naming Service Integration Test Suite");
    println!("{}", "=".repeat(80));
}

fn print_test_categories() {
    println!("Test Categories:");
    println!("{}", "-".repeat(80));
    for (i, cat) in TEST_CATEGORIES.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, cat.name, cat.description);
    }
    println!("{}", "-".repeat(80));
    println!();
}

/// Run one category through `cargo test`, echoing its output
fn run_test_category(category: &TestCategory) -> (bool, Duration, String) {
    println!("\n--- {} ({}) ---", category.name, category.test_name);

    let start = Instant::now();
    let output = Command::new("cargo")
        .args(["test", "-p", "integration-tests", "--test", category.test_name])
        .output();
    let duration = start.elapsed();

    let output = match output {
        Ok(output) => output,
        Err(e) => return (false, duration, format!("could not start cargo: {}", e)),
    };
    print!("{}", String::from_utf8_lossy(&output.stdout));
    eprint!("{}", String::from_utf8_lossy(&output.stderr));

    let summary = match output.status.code() {
        Some(0) => "ok".to_string(),
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    };
    (output.status.success(), duration, summary)
}

fn main() {
    print_banner();
    print_test_categories();

    let total_start = Instant::now();
    let results: Vec<_> = TEST_CATEGORIES
        .iter()
        .map(|category| (category.name, run_test_category(category)))
        .collect();

    println!("\n{}", "=".repeat(80));
    println!("{:<20} {:<6} {:<15} {}", "Category", "Result", "Duration", "Details");
    println!("{}", "-".repeat(80));
    for (name, (success, duration, summary)) in &results {
        let status = if *success { "PASS" } else { "FAIL" };
        println!("{:<20} {:<6} {:<15?} {}", name, status, duration, summary);
    }
    println!("{}", "-".repeat(80));

    let failed = results.iter().filter(|(_, (success, _, _))| !success).count();
    println!(
        "{} categories, {} failed, {:?} total",
        results.len(),
        failed,
        total_start.elapsed()
    );
    if failed > 0 {
        std::process::exit(1);
    }
}
