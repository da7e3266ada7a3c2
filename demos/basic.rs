//! Basic usage examples for `QuickFilter`

use quickfilter::{QuickFilter, QuickFilterError};

fn main() -> Result<(), QuickFilterError> {
    println!("=== QuickFilter Basic Usage ===\n");

    // Create an empty filter over 0..100
    let mut filter = QuickFilter::new(100);
    println!("Created filter with capacity {}", filter.cap());
    println!("Set indices: {}\n", filter.len());

    // Mark some indices
    filter.add(5).add(10).add(15).add(99);
    println!("Marked indices 5, 10, 15, 99");
    println!("Set indices: {}\n", filter.len());

    // Check individual indices
    println!("Checking individual indices:");
    for i in [0, 5, 10, 20, 99] {
        println!(
            "  Index {}: {}",
            i,
            if filter.has(i) { "set" } else { "unset" }
        );
    }

    // Out-of-range access is an error, not a silent no-op
    match filter.try_add(100) {
        Ok(_) => println!("\nunexpectedly accepted index 100"),
        Err(err) => println!("\nRejected: {err}"),
    }

    // Iterate over set indices
    print!("\nSet indices in order: ");
    for i in &filter {
        print!("{i} ");
    }
    println!("\n");

    // Resize keeps the low indices
    filter.resize(12);
    println!("After resize(12): {filter:?}");
    filter.resize(100);
    println!("After resize(100): {filter:?}\n");

    // Set algebra
    let evens = QuickFilter::from_fn(16, |i| i % 2 == 0);
    let threes = QuickFilter::from_fn(16, |i| i % 3 == 0);
    let mut combined = QuickFilter::new(16);

    combined.union_of(&evens, &threes)?;
    println!("evens | threes = {combined:?}");
    combined.intersection_of(&evens, &threes)?;
    println!("evens & threes = {combined:?}");
    println!("as bits:         {combined}");

    Ok(())
}
