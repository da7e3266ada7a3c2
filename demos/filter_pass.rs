//! Repeated filter passes over one array, reusing a single `QuickFilter`.

use quickfilter::{QuickFilter, QuickFilterError};

#[derive(Debug)]
struct Order {
    id: u32,
    total_cents: u64,
    shipped: bool,
}

fn main() -> Result<(), QuickFilterError> {
    let orders: Vec<Order> = (0..40)
        .map(|id| Order {
            id,
            total_cents: u64::from(id * 7919 % 10_000),
            shipped: id % 3 != 0,
        })
        .collect();

    // Pass 1: large orders
    let mut large = QuickFilter::from_slice(&orders, |o| o.total_cents >= 5_000);
    println!("{} of {} orders are large", large.len(), orders.len());

    // Pass 2: unshipped orders, marked one index at a time
    let mut unshipped = QuickFilter::new(orders.len());
    for (i, order) in orders.iter().enumerate() {
        if !order.shipped {
            unshipped.add(i);
        }
    }

    // Combine the passes in place
    large.intersection_with(&unshipped)?;
    println!("{} large orders are waiting to ship:", large.len());
    let mut it = large.iter();
    while !it.is_done() {
        let order = &orders[it.value()];
        println!("  #{:>2}  {:>5} cents", order.id, order.total_cents);
        it.advance();
    }

    // Reuse the same filter for an unrelated pass
    large.clear();
    for (i, order) in orders.iter().enumerate() {
        if order.id % 10 == 0 {
            large.add(i);
        }
    }
    let ids: Vec<u32> = large.select(&orders).map(|o| o.id).collect();
    println!("every tenth order: {ids:?}");

    Ok(())
}
