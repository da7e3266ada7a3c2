use quickfilter::QuickFilter;

#[test]
fn test_resize_shrink() {
    let mut filter = QuickFilter::new(128);
    filter.resize(64);
    filter.fill();
    assert_eq!(filter.cap(), 64);
    assert_eq!(filter.len(), 64);
}

#[test]
fn test_resize_grow() {
    let mut filter = QuickFilter::new(64);
    filter.resize(128);
    filter.fill();
    assert_eq!(filter.cap(), 128);
    assert_eq!(filter.len(), 128);
}

#[test]
fn test_resize_no_op() {
    let mut filter = QuickFilter::new(128);
    filter.add(50);
    filter.resize(128);
    assert_eq!(filter.cap(), 128);
    assert!(filter.has(50));

    filter.fill();
    assert_eq!(filter.len(), 128);
}

#[test]
fn test_resize_round_trip() {
    for k in [0, 1, 37, 64, 100, 127, 129, 200, 1000] {
        let mut filter = QuickFilter::new(128);
        filter.resize(k).resize(128).fill();
        assert_eq!(filter.cap(), 128, "via {k}");
        assert_eq!(filter.len(), 128, "via {k}");
    }
}

#[test]
fn test_resize_preserves_low_bits() {
    let mut filter = QuickFilter::new(200);
    filter.add(50).add(100).add(150).add(199);

    filter.resize(120);
    assert_eq!(filter.len(), 2);
    assert!(filter.has(50));
    assert!(filter.has(100));

    // Dropped bits do not reappear when growing again
    filter.resize(200);
    assert_eq!(filter.len(), 2);
    assert!(!filter.has(150));
    assert!(!filter.has(199));
}

#[test]
fn test_resize_shrink_within_word() {
    let mut filter = QuickFilter::new_filled(60);
    filter.resize(10);
    assert_eq!(filter.len(), 10);
    assert_eq!(filter.as_words(), [0x3ff]);

    filter.resize(60);
    assert_eq!(filter.len(), 10);
    assert!(filter.iter().eq(0..10));
}

#[test]
fn test_resize_to_zero() {
    let mut filter = QuickFilter::new_filled(300);
    filter.resize(0);
    assert_eq!(filter.len(), 0);
    assert!(filter.as_words().is_empty());
    assert!(filter.iter().is_done());
}

#[test]
fn test_resize_then_combine_grow() {
    let mut a = QuickFilter::new(60);
    let mut b = QuickFilter::new(128);

    a.resize(128);
    a.intersection_with(&b).unwrap();
    b.union_with(&a).unwrap();
    assert_eq!(a.cap(), 128);
    assert_eq!(b.cap(), 128);
}

#[test]
fn test_resize_then_combine_shrink() {
    let mut a = QuickFilter::new(128);
    let mut b = QuickFilter::new(60);

    a.resize(60);
    a.intersection_with(&b).unwrap();
    b.union_with(&a).unwrap();
    assert_eq!(a.cap(), 60);
    assert_eq!(b.cap(), 60);
}
