/// Creates a [`QuickFilter`](crate::QuickFilter) with the given capacity and
/// set indices.
///
/// # Panics
///
/// Panics if any listed index is not below the capacity.
///
/// # Examples
///
/// ```
/// use quickfilter::quickfilter;
///
/// let empty = quickfilter![16];
/// assert_eq!(empty.cap(), 16);
/// assert!(empty.is_empty());
///
/// let filter = quickfilter![16; 1, 4, 9];
/// assert_eq!(filter.len(), 3);
/// assert!(filter.has(9));
/// ```
#[macro_export]
macro_rules! quickfilter {
    ($cap:expr $(;)?) => {
        $crate::QuickFilter::new($cap)
    };
    ($cap:expr; $($idx:expr),* $(,)?) => {{
        let mut filter = $crate::QuickFilter::new($cap);
        $(filter.add($idx);)*
        filter
    }};
}
