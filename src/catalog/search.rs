use crate::catalog::store::CatalogItem;

/// Case-insensitive substring match on `title`, always evaluated against
/// the full catalog passed in. An empty query yields every item in the
/// original order. Pure: equal inputs give identical, order-stable output.
pub fn filter_items(items: &[CatalogItem], query: &str) -> Vec<CatalogItem> {
    if query.is_empty() {
        return items.to_vec();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Sorted copy ordered by title, plain lexicographic comparison.
pub fn sort_by_title(items: &[CatalogItem]) -> Vec<CatalogItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.title.cmp(&b.title));
    sorted
}

/// Sorted copy ordered by year. Years are compared as strings, matching
/// the catalog wire format.
pub fn sort_by_year(items: &[CatalogItem]) -> Vec<CatalogItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.year.cmp(&b.year));
    sorted
}
