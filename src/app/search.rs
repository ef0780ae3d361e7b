//! Route search.
//!
//! A stable, case-insensitive substring filter over route number and name.
//! There is no ranking: matches keep catalog order.

use crate::domain::Route;

/// Filters `routes` by `query`.
///
/// # Filtering Algorithm
///
/// 1. **Trim**: Surrounding whitespace is ignored
/// 2. **Blank Query**: Returns the input unchanged
/// 3. **Lowercase**: Query and fields are lowercased with Unicode rules
/// 4. **Match**: A route matches if `route_number` or `name` contains the query
///
/// # Example
///
/// ```rust
/// use slavgorod_bus::{app::search::filter, Route};
///
/// let routes = vec![
///     Route::new("102", "102", "Славгород - Яровое", ""),
///     Route::new("1", "1", "Вокзал - Больница", ""),
/// ];
///
/// assert_eq!(filter(&routes, "ЯРОВ").len(), 1);
/// assert_eq!(filter(&routes, "  ").len(), 2);
/// assert!(filter(&routes, "xyz").is_empty());
/// ```
#[must_use]
pub fn filter(routes: &[Route], query: &str) -> Vec<Route> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return routes.to_vec();
    }

    let needle = trimmed.to_lowercase();
    let matched: Vec<Route> = routes
        .iter()
        .filter(|route| route.matches_lowercase(&needle))
        .cloned()
        .collect();

    tracing::trace!(
        total_routes = routes.len(),
        matched = matched.len(),
        "route filter applied"
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn routes() -> Vec<Route> {
        vec![
            Route::new("102", "102", "Славгород - Яровое", ""),
            Route::new("1", "1", "Вокзал - Больница", ""),
            Route::new("10", "10", "Рынок - Вокзал", ""),
        ]
    }

    fn ids(routes: &[Route]) -> Vec<&str> {
        routes.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn matches_number_or_name_in_catalog_order() {
        assert_eq!(ids(&filter(&routes(), "10")), vec!["102", "10"]);
        assert_eq!(ids(&filter(&routes(), "вокзал")), vec!["1", "10"]);
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        assert_eq!(ids(&filter(&routes(), " 102 ")), vec!["102"]);
    }

    #[test]
    fn description_is_not_searched() {
        let mut route = Route::new("5", "5", "Центр", "");
        route.description = "через Яровое".to_string();
        assert!(filter(&[route], "яровое").is_empty());
    }

    fn arb_route() -> impl Strategy<Value = Route> {
        ("[0-9]{1,3}", "[a-zA-Zа-яА-Я -]{0,12}").prop_map(|(number, name)| {
            Route::new(number.clone(), number, name, "")
        })
    }

    proptest! {
        #[test]
        fn filter_is_idempotent(routes in prop::collection::vec(arb_route(), 0..12), query in "[a-zA-Zа-я0-9 ]{0,4}") {
            let once = filter(&routes, &query);
            let twice = filter(&once, &query);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn filter_is_an_order_preserving_subsequence(routes in prop::collection::vec(arb_route(), 0..12), query in "[a-zA-Zа-я0-9 ]{0,4}") {
            let filtered = filter(&routes, &query);
            let mut source = routes.iter();
            for kept in &filtered {
                prop_assert!(source.any(|r| r == kept));
            }
        }

        #[test]
        fn blank_query_is_identity(routes in prop::collection::vec(arb_route(), 0..12), blank in "[ \t]{0,3}") {
            prop_assert_eq!(filter(&routes, &blank), routes);
        }
    }
}
