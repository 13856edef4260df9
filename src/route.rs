//! In-app navigation targets
//!
//! Paths mirror the storefront's public URLs: `/products/{category}` for
//! catalog sections and `/products/{id}` for a single product.

use std::fmt;

use crate::state::data::Category;

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Catalog(Category),
    Product(String),
}

impl Route {
    /// Parse a storefront path; unknown paths yield `None`
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Home);
        }

        let mut segments = trimmed.trim_start_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some("products"), None, None) => Some(Route::Catalog(Category::ALL)),
            (Some("products"), Some(segment), None) if !segment.is_empty() => {
                Some(match Category::from_slug(segment) {
                    Some(category) => Route::Catalog(category),
                    None => Route::Product(segment.to_string()),
                })
            }
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Catalog(category) if category.slug.is_empty() => "/products".to_string(),
            Route::Catalog(category) => format!("/products/{}", category.slug),
            Route::Product(id) => format!("/products/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/products"), Some(Route::Catalog(Category::ALL)));
        assert_eq!(
            Route::parse("/products/batteries"),
            Some(Route::Catalog(Category::BATTERIES))
        );
        assert_eq!(
            Route::parse("/products/65f1c0/"),
            Some(Route::Product("65f1c0".to_string()))
        );
        assert_eq!(Route::parse("/about-us"), None);
        assert_eq!(Route::parse("/products/a/b"), None);
    }

    #[test]
    fn test_round_trip() {
        let routes = [
            Route::Home,
            Route::Catalog(Category::ALL),
            Route::Catalog(Category::TYRES),
            Route::Catalog(Category::WHEELS),
            Route::Catalog(Category::BATTERIES),
            Route::Product("abc123".to_string()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route.clone()));
        }
    }
}
