/// Catalog page state: category restriction, subcategory filter, pagination
///
/// Lifecycle: created empty when the page mounts, populated once by the
/// product list response, then mutated by filter and "load more" actions.
/// Discarded on navigation; nothing is persisted.

use crate::api::Envelope;
use super::data::{Category, Product};

/// Number of products revealed per page
pub const PAGE_SIZE: usize = 10;

/// Subcategory filter selected in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every product in the category
    #[default]
    All,
    /// Exact match on `Product::subcategory`
    Subcategory(String),
}

impl Filter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::All => true,
            Filter::Subcategory(name) => product.subcategory == *name,
        }
    }
}

/// Loading → Failed | Ready
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    /// Terminal until the page is mounted again
    Failed(String),
    Ready,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    category: Category,
    /// Products already restricted to `category`, in catalog order
    products: Vec<Product>,
    /// Distinct subcategories, computed once from `products`
    subcategories: Vec<String>,
    filter: Filter,
    /// How many filtered products are revealed (never below PAGE_SIZE)
    cursor: usize,
    phase: Phase,
}

impl CatalogView {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            products: Vec::new(),
            subcategories: Vec::new(),
            filter: Filter::All,
            cursor: PAGE_SIZE,
            phase: Phase::Loading,
        }
    }

    /// Apply the product list response
    pub fn apply_products(&mut self, response: Envelope<Vec<Product>>) {
        match response {
            Envelope::Success(all) => {
                let category = self.category;
                self.products = all.into_iter().filter(|p| category.contains(p)).collect();
                self.subcategories = distinct_subcategories(&self.products);
                self.filter = Filter::All;
                self.cursor = PAGE_SIZE;
                self.phase = Phase::Ready;
                tracing::info!(
                    category = self.category.title,
                    products = self.products.len(),
                    facets = self.subcategories.len(),
                    "catalog ready"
                );
            }
            Envelope::Failure(message) => {
                tracing::warn!(category = self.category.title, error = %message, "catalog failed to load");
                self.phase = Phase::Failed(message);
            }
        }
    }

    /// Switch the subcategory filter; pagination starts over
    pub fn select_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.cursor = PAGE_SIZE;
    }

    /// Reveal one more page, capped at the filtered count
    pub fn load_more(&mut self) {
        if !self.has_more() {
            return;
        }
        self.cursor = (self.cursor + PAGE_SIZE).min(self.filtered_count());
    }

    pub fn has_more(&self) -> bool {
        self.displayed_count() < self.filtered_count()
    }

    /// Products passing the current filter
    pub fn filtered(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter().filter(move |p| self.filter.matches(p))
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().count()
    }

    /// Products currently rendered
    pub fn displayed(&self) -> Vec<&Product> {
        self.filtered().take(self.cursor).collect()
    }

    pub fn displayed_count(&self) -> usize {
        self.cursor.min(self.filtered_count())
    }

    /// Raw pagination cursor (may exceed the filtered count)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subcategories(&self) -> &[String] {
        &self.subcategories
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

/// Distinct non-empty subcategories in first-appearance order
fn distinct_subcategories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if !product.subcategory.is_empty() && !seen.contains(&product.subcategory) {
            seen.push(product.subcategory.clone());
        }
    }
    seen
}
