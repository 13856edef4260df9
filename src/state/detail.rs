/// Product detail page state
///
/// Mounting issues two sequential requests: the full product list (to know
/// where this product sits for prev/next) and then the product itself.
/// Navigating to a neighbor remounts the page, so nothing here is reused
/// between products.

use crate::api::Envelope;
use super::data::Product;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPhase {
    Loading,
    Failed(String),
    Ready(Product),
}

/// What the page needs next after a response was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Request the product itself
    FetchProduct(String),
    /// Nothing more to request
    Done,
}

#[derive(Debug, Clone)]
pub struct DetailView {
    id: String,
    /// Product ids in catalog order
    ordering: Vec<String>,
    /// Position of `id` in `ordering`, if present
    index: Option<usize>,
    phase: DetailPhase,
    modal_open: bool,
}

impl DetailView {
    /// Start a detail page for `id`
    ///
    /// Returns the view and whether the catalog list should be requested.
    /// An empty id fails immediately without touching the network.
    pub fn new(id: impl Into<String>) -> (Self, bool) {
        let id = id.into();
        let missing = id.trim().is_empty();
        let phase = if missing {
            DetailPhase::Failed("Product ID is required".to_string())
        } else {
            DetailPhase::Loading
        };
        let view = Self {
            id,
            ordering: Vec::new(),
            index: None,
            phase,
            modal_open: false,
        };
        (view, !missing)
    }

    /// Apply the full product list (first request)
    pub fn apply_catalog(&mut self, response: Envelope<Vec<Product>>) -> NextStep {
        match response {
            Envelope::Success(products) => {
                self.ordering = products.into_iter().map(|p| p.id).collect();
                self.index = self.ordering.iter().position(|id| *id == self.id);
                if self.index.is_none() {
                    tracing::debug!(id = %self.id, "product not present in catalog ordering");
                }
                NextStep::FetchProduct(self.id.clone())
            }
            Envelope::Failure(message) => {
                self.phase = DetailPhase::Failed(message);
                NextStep::Done
            }
        }
    }

    /// Apply the single product response (second request)
    pub fn apply_product(&mut self, response: Envelope<Product>) {
        self.phase = match response {
            Envelope::Success(product) => DetailPhase::Ready(product),
            Envelope::Failure(message) => {
                tracing::warn!(id = %self.id, error = %message, "product failed to load");
                DetailPhase::Failed(message)
            }
        };
    }

    /// Index as the UI reasons about it: -1 when absent
    fn signed_index(&self) -> isize {
        self.index.map(|i| i as isize).unwrap_or(-1)
    }

    pub fn prev_disabled(&self) -> bool {
        self.signed_index() <= 0
    }

    pub fn next_disabled(&self) -> bool {
        self.signed_index() >= self.ordering.len() as isize - 1
    }

    /// Id of the previous product, when Prev is enabled
    pub fn prev_target(&self) -> Option<&str> {
        if self.prev_disabled() {
            return None;
        }
        let target = (self.signed_index() - 1) as usize;
        self.ordering.get(target).map(String::as_str)
    }

    /// Id of the next product, when Next is enabled
    pub fn next_target(&self) -> Option<&str> {
        if self.next_disabled() {
            return None;
        }
        let target = (self.signed_index() + 1) as usize;
        self.ordering.get(target).map(String::as_str)
    }

    /// Open the full-details modal; only meaningful once the product is loaded
    pub fn open_modal(&mut self) {
        if matches!(self.phase, DetailPhase::Ready(_)) {
            self.modal_open = true;
        }
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn product(&self) -> Option<&Product> {
        match &self.phase {
            DetailPhase::Ready(product) => Some(product),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == DetailPhase::Loading
    }

    /// Title of the failure block; the catalog's "not found" gets its own
    pub fn failure_heading(&self) -> Option<&'static str> {
        match &self.phase {
            DetailPhase::Failed(message) if message == "not found" => Some("Product Not Found"),
            DetailPhase::Failed(_) => Some("Error"),
            _ => None,
        }
    }
}
