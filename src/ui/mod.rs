/// UI module
///
/// This module contains the iced views for each page:
/// - Window header and section links (shell.rs)
/// - Landing banner and hero carousel (hero.rs)
/// - Catalog grid with facets (catalog.rs)
/// - Product detail and full-details modal (detail.rs)
/// - Loading indicator (spinner.rs)
/// - Colors and widget styles (style.rs)

pub mod catalog;
pub mod detail;
pub mod hero;
pub mod shell;
pub mod spinner;
pub mod style;
