/// State management module
///
/// This module handles all per-page view state:
/// - Shared data structures (data.rs)
/// - Catalog filtering and pagination (catalog.rs)
/// - Product detail and prev/next navigation (detail.rs)
/// - Hero carousel (hero.rs) and animation helpers (animation.rs)

pub mod animation;
pub mod catalog;
pub mod data;
pub mod detail;
pub mod hero;

/// Identity of a mounted page
///
/// Every request is tagged with the mount it was issued for; a response
/// whose mount is no longer current belongs to a page the user already
/// left and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MountId(u64);

impl MountId {
    /// The id for the next mounted page
    pub fn next(self) -> MountId {
        MountId(self.0.wrapping_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::MountId;

    #[test]
    fn test_mount_ids_are_distinct() {
        let first = MountId::default();
        let second = first.next();
        assert_ne!(first, second);
        assert_ne!(second, second.next());
    }
}
