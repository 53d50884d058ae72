use serde::Serialize;

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message the host must show to the user (toast, alert, status line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

pub const FETCH_FAILED: &str = "Failed to fetch products";
pub const DELETE_SUCCEEDED: &str = "Product deleted successfully.";
pub const DELETE_FAILED: &str = "Failed to delete product";
pub const DELETE_TRANSPORT_FAILED: &str = "Error deleting product";
pub const NOTHING_TO_EXPORT: &str = "No products to export";
pub const EXPORT_FAILED: &str = "Failed to export products";
pub const NO_SEARCH_RESULTS: &str = "No products found matching your search";
pub const NO_PRODUCTS: &str = "No products available";

pub fn exported(count: usize) -> String {
    format!("Successfully exported {count} products")
}
