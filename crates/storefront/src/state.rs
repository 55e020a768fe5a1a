//! Application state shared across handlers.

use std::sync::Arc;

use oakline_core::Catalog;

use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::services::{InquiryDeliveryError, InquiryNotifier};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("content error: {0}")]
    Content(#[from] ContentError),
    #[error("inquiry client error: {0}")]
    Inquiry(#[from] InquiryDeliveryError),
}

/// Application state shared across all handlers.
///
/// Everything here is read-only after startup; per-visitor state lives in
/// the session (cart, last order) and in cookies (recently viewed). Cloning
/// is cheap via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
    inquiries: InquiryNotifier,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog
    ///
    /// Content pages are loaded from [`StorefrontConfig::content_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if content fails to load or the inquiry HTTP client
    /// cannot be built.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StateError> {
        let content = ContentStore::load(&config.content_dir())?;
        let inquiries = InquiryNotifier::new(config.inquiry_webhook_url.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
                inquiries,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the loaded content pages.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the connect form notifier.
    #[must_use]
    pub fn inquiries(&self) -> &InquiryNotifier {
        &self.inner.inquiries
    }
}
