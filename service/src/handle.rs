//! # Ontology Service Handle
//!
//! Newtype around a shared service instance, handed to whatever embeds the
//! ontology (an HTTP layer, a CLI, tests) so they depend on the handle rather
//! than on how the service was assembled.
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   OntologyHandle (newtype)          │
//! │  #[repr(transparent)]               │
//! ├─────────────────────────────────────┤
//! │  Arc<OntologyServiceImpl>           │
//! └─────────────────────────────────────┘
//! ```

use std::sync::Arc;

/// Cheaply clonable handle to an ontology service
///
/// # Examples
///
/// ```rust,no_run
/// use ontology_core::{OntologyConfig, OntologyQueries};
/// use ontology_service::handle::OntologyHandle;
/// use ontology_service::service::OntologyServiceImpl;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let handle = OntologyHandle::new(Arc::new(OntologyServiceImpl::new(OntologyConfig::default())));
/// let ctx = handle.context();
/// let roots = handle.roots(&ctx).await?;
/// # Ok(())
/// # }
/// ```
#[repr(transparent)]
#[derive(Debug)]
pub struct OntologyHandle<T> {
    inner: Arc<T>,
}

impl<T> Clone for OntologyHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> OntologyHandle<T> {
    #[must_use]
    pub fn new(inner: Arc<T>) -> Self {
        Self { inner }
    }

    /// Give up the handle and keep the shared service
    #[must_use]
    pub fn into_arc(self) -> Arc<T> {
        self.inner
    }

    #[must_use]
    pub fn as_service_ref(&self) -> &T {
        &self.inner
    }
}

impl<T> AsRef<T> for OntologyHandle<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

impl<T> std::ops::Deref for OntologyHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
