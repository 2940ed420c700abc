use std::fmt;
use std::sync::Arc;

/// Four-level logging capability the resolver writes its trail to
pub trait ResolverLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default logger, forwarding to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ResolverLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Prepends `"{tag}: "` to every line before handing it to the inner logger
#[derive(Clone)]
pub struct PrefixedLogger {
    tag: String,
    inner: Arc<dyn ResolverLogger>,
}

impl PrefixedLogger {
    pub fn new(tag: impl Into<String>, inner: Arc<dyn ResolverLogger>) -> Self {
        Self {
            tag: tag.into(),
            inner,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Same tag, different destination
    pub fn with_inner(&self, inner: Arc<dyn ResolverLogger>) -> Self {
        Self::new(self.tag.clone(), inner)
    }

    /// Same destination, different tag
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self::new(tag, self.inner.clone())
    }

    fn tagged(&self, message: &str) -> String {
        format!("{}: {}", self.tag, message)
    }
}

impl fmt::Debug for PrefixedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixedLogger")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl ResolverLogger for PrefixedLogger {
    fn debug(&self, message: &str) {
        self.inner.debug(&self.tagged(message));
    }

    fn info(&self, message: &str) {
        self.inner.info(&self.tagged(message));
    }

    fn warn(&self, message: &str) {
        self.inner.warn(&self.tagged(message));
    }

    fn error(&self, message: &str) {
        self.inner.error(&self.tagged(message));
    }
}
