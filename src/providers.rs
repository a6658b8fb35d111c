//! Ordered capability providers.
//!
//! Several inputs (image captions, poster copy) can come from more than one
//! place: an external service, data the caller supplied, or a heuristic. A
//! [`Chain`] asks each provider in turn and takes the first answer. Callers
//! that must always get a value use [`Chain::resolve_or`], which ends the
//! chain with a static fallback.

/// Something that may be able to produce an `O` for an `I`.
///
/// Returning `None` means "not available", and the chain moves on. Providers
/// that talk to unreliable collaborators log their own failures and return
/// `None`.
pub trait Provider<I: ?Sized, O>: Send + Sync {
    fn name(&self) -> &str;
    fn provide(&self, input: &I) -> Option<O>;
}

/// Name reported when the static fallback produced the value.
pub const STATIC_FALLBACK: &str = "static-fallback";

/// A value together with the provider that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<O> {
    pub value: O,
    pub provider: String,
}

/// Providers tried in insertion order.
pub struct Chain<I: ?Sized, O> {
    providers: Vec<Box<dyn Provider<I, O>>>,
}

impl<I: ?Sized, O> Default for Chain<I, O> {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
        }
    }
}

impl<I: ?Sized, O> Chain<I, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider to the end of the chain.
    pub fn then(mut self, provider: impl Provider<I, O> + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// First available value, if any provider has one.
    pub fn resolve(&self, input: &I) -> Option<Resolved<O>> {
        self.providers.iter().find_map(|p| {
            let value = p.provide(input)?;
            tracing::debug!(provider = p.name(), "provider answered");
            Some(Resolved {
                value,
                provider: p.name().to_string(),
            })
        })
    }

    /// First available value, or the static fallback.
    pub fn resolve_or(&self, input: &I, fallback: impl FnOnce(&I) -> O) -> Resolved<O> {
        self.resolve(input).unwrap_or_else(|| Resolved {
            value: fallback(input),
            provider: STATIC_FALLBACK.to_string(),
        })
    }
}
