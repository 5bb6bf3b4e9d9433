//! Request classification.
//!
//! Every incoming request resolves to exactly one [`Flow`]: either it is
//! passed straight to the network untouched ([`Flow::Bypass`]) or it enters
//! the normalize/lookup/refresh pipeline ([`Flow::Intercept`]).
//! Classification is pure and total — there is no failure mode.

use std::sync::Arc;

/// Outcome of classifying a request.
///
/// The subject is consumed by [`Classify::classify`] and handed back inside
/// the classification, so the caller keeps ownership without cloning.
#[derive(Debug)]
pub enum Flow<S> {
    /// The request enters the caching pipeline.
    Intercept(S),
    /// The request skips all rewriting and caching and goes straight to the
    /// network.
    Bypass(S),
}

impl<S> Flow<S> {
    /// Returns the wrapped subject, discarding the classification.
    pub fn into_inner(self) -> S {
        match self {
            Flow::Intercept(subject) | Flow::Bypass(subject) => subject,
        }
    }

    /// Returns `true` for [`Flow::Bypass`].
    pub fn is_bypass(&self) -> bool {
        matches!(self, Flow::Bypass(_))
    }
}

/// Decides whether a request is handled by the interception layer.
pub trait Classify {
    /// The request type being classified.
    type Subject;

    /// Classifies the subject, returning it wrapped in the resulting [`Flow`].
    fn classify(&self, subject: Self::Subject) -> Flow<Self::Subject>;
}

impl<T> Classify for &T
where
    T: Classify + ?Sized,
{
    type Subject = T::Subject;

    fn classify(&self, subject: Self::Subject) -> Flow<Self::Subject> {
        (**self).classify(subject)
    }
}

impl<T> Classify for Box<T>
where
    T: Classify + ?Sized,
{
    type Subject = T::Subject;

    fn classify(&self, subject: Self::Subject) -> Flow<Self::Subject> {
        self.as_ref().classify(subject)
    }
}

impl<T> Classify for Arc<T>
where
    T: Classify + ?Sized,
{
    type Subject = T::Subject;

    fn classify(&self, subject: Self::Subject) -> Flow<Self::Subject> {
        self.as_ref().classify(subject)
    }
}
