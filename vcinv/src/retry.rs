//! Host certificate trust-on-first-use.
//!
//! Adding a host whose certificate the control plane has not seen fails
//! with a fault carrying the certificate thumbprint. [`ThumbprintRetry`]
//! describes how [`Container::add_host`](crate::container::Container::add_host)
//! reacts: the thumbprint is copied into the host spec and the same
//! mutation is issued again. Only faults the [`FaultClassifier`] maps to a
//! thumbprint are retried.

use std::fmt;

use crate::inventory::InventoryFault;

/// Extracts the certificate thumbprint from a fault, if it is a
/// certificate verification fault.
///
/// Closures implement this trait, which lets tests decide per fault.
///
/// # Examples
///
/// ```
/// use vcinv::inventory::InventoryFault;
/// use vcinv::retry::{FaultClassifier, SslVerifyClassifier};
///
/// let fault = InventoryFault::SslVerify { thumbprint: "AA:BB".into() };
/// assert_eq!(SslVerifyClassifier.certificate_thumbprint(&fault), Some("AA:BB".into()));
///
/// let never = |_: &InventoryFault| -> Option<String> { None };
/// assert_eq!(never.certificate_thumbprint(&fault), None);
/// ```
pub trait FaultClassifier {
    /// Returns the thumbprint to accept, or `None` if `fault` must propagate.
    fn certificate_thumbprint(&self, fault: &InventoryFault) -> Option<String>;
}

impl<F> FaultClassifier for F
where
    F: Fn(&InventoryFault) -> Option<String>,
{
    fn certificate_thumbprint(&self, fault: &InventoryFault) -> Option<String> {
        self(fault)
    }
}

/// Recognizes [`InventoryFault::SslVerify`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SslVerifyClassifier;

impl FaultClassifier for SslVerifyClassifier {
    fn certificate_thumbprint(&self, fault: &InventoryFault) -> Option<String> {
        match fault {
            InventoryFault::SslVerify { thumbprint } => Some(thumbprint.clone()),
            _ => None,
        }
    }
}

/// Retry policy for certificate faults while adding hosts.
///
/// The default policy retries without bound, which blocks for as long as
/// the control plane keeps reporting certificate faults.
///
/// # Examples
///
/// ```
/// use vcinv::retry::ThumbprintRetry;
///
/// let unbounded = ThumbprintRetry::default();
/// assert_eq!(unbounded.max_attempts(), None);
///
/// let bounded = ThumbprintRetry::default().with_max_attempts(3);
/// assert!(!bounded.is_exhausted(2));
/// assert!(bounded.is_exhausted(3));
/// ```
pub struct ThumbprintRetry {
    max_attempts: Option<u32>,
    classifier: Box<dyn FaultClassifier>,
}

impl Default for ThumbprintRetry {
    fn default() -> Self {
        Self {
            max_attempts: None,
            classifier: Box::new(SslVerifyClassifier),
        }
    }
}

impl ThumbprintRetry {
    /// Creates the unbounded policy with the default classifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the total number of add attempts.
    ///
    /// A cap of zero is treated as one: the mutation is always issued once.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }

    /// Removes any cap.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    /// Replaces the fault classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl FaultClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// The attempt cap, if any.
    #[must_use]
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Whether no further attempt may follow `attempts` failed ones.
    #[must_use]
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }

    /// The attempt count after one more attempt.
    ///
    /// Saturates, so an unbounded policy can keep counting forever.
    #[must_use]
    pub fn next_attempt(attempts: u32) -> u32 {
        attempts.saturating_add(1)
    }

    /// Classifies a fault.
    #[must_use]
    pub fn certificate_thumbprint(&self, fault: &InventoryFault) -> Option<String> {
        self.classifier.certificate_thumbprint(fault)
    }
}

impl fmt::Debug for ThumbprintRetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbprintRetry")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classifier_ignores_other_faults() {
        let policy = ThumbprintRetry::default();
        let fault = InventoryFault::TaskFailed {
            task: "task-1".into(),
            message: "boom".into(),
        };
        assert_eq!(policy.certificate_thumbprint(&fault), None);
    }

    #[test]
    fn test_default_is_unbounded() {
        let policy = ThumbprintRetry::default();
        assert!(!policy.is_exhausted(u32::MAX));
    }

    #[test]
    fn test_attempt_count_saturates() {
        assert_eq!(ThumbprintRetry::next_attempt(0), 1);
        assert_eq!(ThumbprintRetry::next_attempt(u32::MAX), u32::MAX);
        assert!(!ThumbprintRetry::default().is_exhausted(ThumbprintRetry::next_attempt(u32::MAX)));
    }

    #[test]
    fn test_zero_cap_means_single_attempt() {
        let policy = ThumbprintRetry::new().with_max_attempts(0);
        assert_eq!(policy.max_attempts(), Some(1));
        assert!(policy.is_exhausted(1));
    }

    #[test]
    fn test_unbounded_clears_cap() {
        let policy = ThumbprintRetry::new().with_max_attempts(2).unbounded();
        assert_eq!(policy.max_attempts(), None);
    }

    #[test]
    fn test_custom_classifier() {
        let policy = ThumbprintRetry::new().with_classifier(|fault: &InventoryFault| match fault {
            InventoryFault::Other(message) => message.strip_prefix("thumbprint=").map(str::to_string),
            _ => None,
        });
        let fault = InventoryFault::Other("thumbprint=11:22".into());
        assert_eq!(policy.certificate_thumbprint(&fault), Some("11:22".into()));

        let ssl = InventoryFault::SslVerify {
            thumbprint: "AA".into(),
        };
        assert_eq!(policy.certificate_thumbprint(&ssl), None);
    }
}
