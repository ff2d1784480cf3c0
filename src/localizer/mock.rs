/*!
 * Mock localizer for testing.
 *
 * - `MockLocalizer::echo()` - Succeeds with a summary of the call
 * - `MockLocalizer::fixed(text)` - Always returns the same text
 * - `MockLocalizer::failing()` - Always fails with an error
 *
 * Every call is recorded so tests can check which language and config the
 * localizer actually received.
 */

use std::sync::Mutex;

use super::{LocalizationContext, LocalizeConfig, LocalizeError, Localizer};

/// Behavior mode for the mock localizer
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns `<tag>|<message id>|<plural count>`
    Echo,
    /// Returns the given text
    Fixed(String),
    /// Always fails with an error
    Failing,
}

/// A call received by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Canonical language tag of the context
    pub tag: String,
    /// Config passed to the localizer
    pub config: LocalizeConfig,
}

/// Mock localizer for testing plural lookups
#[derive(Debug)]
pub struct MockLocalizer {
    behavior: MockBehavior,
    calls: Mutex<Vec<MockCall>>,
}

impl MockLocalizer {
    /// Create a new mock localizer with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that describes each call in its output
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock that always returns `text`
    pub fn fixed(text: &str) -> Self {
        Self::new(MockBehavior::Fixed(text.to_string()))
    }

    /// Create a failing mock localizer
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl Localizer for MockLocalizer {
    fn localize(
        &self,
        context: &LocalizationContext,
        config: &LocalizeConfig,
    ) -> Result<String, LocalizeError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                tag: context.tag().to_string(),
                config: config.clone(),
            });
        }

        match &self.behavior {
            MockBehavior::Echo => {
                let id = config
                    .default_message
                    .as_ref()
                    .map(|m| m.id.as_str())
                    .unwrap_or("-");
                let count = config
                    .plural_count
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string());
                Ok(format!("{}|{}|{}", context.tag(), id, count))
            }
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Failing => Err(LocalizeError::Other("mock localizer failure".to_string())),
        }
    }
}
