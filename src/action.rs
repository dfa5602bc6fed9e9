use std::borrow::Cow;
use std::fmt;

use crate::ActionError;

/// Result of running a deferred action.
pub type ActionResult = Result<(), ActionError>;

/// A one-shot unit of work deferred until its transaction completes.
///
/// The label only feeds log output; it defaults to the closure's type name.
pub struct Action {
    label: Cow<'static, str>,
    run: Box<dyn FnOnce() -> ActionResult + Send>,
}

impl Action {
    /// Wrap a closure, labelled with its type name.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> ActionResult + Send + 'static,
    {
        Self {
            label: Cow::Borrowed(std::any::type_name::<F>()),
            run: Box::new(f),
        }
    }

    /// Wrap a closure under an explicit label.
    pub fn named<F>(label: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnOnce() -> ActionResult + Send + 'static,
    {
        Self {
            label: label.into(),
            run: Box::new(f),
        }
    }

    /// Label used in log output.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the action, consuming it.
    pub fn execute(self) -> ActionResult {
        (self.run)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("label", &self.label).finish()
    }
}
