//! Change notification for chrome properties
//!
//! Each settable chrome property is an [`Observable`]: a value with an
//! optional validator and a list of listeners that are told about every
//! accepted change with the old and the new value.

use crate::utils::error::Result;

/// Identifier returned by [`Observable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Validator<T> = Box<dyn Fn(&T) -> Result<()>>;
type ChangeHandler<T> = Box<dyn FnMut(&T, &T)>;

/// A validated value that notifies listeners when it changes
pub struct Observable<T> {
    /// Current value
    value: T,

    /// Rejects values before they are stored
    validator: Option<Validator<T>>,

    /// Registered listeners
    handlers: Vec<(SubscriptionId, ChangeHandler<T>)>,

    /// Next subscription id
    next_id: usize,
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Create an observable holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            validator: None,
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Attach a validator that every assigned value must pass
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> Result<()> + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Validate, store and notify.
    ///
    /// A rejected value leaves the previous one in place. Assigning the
    /// current value is not a change and returns `Ok(None)`; otherwise the
    /// `(old, new)` pair is returned after every listener has run.
    pub fn set(&mut self, value: T) -> Result<Option<(T, T)>> {
        if let Some(validator) = &self.validator {
            validator(&value)?;
        }

        if value == self.value {
            return Ok(None);
        }

        let old = std::mem::replace(&mut self.value, value);
        for (_, handler) in self.handlers.iter_mut() {
            handler(&old, &self.value);
        }

        Ok(Some((old, self.value.clone())))
    }

    /// Register a listener for accepted changes
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&T, &T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
