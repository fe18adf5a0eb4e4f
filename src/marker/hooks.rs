/// Callbacks run once, in registration order, when a marker is removed.
#[derive(Default)]
pub struct RemovalHooks {
    hooks: Vec<Box<dyn FnOnce()>>,
}

impl RemovalHooks {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` after the existing ones.
    pub fn push(&mut self, hook: impl FnOnce() + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Return `true` when no hook is registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Consume the list, invoking every hook in order.
    pub fn run(self) {
        for hook in self.hooks {
            hook();
        }
    }
}

impl std::fmt::Debug for RemovalHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemovalHooks")
            .field("len", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marker/hooks.rs"]
mod tests;
