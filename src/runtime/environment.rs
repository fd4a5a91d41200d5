use crate::runtime::{error::RuntimeError, value::Value};

/// Flat symbol table. Bindings keep insertion order so iteration is
/// deterministic; lookups are a linear scan.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: Vec<(String, Value)>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value bound to `name`, or an unbound-symbol
    /// error value.
    pub fn get(&self, name: &str) -> Value {
        match self.lookup(name) {
            Some(value) => value.clone(),
            None => Value::Error(RuntimeError::UnboundSymbol {
                name: name.to_string(),
            }),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value)
    }

    /// Binds a copy of `value` to `name`, replacing any earlier binding in
    /// place.
    pub fn put(&mut self, name: &str, value: &Value) {
        if let Some((_, slot)) = self.bindings.iter_mut().find(|(bound, _)| bound == name) {
            tracing::trace!(name, "rebinding symbol");
            *slot = value.clone();
            return;
        }
        self.bindings.push((name.to_string(), value.clone()));
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(name, _)| name.as_str())
    }
}
