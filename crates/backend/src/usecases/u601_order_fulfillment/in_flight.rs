use contracts::enums::FulfillmentAction;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Ключ выполняющегося действия: заказ, действие, цель (SKU, дилер, пиклист)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub order_id: String,
    pub action: FulfillmentAction,
    pub target: String,
}

impl ActionKey {
    pub fn new(order_id: &str, action: FulfillmentAction, target: impl Into<String>) -> Self {
        Self {
            order_id: order_id.to_string(),
            action,
            target: target.into(),
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.action.code(), self.order_id, self.target)
    }
}

/// Реестр выполняющихся действий (in-memory, на процесс)
#[derive(Clone, Default)]
pub struct InFlightRegistry {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Занять ключ. `None`, если такое же действие уже выполняется
    pub fn try_acquire(&self, key: &ActionKey) -> Option<InFlightGuard> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Arc::clone(&self.keys),
            key: key.clone(),
        })
    }

    pub fn is_in_flight(&self, key: &ActionKey) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Освобождает ключ при завершении вызова (успех, ошибка или паника)
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
    key: ActionKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
