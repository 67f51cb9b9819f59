use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Callback invoked with the key that was written.
pub type KeyCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Callback invoked with the freshly written value.
pub type ValueCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Callback invoked with both the key and the freshly written value.
pub type PairCallback<T> = Arc<dyn Fn(&str, &T) + Send + Sync>;

/// Type-agnostic view of a [`TypedStore`].
///
/// The board keeps one boxed `AnyStore` per value type, which lets board-wide
/// operations (wipe a key everywhere, clear every callback) fan out without
/// knowing any element type. The typed read/write path downcasts back through
/// `as_any`/`as_any_mut` at the one call site that has already resolved the
/// type's identifier; the downcast is never reachable from outside the crate.
pub(crate) trait AnyStore: Send {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Remove the value entry for a key. Callback registrations survive.
    fn wipe_key(&mut self, key: &str);

    /// Remove every value entry. Callback registrations survive.
    fn wipe_all(&mut self);

    /// Remove all three callback shapes registered for a key.
    fn unsubscribe(&mut self, key: &str);

    /// Remove every callback of every shape.
    fn clear_callbacks(&mut self);
}

/// Values of a single type, keyed by string, together with the callbacks
/// attached to those keys.
///
/// At most one callback of each shape is kept per key; registering another
/// silently replaces the previous one. Keys are scoped to this store, so the
/// same string may name unrelated values in other types' stores.
pub(crate) struct TypedStore<T> {
    values: HashMap<String, T>,
    key_events: HashMap<String, KeyCallback>,
    value_events: HashMap<String, ValueCallback<T>>,
    pair_events: HashMap<String, PairCallback<T>>,
}

impl<T> TypedStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            values: HashMap::new(),
            key_events: HashMap::new(),
            value_events: HashMap::new(),
            pair_events: HashMap::new(),
        }
    }

    /// Insert or overwrite the value under a key.
    pub(crate) fn set(&mut self, key: String, value: T) {
        self.values.insert(key, value);
    }

    pub(crate) fn get(&self, key: &str) -> Option<&T> {
        self.values.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Remove the value under a key. No-op if absent.
    pub(crate) fn erase(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// Remove all values. Callback registrations are untouched.
    pub(crate) fn clear_values(&mut self) {
        self.values.clear();
    }

    pub(crate) fn set_key_callback(&mut self, key: String, cb: KeyCallback) {
        self.key_events.insert(key, cb);
    }

    pub(crate) fn set_value_callback(&mut self, key: String, cb: ValueCallback<T>) {
        self.value_events.insert(key, cb);
    }

    pub(crate) fn set_pair_callback(&mut self, key: String, cb: PairCallback<T>) {
        self.pair_events.insert(key, cb);
    }

    /// Clone out whatever callbacks are registered for a key.
    ///
    /// The write path invokes callbacks only after its borrow of the store has
    /// ended, so a callback that re-enters the board sees a consistent state;
    /// handing out clones of the `Arc`s is what makes that possible.
    pub(crate) fn callbacks_for(
        &self,
        key: &str,
    ) -> (
        Option<KeyCallback>,
        Option<ValueCallback<T>>,
        Option<PairCallback<T>>,
    ) {
        (
            self.key_events.get(key).cloned(),
            self.value_events.get(key).cloned(),
            self.pair_events.get(key).cloned(),
        )
    }
}

impl<T: Any + Send> AnyStore for TypedStore<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn wipe_key(&mut self, key: &str) {
        self.erase(key);
    }

    fn wipe_all(&mut self) {
        self.clear_values();
    }

    fn unsubscribe(&mut self, key: &str) {
        self.key_events.remove(key);
        self.value_events.remove(key);
        self.pair_events.remove(key);
    }

    fn clear_callbacks(&mut self) {
        self.key_events.clear();
        self.value_events.clear();
        self.pair_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_key_callback(hits: &Arc<std::sync::Mutex<u32>>) -> KeyCallback {
        let hits = Arc::clone(hits);
        Arc::new(move |_key: &str| {
            *hits.lock().unwrap() += 1;
        })
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut store = TypedStore::<i32>::new();
        store.set("answer".to_string(), 41);
        store.set("answer".to_string(), 42);
        assert_eq!(store.get("answer"), Some(&42));
    }

    #[test]
    fn erase_is_noop_for_absent_key() {
        let mut store = TypedStore::<i32>::new();
        store.set("a".to_string(), 1);
        store.erase("missing");
        store.erase("a");
        store.erase("a");
        assert!(!store.contains("a"));
    }

    #[test]
    fn clear_values_keeps_callbacks() {
        let hits = Arc::new(std::sync::Mutex::new(0u32));
        let mut store = TypedStore::<i32>::new();
        store.set("a".to_string(), 1);
        store.set_key_callback("a".to_string(), counting_key_callback(&hits));

        store.clear_values();

        assert!(!store.contains("a"));
        let (key_cb, _, _) = store.callbacks_for("a");
        assert!(key_cb.is_some());
    }

    #[test]
    fn registering_again_replaces_the_callback() {
        let first = Arc::new(std::sync::Mutex::new(0u32));
        let second = Arc::new(std::sync::Mutex::new(0u32));
        let mut store = TypedStore::<i32>::new();

        store.set_key_callback("a".to_string(), counting_key_callback(&first));
        store.set_key_callback("a".to_string(), counting_key_callback(&second));

        let (key_cb, _, _) = store.callbacks_for("a");
        key_cb.unwrap()("a");
        assert_eq!(*first.lock().unwrap(), 0);
        assert_eq!(*second.lock().unwrap(), 1);
    }

    #[test]
    fn unsubscribe_drops_all_three_shapes() {
        let hits = Arc::new(std::sync::Mutex::new(0u32));
        let mut store = TypedStore::<i32>::new();
        store.set_key_callback("a".to_string(), counting_key_callback(&hits));
        store.set_value_callback("a".to_string(), Arc::new(|_v: &i32| {}));
        store.set_pair_callback("a".to_string(), Arc::new(|_k: &str, _v: &i32| {}));

        AnyStore::unsubscribe(&mut store, "a");

        let (key_cb, value_cb, pair_cb) = store.callbacks_for("a");
        assert!(key_cb.is_none());
        assert!(value_cb.is_none());
        assert!(pair_cb.is_none());
    }

    #[test]
    fn clear_callbacks_spares_values() {
        let mut store = TypedStore::<i32>::new();
        store.set("a".to_string(), 1);
        store.set_value_callback("a".to_string(), Arc::new(|_v: &i32| {}));

        AnyStore::clear_callbacks(&mut store);

        assert_eq!(store.get("a"), Some(&1));
        let (_, value_cb, _) = store.callbacks_for("a");
        assert!(value_cb.is_none());
    }
}
