use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{debug, trace};

use crate::error::BoardError;
use crate::store::{AnyStore, TypedStore};

/// Everything reachable through the board's lock: one store per value type,
/// keyed by the type's process-stable identifier.
struct BoardState {
    stores: HashMap<TypeId, Box<dyn AnyStore>>,
}

impl BoardState {
    fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Resolve the store for `T`, creating it on first use.
    fn store_mut<T: Any + Send>(&mut self) -> &mut TypedStore<T> {
        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                trace!(type_name = std::any::type_name::<T>(), "registering store");
                Box::new(TypedStore::<T>::new())
            })
            .as_any_mut()
            .downcast_mut::<TypedStore<T>>()
            .expect("a TypeId entry always holds the store built for that type")
    }

    fn store<T: Any + Send>(&self) -> Option<&TypedStore<T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|store| store.as_any().downcast_ref::<TypedStore<T>>())
    }
}

/// A thread-safe store for values of arbitrary types, keyed by string within
/// each type, with per-key change notifications.
///
/// `Blackboard` is a cheap-to-clone handle; clones share the same underlying
/// state, so components can each hold their own copy (the usual pattern for
/// this kind of shared container). One re-entrant lock guards everything
/// reachable from the handle: every operation holds it for its full duration,
/// and a callback fired during [`write`](Blackboard::write) may call back into
/// the board from the same thread without deadlocking, while other threads
/// block until the whole write (including notification) has finished.
///
/// Keys are scoped per type: `"score"` can simultaneously hold an `i32` and an
/// `f64`, and wiping one leaves the other untouched.
///
/// Stored types must be `Send` (the board is shared across threads) and
/// `Clone` (reads hand back owned copies, and the write path keeps a copy to
/// show to callbacks).
///
/// # Examples
///
/// ```
/// use blackboard::Blackboard;
///
/// let board = Blackboard::new();
/// board.write("score", 10i32);
/// board.subscribe_value("score", |v: &i32| println!("score is now {v}"));
/// board.write("score", 42i32);
/// assert_eq!(board.read::<i32>("score")?, 42);
/// # Ok::<(), blackboard::BoardError>(())
/// ```
#[derive(Clone)]
pub struct Blackboard {
    state: Arc<ReentrantMutex<RefCell<BoardState>>>,
}

impl Blackboard {
    /// Creates a new, empty board.
    pub fn new() -> Self {
        Self {
            state: Arc::new(ReentrantMutex::new(RefCell::new(BoardState::new()))),
        }
    }

    /// Stores a value under a key and notifies that key's subscribers.
    ///
    /// Inserts or overwrites; the store for `T` is created on first use.
    /// After the value lands, the callbacks registered for the key fire in a
    /// fixed order: key-only, then value-only, then key-and-value, each
    /// exactly once if registered. Callbacks run while the board's lock is
    /// held, so a concurrent writer on another thread cannot interleave
    /// between the update and the notification; a callback on *this* thread
    /// may freely call back into the board.
    pub fn write<T>(&self, key: &str, value: T)
    where
        T: Any + Send + Clone,
    {
        self.write_entry(key, value, true);
    }

    /// Stores a value under a key without notifying anyone.
    ///
    /// Identical to [`write`](Blackboard::write) except that registered
    /// callbacks stay silent for this update.
    pub fn write_silent<T>(&self, key: &str, value: T)
    where
        T: Any + Send + Clone,
    {
        self.write_entry(key, value, false);
    }

    fn write_entry<T>(&self, key: &str, value: T, raise_callbacks: bool)
    where
        T: Any + Send + Clone,
    {
        let guard = self.state.lock();
        let (key_cb, value_cb, pair_cb) = {
            let mut state = guard.borrow_mut();
            let store = state.store_mut::<T>();
            store.set(key.to_owned(), value.clone());
            if raise_callbacks {
                store.callbacks_for(key)
            } else {
                (None, None, None)
            }
        };
        // The interior borrow has ended but the re-entrant lock is still
        // held: callbacks may re-enter the board from this thread, and every
        // other thread observes the write and its notifications as one unit.
        if let Some(cb) = key_cb {
            cb(key);
        }
        if let Some(cb) = value_cb {
            cb(&value);
        }
        if let Some(cb) = pair_cb {
            cb(key, &value);
        }
    }

    /// Returns a copy of the value stored under a key.
    ///
    /// Looking up a type that has never been written is not an error in
    /// itself (the empty store is created on the spot), but the lookup then
    /// fails the same way any absent key does.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::KeyNotFound`] if no `T` value has been written
    /// under this key.
    pub fn read<T>(&self, key: &str) -> Result<T, BoardError>
    where
        T: Any + Send + Clone,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        state
            .store_mut::<T>()
            .get(key)
            .cloned()
            .ok_or_else(|| BoardError::key_not_found::<T>(key))
    }

    /// Runs a closure against the stored value without cloning it.
    ///
    /// The closure must not call back into the board; use the value it is
    /// given and return.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::KeyNotFound`] if no `T` value has been written
    /// under this key.
    pub fn with<T, F, R>(&self, key: &str, f: F) -> Result<R, BoardError>
    where
        T: Any + Send,
        F: FnOnce(&T) -> R,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        let store = state.store_mut::<T>();
        let value = store
            .get(key)
            .ok_or_else(|| BoardError::key_not_found::<T>(key))?;
        Ok(f(value))
    }

    /// Runs a closure against the stored value with mutable access.
    ///
    /// Modifying a value in place does not notify subscribers; only
    /// [`write`](Blackboard::write) does. The closure must not call back into
    /// the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::KeyNotFound`] if no `T` value has been written
    /// under this key.
    pub fn with_mut<T, F, R>(&self, key: &str, f: F) -> Result<R, BoardError>
    where
        T: Any + Send,
        F: FnOnce(&mut T) -> R,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        let store = state.store_mut::<T>();
        let value = store
            .get_mut(key)
            .ok_or_else(|| BoardError::key_not_found::<T>(key))?;
        Ok(f(value))
    }

    /// Returns true if a `T` value is stored under this key.
    pub fn contains_key<T: Any + Send>(&self, key: &str) -> bool {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.store::<T>().is_some_and(|store| store.contains(key))
    }

    /// Returns every key holding a `T` value, in no particular order.
    pub fn keys<T: Any + Send>(&self) -> Vec<String> {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.store::<T>().map(|store| store.keys()).unwrap_or_default()
    }

    /// Removes the value under a key in `T`'s store only.
    ///
    /// Values stored under the same key for other types are untouched, as are
    /// all callback registrations.
    pub fn wipe_type_key<T: Any + Send>(&self, key: &str) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        state.store_mut::<T>().erase(key);
    }

    /// Removes the value under a key from every type's store.
    ///
    /// Callback registrations for the key survive; the next `write` to it
    /// still notifies.
    pub fn wipe_key(&self, key: &str) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        for store in state.stores.values_mut() {
            store.wipe_key(key);
        }
    }

    /// Clears every value in every store.
    ///
    /// With `wipe_callbacks` set, every callback registration is dropped as
    /// well; otherwise subscriptions survive and fire again on the next
    /// write. The stores themselves remain registered either way.
    pub fn wipe_board(&self, wipe_callbacks: bool) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        debug!(wipe_callbacks, "wiping board");
        for store in state.stores.values_mut() {
            store.wipe_all();
            if wipe_callbacks {
                store.clear_callbacks();
            }
        }
    }

    /// Registers a callback that receives the key whenever a `T` value is
    /// written under it.
    ///
    /// One callback of this shape is kept per key; registering again replaces
    /// the previous one.
    pub fn subscribe_key<T, F>(&self, key: &str, cb: F)
    where
        T: Any + Send,
        F: Fn(&str) + Send + Sync + 'static,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        state
            .store_mut::<T>()
            .set_key_callback(key.to_owned(), Arc::new(cb));
    }

    /// Registers a callback that receives the freshly written value whenever
    /// a `T` value is written under the key.
    ///
    /// One callback of this shape is kept per key; registering again replaces
    /// the previous one.
    pub fn subscribe_value<T, F>(&self, key: &str, cb: F)
    where
        T: Any + Send,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        state
            .store_mut::<T>()
            .set_value_callback(key.to_owned(), Arc::new(cb));
    }

    /// Registers a callback that receives both the key and the freshly
    /// written value whenever a `T` value is written under the key.
    ///
    /// One callback of this shape is kept per key; registering again replaces
    /// the previous one.
    pub fn subscribe_pair<T, F>(&self, key: &str, cb: F)
    where
        T: Any + Send,
        F: Fn(&str, &T) + Send + Sync + 'static,
    {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        state
            .store_mut::<T>()
            .set_pair_callback(key.to_owned(), Arc::new(cb));
    }

    /// Removes all three callback shapes for a key in `T`'s store only.
    pub fn unsubscribe<T: Any + Send>(&self, key: &str) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        AnyStore::unsubscribe(state.store_mut::<T>(), key);
    }

    /// Removes all three callback shapes for a key in every type's store.
    pub fn unsubscribe_all(&self, key: &str) {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        for store in state.stores.values_mut() {
            store.unsubscribe(key);
        }
    }

    /// Drops every store, releasing all values and callbacks.
    ///
    /// Outstanding handles remain usable and see an empty board.
    pub(crate) fn teardown(&self) {
        let guard = self.state.lock();
        guard.borrow_mut().stores.clear();
    }
}

impl Default for Blackboard {
    fn default() -> Self {
        Self::new()
    }
}
