//! Process-wide blackboard instance.
//!
//! The engine itself ([`Blackboard`]) is an ordinary handle that can be
//! cloned into any component. For programs that want one ambient board
//! instead, this module keeps a single process-wide instance behind an
//! explicit [`create`]/[`destroy`] lifecycle and mirrors every data operation
//! as a free function against it.
//!
//! Lifecycle calls are expected to run from one coordinating thread before
//! and after concurrent use; interleaving `create`/`destroy` with live data
//! traffic on other threads is a race the caller must avoid.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use crate::board::Blackboard;
use crate::error::BoardError;

static INSTANCE: Mutex<Option<Blackboard>> = Mutex::new(None);
static READY: AtomicBool = AtomicBool::new(false);

/// Installs the process-wide blackboard, returning whether an instance is in
/// place afterwards.
///
/// Calling `create` while an instance already exists is not an error: the
/// previous instance is torn down first, every store, value and callback
/// released, and a fresh empty one takes its place.
///
/// # Examples
///
/// ```
/// assert!(blackboard::create());
/// blackboard::write("answer", 42i32)?;
///
/// // Re-creation starts from a clean slate.
/// assert!(blackboard::create());
/// assert!(!blackboard::contains_key::<i32>("answer")?);
/// # blackboard::destroy();
/// # Ok::<(), blackboard::BoardError>(())
/// ```
pub fn create() -> bool {
    let mut slot = INSTANCE.lock();
    if let Some(previous) = slot.take() {
        READY.store(false, Ordering::Release);
        previous.teardown();
        debug!("previous blackboard instance destroyed");
    }
    *slot = Some(Blackboard::new());
    READY.store(true, Ordering::Release);
    debug!("blackboard created");
    true
}

/// Tears down the process-wide blackboard.
///
/// Every store is dropped under the data lock, releasing all values and
/// callbacks, and the instance itself is discarded. Idempotent: destroying
/// when no instance exists is a no-op.
pub fn destroy() {
    let mut slot = INSTANCE.lock();
    READY.store(false, Ordering::Release);
    if let Some(board) = slot.take() {
        board.teardown();
        debug!("blackboard destroyed");
    }
}

/// Returns true if the process-wide instance currently exists.
///
/// This is a lock-free flag check, safe to call at any time. Its answer can
/// be stale by the time the caller acts on it if another thread is creating
/// or destroying concurrently; keep lifecycle calls on one thread and the
/// answer is exact.
pub fn is_ready() -> bool {
    READY.load(Ordering::Acquire)
}

/// Clones out the current instance, or fails if the lifecycle has not been
/// started. The slot lock is released before any data operation runs, so a
/// callback re-entering this module does not deadlock.
fn board() -> Result<Blackboard, BoardError> {
    INSTANCE.lock().clone().ok_or(BoardError::NotReady)
}

/// Stores a value under a key on the process-wide board and notifies that
/// key's subscribers. See [`Blackboard::write`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn write<T>(key: &str, value: T) -> Result<(), BoardError>
where
    T: Any + Send + Clone,
{
    board().map(|b| b.write(key, value))
}

/// Stores a value under a key without notifying anyone. See
/// [`Blackboard::write_silent`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn write_silent<T>(key: &str, value: T) -> Result<(), BoardError>
where
    T: Any + Send + Clone,
{
    board().map(|b| b.write_silent(key, value))
}

/// Returns a copy of the value stored under a key. See [`Blackboard::read`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run, or
/// [`BoardError::KeyNotFound`] if no `T` value has been written under this
/// key.
pub fn read<T>(key: &str) -> Result<T, BoardError>
where
    T: Any + Send + Clone,
{
    board()?.read(key)
}

/// Runs a closure against the stored value without cloning it. See
/// [`Blackboard::with`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run, or
/// [`BoardError::KeyNotFound`] if no `T` value has been written under this
/// key.
pub fn with<T, F, R>(key: &str, f: F) -> Result<R, BoardError>
where
    T: Any + Send,
    F: FnOnce(&T) -> R,
{
    board()?.with(key, f)
}

/// Runs a closure against the stored value with mutable access. See
/// [`Blackboard::with_mut`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run, or
/// [`BoardError::KeyNotFound`] if no `T` value has been written under this
/// key.
pub fn with_mut<T, F, R>(key: &str, f: F) -> Result<R, BoardError>
where
    T: Any + Send,
    F: FnOnce(&mut T) -> R,
{
    board()?.with_mut(key, f)
}

/// Returns true if a `T` value is stored under this key. See
/// [`Blackboard::contains_key`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn contains_key<T: Any + Send>(key: &str) -> Result<bool, BoardError> {
    board().map(|b| b.contains_key::<T>(key))
}

/// Returns every key holding a `T` value. See [`Blackboard::keys`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn keys<T: Any + Send>() -> Result<Vec<String>, BoardError> {
    board().map(|b| b.keys::<T>())
}

/// Removes the value under a key in `T`'s store only. See
/// [`Blackboard::wipe_type_key`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn wipe_type_key<T: Any + Send>(key: &str) -> Result<(), BoardError> {
    board().map(|b| b.wipe_type_key::<T>(key))
}

/// Removes the value under a key from every type's store. See
/// [`Blackboard::wipe_key`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn wipe_key(key: &str) -> Result<(), BoardError> {
    board().map(|b| b.wipe_key(key))
}

/// Clears every value in every store, and every callback too if asked. See
/// [`Blackboard::wipe_board`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn wipe_board(wipe_callbacks: bool) -> Result<(), BoardError> {
    board().map(|b| b.wipe_board(wipe_callbacks))
}

/// Registers a key-only callback for writes of `T` under this key. See
/// [`Blackboard::subscribe_key`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn subscribe_key<T, F>(key: &str, cb: F) -> Result<(), BoardError>
where
    T: Any + Send,
    F: Fn(&str) + Send + Sync + 'static,
{
    board().map(|b| b.subscribe_key::<T, F>(key, cb))
}

/// Registers a value-only callback for writes of `T` under this key. See
/// [`Blackboard::subscribe_value`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn subscribe_value<T, F>(key: &str, cb: F) -> Result<(), BoardError>
where
    T: Any + Send,
    F: Fn(&T) + Send + Sync + 'static,
{
    board().map(|b| b.subscribe_value(key, cb))
}

/// Registers a key-and-value callback for writes of `T` under this key. See
/// [`Blackboard::subscribe_pair`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn subscribe_pair<T, F>(key: &str, cb: F) -> Result<(), BoardError>
where
    T: Any + Send,
    F: Fn(&str, &T) + Send + Sync + 'static,
{
    board().map(|b| b.subscribe_pair(key, cb))
}

/// Removes all three callback shapes for a key in `T`'s store only. See
/// [`Blackboard::unsubscribe`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn unsubscribe<T: Any + Send>(key: &str) -> Result<(), BoardError> {
    board().map(|b| b.unsubscribe::<T>(key))
}

/// Removes all three callback shapes for a key in every type's store. See
/// [`Blackboard::unsubscribe_all`].
///
/// # Errors
///
/// Returns [`BoardError::NotReady`] if [`create`] has not run.
pub fn unsubscribe_all(key: &str) -> Result<(), BoardError> {
    board().map(|b| b.unsubscribe_all(key))
}
