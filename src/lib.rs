//! # blackboard
//!
//! A thread-safe, type-aware blackboard for sharing named values between
//! independent parts of a program.
//!
//! `blackboard` keeps one homogeneous store per value type behind a single
//! lock, so components can exchange values of arbitrary types without sharing
//! any compile-time knowledge beyond the call site, and can subscribe to be
//! told when a key they care about changes. Keys are scoped per type:
//! `"score"` may hold an `i32` and an `f64` at the same time without either
//! store seeing the other.
//!
//! ## Key Features
//!
//! - **Type-safe**: each value type gets its own store, resolved by runtime
//!   type identity; a lookup never hands back the wrong type
//! - **Thread-safe**: one re-entrant lock covers every operation end to end,
//!   so no half-written state is ever observable
//! - **Change notifications**: up to three callbacks per key (key-only,
//!   value-only, and key-and-value) fire in a fixed order on every write
//! - **Re-entrant**: a callback may read from or write to the board while the
//!   write that triggered it is still on the stack
//! - **Two surfaces**: pass a cloned [`Blackboard`] handle around, or use the
//!   [`create`]/[`destroy`] lifecycle and the free functions against one
//!   process-wide instance
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use blackboard::{Blackboard, BoardError};
//!
//! fn main() -> Result<(), BoardError> {
//!     let board = Blackboard::new();
//!
//!     // Store values of different types, even under the same key
//!     board.write("answer", 42i32);
//!     board.write("answer", "forty-two".to_string());
//!     board.write("pi", 3.14f64);
//!
//!     // Each type reads back its own value
//!     let num: i32 = board.read("answer")?;
//!     let text: String = board.read("answer")?;
//!     assert_eq!(num, 42);
//!     assert_eq!(text, "forty-two");
//!
//!     // Absent keys are an explicit failure, never a default value
//!     match board.read::<bool>("answer") {
//!         Ok(value) => println!("Value: {}", value),
//!         Err(BoardError::KeyNotFound { key, .. }) => {
//!             println!("No bool stored under ({})", key)
//!         }
//!         Err(e) => println!("Other error: {}", e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Watching a Key for Changes
//!
//! ```rust
//! use blackboard::Blackboard;
//! use std::sync::{Arc, Mutex};
//!
//! let board = Blackboard::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let log = Arc::clone(&seen);
//! board.subscribe_value("score", move |v: &i32| {
//!     log.lock().unwrap().push(*v);
//! });
//!
//! board.write("score", 10i32);
//! board.write("score", 42i32);
//! board.write_silent("score", 7i32); // no notification
//!
//! assert_eq!(*seen.lock().unwrap(), vec![10, 42]);
//! ```
//!
//! ### One Process-Wide Board
//!
//! ```rust
//! use blackboard::BoardError;
//!
//! fn main() -> Result<(), BoardError> {
//!     // Components calling into this module all see the same board.
//!     assert!(blackboard::create());
//!
//!     blackboard::write("ready", true)?;
//!     assert_eq!(blackboard::read::<bool>("ready")?, true);
//!
//!     // wipe_key clears the key for every type at once
//!     blackboard::write("ready", 1i32)?;
//!     blackboard::wipe_key("ready")?;
//!     assert!(!blackboard::contains_key::<bool>("ready")?);
//!     assert!(!blackboard::contains_key::<i32>("ready")?);
//!
//!     blackboard::destroy();
//!     assert!(!blackboard::is_ready());
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Sharing a Handle Between Components
//!
//! ```rust
//! use blackboard::{Blackboard, BoardError};
//!
//! struct Telemetry {
//!     board: Blackboard,
//! }
//!
//! impl Telemetry {
//!     fn new(board: Blackboard) -> Self {
//!         Self { board }
//!     }
//!
//!     fn record_sample(&self, value: f64) -> Result<(), BoardError> {
//!         if !self.board.contains_key::<Vec<f64>>("samples") {
//!             self.board.write_silent("samples", Vec::<f64>::new());
//!         }
//!         self.board.with_mut("samples", |samples: &mut Vec<f64>| {
//!             samples.push(value);
//!         })
//!     }
//!
//!     fn sample_count(&self) -> Result<usize, BoardError> {
//!         self.board.with("samples", |samples: &Vec<f64>| samples.len())
//!     }
//! }
//!
//! fn main() -> Result<(), BoardError> {
//!     let board = Blackboard::new();
//!     let telemetry = Telemetry::new(board.clone());
//!
//!     telemetry.record_sample(0.5)?;
//!     telemetry.record_sample(0.7)?;
//!     assert_eq!(telemetry.sample_count()?, 2);
//!
//!     Ok(())
//! }
//! ```

mod board;
mod error;
mod global;
mod store;

pub use board::Blackboard;
pub use error::BoardError;
pub use global::{
    contains_key, create, destroy, is_ready, keys, read, subscribe_key, subscribe_pair,
    subscribe_value, unsubscribe, unsubscribe_all, wipe_board, wipe_key, wipe_type_key, with,
    with_mut, write, write_silent,
};
pub use store::{KeyCallback, PairCallback, ValueCallback};

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};
