//! Switchboard Core Runtime
//!
//! Foundational primitives for the Switchboard widget engine:
//!
//! - **Event Model**: platform-agnostic clicks, key presses and pointer crossings
//! - **Timers**: a logical-clock queue whose timers are owned by elements and
//!   can be cancelled as a group when their owner goes away
//!
//! # Example
//!
//! ```rust
//! use switchboard_core::TimerQueue;
//!
//! let mut timers: TimerQueue<u32, &str> = TimerQueue::new();
//! let fade = timers.schedule(1, 150, "hide modal");
//! timers.schedule(2, 5_000, "dismiss alert");
//!
//! // Element 2 was removed before its timer fired
//! assert_eq!(timers.cancel_owned_by(2), 1);
//!
//! let fired = timers.pop_due(200).unwrap();
//! assert_eq!(fired.id, fade);
//! assert_eq!(fired.task, "hide modal");
//! assert!(timers.pop_due(10_000).is_none());
//! ```

pub mod events;
pub mod timer;

pub use events::{Event, EventData, EventType, KeyCode, Modifiers};
pub use timer::{FiredTimer, TimerId, TimerQueue};
