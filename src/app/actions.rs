//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin runtime executes them in order; nothing in the application layer
//! talks to Zellij directly.
//!
//! # Example
//!
//! ```rust
//! use truckmap::app::Action;
//! use truckmap::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_catalog("~/trucks.json".to_string())),
//!     Action::ScheduleFrame(1.0 / 30.0),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Used for catalog loading and the one-shot location resolution.
    PostToWorker(WorkerMessage),

    /// Requests a timer tick after the given number of seconds.
    ///
    /// Emitted once while animations are in flight; the resulting tick
    /// advances the screen clock.
    ScheduleFrame(f64),
}
