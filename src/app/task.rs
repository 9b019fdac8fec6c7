//! One-shot device location request.
//!
//! The request runs on the worker thread and completes by posting a single
//! seed event back into the plugin event queue. A response is only applied
//! while the matching request is still pending; anything else (a stale id, a
//! cancelled request, a second response) is dropped.

use crate::domain::Coordinate;
use crate::location::Permission;

/// Lifecycle of the location request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationTask {
    /// No request was made (no location source configured, or not yet started).
    #[default]
    Idle,
    /// Waiting for the worker to answer `request_id`.
    Pending { request_id: u64 },
    /// A coordinate arrived and seeded the viewport.
    Resolved(Coordinate),
    /// Permission was granted but no coordinate could be determined.
    Unavailable,
    /// Permission was denied.
    Denied,
    /// The request was abandoned before it completed.
    Cancelled,
}

impl LocationTask {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Marks the task pending under `request_id`.
    pub fn start(&mut self, request_id: u64) {
        tracing::debug!(request_id, "location request started");
        *self = Self::Pending { request_id };
    }

    /// Abandons a pending request. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        if self.is_pending() {
            tracing::debug!("location request cancelled");
            *self = Self::Cancelled;
            true
        } else {
            false
        }
    }

    /// Marks a pending request denied without waiting for the worker.
    pub fn deny(&mut self) {
        if self.is_pending() || *self == Self::Idle {
            *self = Self::Denied;
        }
    }

    /// Applies a worker response.
    ///
    /// Returns the coordinate to seed the viewport with, or `None` when the
    /// response is stale or carries no coordinate.
    pub fn complete(
        &mut self,
        request_id: u64,
        permission: Permission,
        coordinate: Option<Coordinate>,
    ) -> Option<Coordinate> {
        match *self {
            Self::Pending { request_id: pending } if pending == request_id => {}
            _ => {
                tracing::debug!(request_id, state = ?self, "ignoring stale location response");
                return None;
            }
        }

        *self = match (permission, coordinate) {
            (Permission::Denied, _) => Self::Denied,
            (Permission::Granted, Some(coordinate)) => Self::Resolved(coordinate),
            (Permission::Granted, None) => Self::Unavailable,
        };
        tracing::debug!(state = ?self, "location request completed");

        match *self {
            Self::Resolved(coordinate) => Some(coordinate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Coordinate = Coordinate::new(37.77, -122.42);

    #[test]
    fn matching_response_resolves() {
        let mut task = LocationTask::Idle;
        task.start(7);
        assert_eq!(task.complete(7, Permission::Granted, Some(HERE)), Some(HERE));
        assert_eq!(task, LocationTask::Resolved(HERE));
    }

    #[test]
    fn stale_and_duplicate_responses_are_ignored() {
        let mut task = LocationTask::Idle;
        task.start(2);
        assert_eq!(task.complete(1, Permission::Granted, Some(HERE)), None);
        assert!(task.is_pending());

        task.complete(2, Permission::Granted, None);
        assert_eq!(task, LocationTask::Unavailable);
        assert_eq!(task.complete(2, Permission::Granted, Some(HERE)), None);
        assert_eq!(task, LocationTask::Unavailable);
    }

    #[test]
    fn cancelled_request_drops_its_response() {
        let mut task = LocationTask::Idle;
        task.start(1);
        assert!(task.cancel());
        assert!(!task.cancel());
        assert_eq!(task.complete(1, Permission::Granted, Some(HERE)), None);
        assert_eq!(task, LocationTask::Cancelled);
    }

    #[test]
    fn denial_carries_no_coordinate() {
        let mut task = LocationTask::Idle;
        task.start(1);
        assert_eq!(task.complete(1, Permission::Denied, Some(HERE)), None);
        assert_eq!(task, LocationTask::Denied);
    }
}
