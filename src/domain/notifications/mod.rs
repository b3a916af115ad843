// SPDX-License-Identifier: MPL-2.0
//! Notification queue domain types.

clamped_capacity! {
    /// Maximum number of toasts held by the queue.
    ///
    /// Inserting past this limit evicts the oldest toast immediately.
    ///
    /// # Example
    ///
    /// ```
    /// use said_toasts::domain::notifications::QueueCapacity;
    ///
    /// assert_eq!(QueueCapacity::default().value(), 4);
    /// assert_eq!(QueueCapacity::new(0).value(), 1);
    /// ```
    pub struct QueueCapacity;
    bounds queue_capacity_bounds { min: 1, max: 16, default: 4 }
}
