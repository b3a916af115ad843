// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.

clamped_capacity! {
    /// How many lifecycle events the diagnostics log keeps.
    ///
    /// Once full, the oldest event is dropped for each new one.
    ///
    /// # Example
    ///
    /// ```
    /// use said_toasts::domain::diagnostics::BufferCapacity;
    ///
    /// assert_eq!(BufferCapacity::new(512).value(), 512);
    /// assert_eq!(BufferCapacity::new(50_000).value(), 4096);
    /// ```
    pub struct BufferCapacity;
    bounds buffer_capacity_bounds { min: 16, max: 4096, default: 256 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_buffers_are_raised_to_sixteen_events() {
        assert_eq!(BufferCapacity::new(0).value(), 16);
        assert_eq!(BufferCapacity::new(15).value(), 16);
    }

    #[test]
    fn default_buffer_holds_256_events() {
        assert_eq!(BufferCapacity::default().value(), 256);
    }
}
