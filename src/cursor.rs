//! Global cursor state
//!
//! Single source of truth for the current analysis offset. Every panel
//! follows this address; changes fan out to all registered observers
//! synchronously, in registration order, before the triggering call
//! returns. A panel that reacts to a broadcast by requesting another
//! address has that request queued and applied after the in-flight
//! broadcast, so no observer ever sees a half-updated cursor.

use std::collections::VecDeque;

use crate::engine::AnalysisEngine;
use crate::error::WorkbenchError;
use crate::panel::PanelRegistry;

/// Hard cap on queued follow-up hops per user action. Two panels
/// requesting each other's addresses would otherwise ping-pong forever.
const MAX_FOLLOW_UP_HOPS: usize = 32;

/// The globally-shared "current address" all panels synchronize to
#[derive(Debug)]
pub struct CursorState {
    address: u64,
    valid: bool,
    back: Vec<u64>,
    forward: Vec<u64>,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            address: 0,
            valid: false,
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    /// Current address. Meaningful only while `is_valid` is true.
    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Move the cursor to `address` and broadcast the change
    ///
    /// Fails with `InvalidState` when no file is loaded and `OutOfRange`
    /// when the engine rejects the address; in both cases the prior
    /// cursor is retained untouched. On success the address is stored
    /// first, then every observer is notified; queued follow-up requests
    /// are applied in arrival order after the broadcast.
    pub fn set(
        &mut self,
        address: u64,
        engine: &dyn AnalysisEngine,
        registry: &mut PanelRegistry,
    ) -> Result<(), WorkbenchError> {
        if !engine.is_file_loaded() {
            return Err(WorkbenchError::InvalidState);
        }
        if !engine.validate_address(address) {
            return Err(WorkbenchError::OutOfRange(address));
        }
        if self.valid && self.address == address {
            return Ok(());
        }
        if self.valid {
            self.back.push(self.address);
        }
        self.forward.clear();
        self.apply_and_drain(address, engine, registry);
        Ok(())
    }

    /// Navigate to the previous address in the history
    ///
    /// Returns whether the cursor moved. Addresses that are no longer
    /// valid for the loaded binary are skipped.
    pub fn go_back(
        &mut self,
        engine: &dyn AnalysisEngine,
        registry: &mut PanelRegistry,
    ) -> bool {
        while let Some(previous) = self.back.pop() {
            if !engine.validate_address(previous) {
                tracing::debug!(address = format_args!("{:#x}", previous), "stale history entry skipped");
                continue;
            }
            if self.valid {
                self.forward.push(self.address);
            }
            self.apply_and_drain(previous, engine, registry);
            return true;
        }
        false
    }

    /// Navigate to the next address in the history
    pub fn go_forward(
        &mut self,
        engine: &dyn AnalysisEngine,
        registry: &mut PanelRegistry,
    ) -> bool {
        while let Some(next) = self.forward.pop() {
            if !engine.validate_address(next) {
                continue;
            }
            if self.valid {
                self.back.push(self.address);
            }
            self.apply_and_drain(next, engine, registry);
            return true;
        }
        false
    }

    /// Restore a persisted cursor after a project load
    ///
    /// History is session-local and starts fresh. An address the restored
    /// binary no longer covers leaves the cursor invalid rather than
    /// failing the load.
    pub fn restore(
        &mut self,
        address: u64,
        engine: &dyn AnalysisEngine,
        registry: &mut PanelRegistry,
    ) {
        self.back.clear();
        self.forward.clear();
        if engine.is_file_loaded() && engine.validate_address(address) {
            self.apply_and_drain(address, engine, registry);
        } else {
            tracing::warn!(
                address = format_args!("{:#x}", address),
                "saved cursor outside restored binary; cursor left unset"
            );
            self.valid = false;
        }
    }

    /// Drop the cursor and its history (new file about to open)
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.back.clear();
        self.forward.clear();
    }

    /// Store `address`, broadcast it, then work through queued follow-ups
    ///
    /// Each queued request gets its own complete broadcast; requests made
    /// during that broadcast append to the same queue. Invalid or
    /// redundant requests are dropped.
    fn apply_and_drain(
        &mut self,
        address: u64,
        engine: &dyn AnalysisEngine,
        registry: &mut PanelRegistry,
    ) {
        self.address = address;
        self.valid = true;
        let mut queue: VecDeque<u64> = registry.notify_cursor(address).into();

        let mut hops = 0;
        while let Some(requested) = queue.pop_front() {
            if requested == self.address || !engine.validate_address(requested) {
                continue;
            }
            hops += 1;
            if hops > MAX_FOLLOW_UP_HOPS {
                tracing::warn!("cursor follow-up chain truncated; panels are fighting over the cursor");
                break;
            }
            self.back.push(self.address);
            self.address = requested;
            queue.extend(registry.notify_cursor(requested));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AnalysisLevel, AnalysisReport};
    use std::path::Path;

    struct RangeEngine {
        loaded: bool,
        lo: u64,
        hi: u64,
    }

    impl AnalysisEngine for RangeEngine {
        fn is_file_loaded(&self) -> bool {
            self.loaded
        }
        fn analyze(&mut self, _: &Path, _: AnalysisLevel) -> Result<(), String> {
            Ok(())
        }
        fn poll_analysis(&mut self) -> Option<AnalysisReport> {
            None
        }
        fn validate_address(&self, address: u64) -> bool {
            self.loaded && address >= self.lo && address < self.hi
        }
        fn entry_point(&self) -> Option<u64> {
            Some(self.lo)
        }
        fn save_project_state(&mut self, _: &str) -> Result<(), String> {
            Ok(())
        }
        fn load_project_state(&mut self, _: &str) -> Result<(), String> {
            Ok(())
        }
    }

    fn engine() -> RangeEngine {
        RangeEngine {
            loaded: true,
            lo: 0x1000,
            hi: 0x2000,
        }
    }

    #[test]
    fn test_set_requires_loaded_file() {
        let mut cursor = CursorState::new();
        let mut registry = PanelRegistry::new();
        let engine = RangeEngine {
            loaded: false,
            lo: 0,
            hi: 0,
        };
        assert_eq!(
            cursor.set(0x10, &engine, &mut registry),
            Err(WorkbenchError::InvalidState)
        );
        assert!(!cursor.is_valid());
    }

    #[test]
    fn test_out_of_range_keeps_prior_cursor() {
        let mut cursor = CursorState::new();
        let mut registry = PanelRegistry::new();
        let engine = engine();
        cursor.set(0x1100, &engine, &mut registry).unwrap();
        assert_eq!(
            cursor.set(0x9000, &engine, &mut registry),
            Err(WorkbenchError::OutOfRange(0x9000))
        );
        assert_eq!(cursor.address(), 0x1100);
        assert!(cursor.is_valid());
    }

    #[test]
    fn test_back_and_forward() {
        let mut cursor = CursorState::new();
        let mut registry = PanelRegistry::new();
        let engine = engine();
        cursor.set(0x1100, &engine, &mut registry).unwrap();
        cursor.set(0x1200, &engine, &mut registry).unwrap();
        cursor.set(0x1300, &engine, &mut registry).unwrap();

        assert!(cursor.go_back(&engine, &mut registry));
        assert_eq!(cursor.address(), 0x1200);
        assert!(cursor.go_back(&engine, &mut registry));
        assert_eq!(cursor.address(), 0x1100);
        assert!(!cursor.can_go_back());

        assert!(cursor.go_forward(&engine, &mut registry));
        assert_eq!(cursor.address(), 0x1200);
    }

    #[test]
    fn test_new_set_clears_forward_history() {
        let mut cursor = CursorState::new();
        let mut registry = PanelRegistry::new();
        let engine = engine();
        cursor.set(0x1100, &engine, &mut registry).unwrap();
        cursor.set(0x1200, &engine, &mut registry).unwrap();
        cursor.go_back(&engine, &mut registry);
        cursor.set(0x1500, &engine, &mut registry).unwrap();
        assert!(!cursor.can_go_forward());
    }
}
