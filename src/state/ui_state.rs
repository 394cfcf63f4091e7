use facet_core::FacetEvent;

/// Which modifier key the multi-select hint should name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }
}

/// UI flow state management
/// Outbound events waiting to be reported, plus presentation settings
#[derive(Debug)]
pub struct UiState {
    /// Events emitted by the sidebar, oldest first
    pub pending_events: Vec<FacetEvent>,
    pub platform: Platform,
}

impl UiState {
    pub fn new(platform: Platform) -> Self {
        Self {
            pending_events: Vec::new(),
            platform,
        }
    }

    pub fn record(&mut self, events: Vec<FacetEvent>) {
        self.pending_events.extend(events);
    }

    /// Take and consume the pending events
    pub fn take_events(&mut self) -> Vec<FacetEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
