//! Platform abstraction layer
//!
//! Seams between the session and its host:
//! - Time/scheduling (frame requests, intervals, one-shot delays)
//! - Outbound UI notifications

pub mod clock;
pub mod ui;

pub use clock::{Clock, ManualClock, Scheduled, TaskHandle, TaskKind};
pub use ui::{LogUi, RecordingUi, UiEvent, UiPort};
