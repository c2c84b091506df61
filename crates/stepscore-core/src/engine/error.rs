use super::config::ConfigError;
use super::event::EventError;
use crate::core::detector::DetectorError;
use crate::core::io::sink::SinkError;
use crate::core::io::trace::TraceError;
use crate::core::models::ids::EventId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Detector error: {source}")]
    Detector {
        #[from]
        source: DetectorError,
    },

    #[error("Step table output failed: {source}")]
    Sink {
        #[from]
        source: SinkError,
    },

    #[error("Event lifecycle error: {source}")]
    Event {
        #[from]
        source: EventError,
    },

    #[error("Step trace error: {source}")]
    Trace {
        #[from]
        source: TraceError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Step in event {event_id} refers to unknown placement '{placement}'")]
    UnknownPlacement { placement: String, event_id: EventId },

    #[error("Event {event_id} reappears in the trace after it was closed")]
    EventReopened { event_id: EventId },
}
