use serde::{Deserialize, Serialize};

use crate::domain::{BuildEvent, BuildReport};

/// Counts describing one type dictionary build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySummary {
    pub handlers: usize,
    pub parsers: usize,
    pub replaced_handlers: usize,
    pub untyped_handlers: usize,
    pub failed_handlers: usize,
    pub skipped_kinds: usize,
}

impl DictionarySummary {
    pub fn new(handlers: usize, parsers: usize, report: &BuildReport) -> Self {
        Self {
            handlers,
            parsers,
            replaced_handlers: report.count(|e| matches!(e, BuildEvent::HandlerReplaced { .. })),
            untyped_handlers: report
                .count(|e| matches!(e, BuildEvent::UntypedHandlerExcluded { .. })),
            failed_handlers: report
                .count(|e| matches!(e, BuildEvent::HandlerConstructionFailed { .. })),
            skipped_kinds: report.count(|e| matches!(e, BuildEvent::ParserSkipped { .. })),
        }
    }
}
