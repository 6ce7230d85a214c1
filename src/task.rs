use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A unit of work as supplied by the tracker-facing caller. Immutable once
/// saved into the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier; the repository's primary key.
    pub code: String,
    /// Codes of tasks that cannot start until this one is scheduled. Targets
    /// absent from the repository have no scheduling effect.
    #[serde(default)]
    pub blocks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Original estimate in hours. Zero means a same-day task.
    #[serde(default)]
    pub original_estimate_hours: f64,
    /// Remaining estimate in hours. Zero means a same-day task.
    #[serde(default)]
    pub remaining_estimate_hours: f64,
}

impl Task {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            blocks: Vec::new(),
            description: None,
            link: None,
            original_estimate_hours: 0.0,
            remaining_estimate_hours: 0.0,
        }
    }

    pub fn with_blocks<I, S>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks = blocks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_original_estimate_hours(mut self, hours: f64) -> Self {
        self.original_estimate_hours = hours;
        self
    }

    pub fn with_remaining_estimate_hours(mut self, hours: f64) -> Self {
        self.remaining_estimate_hours = hours;
        self
    }
}

/// Which per-task hour field a scheduling run reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimateSource {
    Original,
    Remaining,
}

impl EstimateSource {
    pub fn hours(&self, task: &Task) -> f64 {
        match self {
            EstimateSource::Original => task.original_estimate_hours,
            EstimateSource::Remaining => task.remaining_estimate_hours,
        }
    }
}

/// A scheduled task on the timeline. The span is end-exclusive: the task
/// consumes the working days in `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineTask {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A scheduled task plus the named resource that performs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatedTask {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub resource: String,
}
