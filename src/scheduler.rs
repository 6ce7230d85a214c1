use crate::calculations::{AllocationPass, TimelinePass};
use crate::calendar::WorkCalendar;
use crate::config::{ConfigError, ScheduleConfig};
use crate::graph::DependencyDag;
use crate::repository::TaskRepository;
use crate::task::{AllocatedTask, EstimateSource, TimelineTask};
use crate::task_validation::{self, TaskValidationError};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    Config(ConfigError),
    InvalidTask(String),
    CyclicDependency { code: String },
    NoResources,
    DuplicateResource { name: String },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Config(err) => write!(f, "configuration error: {err}"),
            ScheduleError::InvalidTask(msg) => write!(f, "invalid task: {msg}"),
            ScheduleError::CyclicDependency { code } => {
                write!(f, "dependency cycle detected involving task {code}")
            }
            ScheduleError::NoResources => {
                write!(f, "resource allocation requires at least one resource")
            }
            ScheduleError::DuplicateResource { name } => {
                write!(f, "resource {name} is listed more than once")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<ConfigError> for ScheduleError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TaskValidationError> for ScheduleError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value.to_string())
    }
}

/// Scheduling engine facade. Holds the validated configuration for one or more
/// runs; each run reads a repository and produces a fresh output collection.
pub struct Scheduler {
    start_date: NaiveDate,
    calendar: WorkCalendar,
}

impl Scheduler {
    pub fn new(config: &ScheduleConfig) -> Result<Self, ConfigError> {
        let calendar = config.build_calendar()?;
        Ok(Self {
            start_date: config.start_date,
            calendar,
        })
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Calendar-only precedence scheduling using the chosen estimate field.
    pub fn compute_timeline(
        &self,
        repository: &TaskRepository,
        source: EstimateSource,
    ) -> Result<Vec<TimelineTask>, ScheduleError> {
        self.check_feasibility(repository)?;
        TimelinePass::new(repository, &self.calendar).execute(self.start_date, source)
    }

    pub fn compute_original_timeline(
        &self,
        repository: &TaskRepository,
    ) -> Result<Vec<TimelineTask>, ScheduleError> {
        self.compute_timeline(repository, EstimateSource::Original)
    }

    pub fn compute_remaining_timeline(
        &self,
        repository: &TaskRepository,
    ) -> Result<Vec<TimelineTask>, ScheduleError> {
        self.compute_timeline(repository, EstimateSource::Remaining)
    }

    /// Precedence scheduling with every task assigned to one of the named
    /// resources.
    pub fn compute_allocation(
        &self,
        repository: &TaskRepository,
        resources: &[String],
        source: EstimateSource,
    ) -> Result<Vec<AllocatedTask>, ScheduleError> {
        Self::check_resources(resources)?;
        self.check_feasibility(repository)?;
        AllocationPass::new(repository, &self.calendar, resources)
            .execute(self.start_date, source)
    }

    pub fn compute_original_allocation(
        &self,
        repository: &TaskRepository,
        resources: &[String],
    ) -> Result<Vec<AllocatedTask>, ScheduleError> {
        self.compute_allocation(repository, resources, EstimateSource::Original)
    }

    pub fn compute_remaining_allocation(
        &self,
        repository: &TaskRepository,
        resources: &[String],
    ) -> Result<Vec<AllocatedTask>, ScheduleError> {
        self.compute_allocation(repository, resources, EstimateSource::Remaining)
    }

    fn check_resources(resources: &[String]) -> Result<(), ScheduleError> {
        if resources.is_empty() {
            return Err(ScheduleError::NoResources);
        }
        let mut seen = HashSet::with_capacity(resources.len());
        for name in resources {
            if !seen.insert(name.as_str()) {
                return Err(ScheduleError::DuplicateResource { name: name.clone() });
            }
        }
        Ok(())
    }

    /// Rejects invalid tasks and infeasible (cyclic) graphs before any
    /// scheduling step runs.
    fn check_feasibility(&self, repository: &TaskRepository) -> Result<(), ScheduleError> {
        task_validation::validate_repository(repository)?;
        if let Some(code) = DependencyDag::build(repository).find_cycle() {
            return Err(ScheduleError::CyclicDependency { code });
        }
        Ok(())
    }
}
