pub mod calculations;
pub mod calendar;
pub mod config;
pub mod graph;
pub mod repository;
pub mod scheduler;
pub mod task;
pub(crate) mod task_validation;

pub use calendar::WorkCalendar;
pub use config::{ConfigError, ScheduleConfig};
pub use repository::TaskRepository;
pub use scheduler::{ScheduleError, Scheduler};
pub use task::{AllocatedTask, EstimateSource, Task, TimelineTask};
