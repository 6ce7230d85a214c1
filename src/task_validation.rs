use crate::repository::TaskRepository;
use crate::task::Task;
use std::fmt;

#[derive(Debug, Clone)]
pub struct TaskValidationError {
    message: String,
}

impl TaskValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskValidationError {}

pub fn validate_task(task: &Task) -> Result<(), TaskValidationError> {
    if task.code.trim().is_empty() {
        return Err(TaskValidationError::new("task has an empty code"));
    }

    for (field, hours) in [
        ("original_estimate_hours", task.original_estimate_hours),
        ("remaining_estimate_hours", task.remaining_estimate_hours),
    ] {
        if !hours.is_finite() || hours < 0.0 {
            return Err(TaskValidationError::new(format!(
                "task {} has invalid {field} {hours} (must be a non-negative number)",
                task.code
            )));
        }
    }

    if task.blocks.iter().any(|blocked| blocked == &task.code) {
        return Err(TaskValidationError::new(format!(
            "task {} lists itself in its blocks",
            task.code
        )));
    }

    Ok(())
}

pub fn validate_repository(repository: &TaskRepository) -> Result<(), TaskValidationError> {
    for task in repository.tasks() {
        validate_task(task)?;
    }
    Ok(())
}
