use crate::calendar::WorkCalendar;
use crate::repository::TaskRepository;
use crate::scheduler::ScheduleError;
use crate::task::{EstimateSource, Task, TimelineTask};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Precedence-only scheduling: assigns each task the earliest start allowed by
/// its dependencies and the calendar.
pub struct TimelinePass<'a> {
    repository: &'a TaskRepository,
    calendar: &'a WorkCalendar,
}

impl<'a> TimelinePass<'a> {
    pub fn new(repository: &'a TaskRepository, calendar: &'a WorkCalendar) -> Self {
        Self {
            repository,
            calendar,
        }
    }

    pub fn execute(
        &self,
        start_date: NaiveDate,
        source: EstimateSource,
    ) -> Result<Vec<TimelineTask>, ScheduleError> {
        let depends_on = self.repository.depends_on_map();
        let mut remaining = self.repository.codes();
        let mut results: HashMap<String, TimelineTask> = HashMap::new();
        let earliest_start = self.calendar.next_available(start_date);

        while !remaining.is_empty() {
            let ready = self.ready_tasks(&remaining, &depends_on, &results);
            if ready.is_empty() {
                // No task can make progress; the remaining tasks form a cycle.
                return Err(ScheduleError::CyclicDependency {
                    code: self.first_remaining(&remaining),
                });
            }

            for task in ready {
                let candidate = depends_on[&task.code]
                    .iter()
                    .filter_map(|dependency| results.get(dependency))
                    .map(|scheduled| scheduled.end)
                    .max()
                    .unwrap_or(earliest_start);
                let start = self.calendar.next_available(candidate);
                let days = self.calendar.duration_in_days(source.hours(task));
                let end = self.calendar.span_end(start, days);

                remaining.remove(&task.code);
                results.insert(
                    task.code.clone(),
                    TimelineTask {
                        code: task.code.clone(),
                        description: task.description.clone(),
                        link: task.link.clone(),
                        start,
                        end,
                    },
                );
            }
        }

        Ok(self.collect_in_order(results))
    }

    /// Tasks whose every dependency is already scheduled, in insertion order.
    fn ready_tasks(
        &self,
        remaining: &HashSet<String>,
        depends_on: &HashMap<String, HashSet<String>>,
        results: &HashMap<String, TimelineTask>,
    ) -> Vec<&'a Task> {
        self.repository
            .tasks()
            .filter(|task| remaining.contains(&task.code))
            .filter(|task| {
                depends_on[&task.code]
                    .iter()
                    .all(|dependency| results.contains_key(dependency))
            })
            .collect()
    }

    fn first_remaining(&self, remaining: &HashSet<String>) -> String {
        self.repository
            .codes_in_order()
            .find(|code| remaining.contains(*code))
            .unwrap_or_default()
            .to_string()
    }

    fn collect_in_order(&self, mut results: HashMap<String, TimelineTask>) -> Vec<TimelineTask> {
        self.repository
            .codes_in_order()
            .filter_map(|code| results.remove(code))
            .collect()
    }
}
