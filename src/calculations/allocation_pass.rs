use crate::calendar::WorkCalendar;
use crate::repository::TaskRepository;
use crate::scheduler::ScheduleError;
use crate::task::{AllocatedTask, EstimateSource, Task};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Precedence scheduling over a fixed pool of named resources. Each task is
/// assigned to exactly one resource; tasks on the same resource never overlap.
///
/// Resource selection is a greedy list heuristic: among resources already idle
/// by the task's prospected start, the one free the longest wins; when none is
/// idle in time, the one that frees up soonest wins. Ties go to the
/// earliest-listed resource.
pub struct AllocationPass<'a> {
    repository: &'a TaskRepository,
    calendar: &'a WorkCalendar,
    resources: &'a [String],
}

impl<'a> AllocationPass<'a> {
    pub fn new(
        repository: &'a TaskRepository,
        calendar: &'a WorkCalendar,
        resources: &'a [String],
    ) -> Self {
        Self {
            repository,
            calendar,
            resources,
        }
    }

    pub fn execute(
        &self,
        start_date: NaiveDate,
        source: EstimateSource,
    ) -> Result<Vec<AllocatedTask>, ScheduleError> {
        let depends_on = self.repository.depends_on_map();
        let mut remaining = self.repository.codes();
        let mut results: HashMap<String, AllocatedTask> = HashMap::new();
        // Availability state owned by this run alone.
        let mut availability: HashMap<&str, NaiveDate> = self
            .resources
            .iter()
            .map(|name| (name.as_str(), start_date))
            .collect();
        let earliest_start = self.calendar.next_available(start_date);

        while !remaining.is_empty() {
            let ready = self.ready_tasks(&remaining, &depends_on, &results);
            if ready.is_empty() {
                return Err(ScheduleError::CyclicDependency {
                    code: self.first_remaining(&remaining),
                });
            }

            for task in ready {
                let prospected = depends_on[&task.code]
                    .iter()
                    .filter_map(|dependency| results.get(dependency))
                    .map(|scheduled| scheduled.end)
                    .max()
                    .map(|max_end| self.calendar.next_available(max_end))
                    .unwrap_or(earliest_start);

                let resource = self.select_resource(&availability, prospected);
                let resource_free = availability[resource];
                let start = self.calendar.next_available(prospected.max(resource_free));
                let days = self.calendar.duration_in_days(source.hours(task));
                let end = self.calendar.span_end(start, days);

                availability.insert(resource, end);
                remaining.remove(&task.code);
                results.insert(
                    task.code.clone(),
                    AllocatedTask {
                        code: task.code.clone(),
                        description: task.description.clone(),
                        link: task.link.clone(),
                        start,
                        end,
                        resource: resource.to_string(),
                    },
                );
            }
        }

        Ok(self.collect_in_order(results))
    }

    /// Two-phase selection: prefer a resource idle at or before `prospected`
    /// with the earliest availability; otherwise fall back to the resource
    /// that becomes free soonest. Iterating the declared resource order with a
    /// strict comparison keeps ties deterministic.
    fn select_resource(
        &self,
        availability: &HashMap<&str, NaiveDate>,
        prospected: NaiveDate,
    ) -> &'a str {
        let mut idle_pick: Option<(&'a str, NaiveDate)> = None;
        let mut overall_pick: Option<(&'a str, NaiveDate)> = None;

        for name in self.resources {
            let free_at = availability[name.as_str()];
            if free_at <= prospected
                && idle_pick.is_none_or(|(_, best)| free_at < best)
            {
                idle_pick = Some((name.as_str(), free_at));
            }
            if overall_pick.is_none_or(|(_, best)| free_at < best) {
                overall_pick = Some((name.as_str(), free_at));
            }
        }

        // The pool is validated non-empty before the pass runs.
        idle_pick
            .or(overall_pick)
            .map(|(name, _)| name)
            .unwrap_or_default()
    }

    fn ready_tasks(
        &self,
        remaining: &HashSet<String>,
        depends_on: &HashMap<String, HashSet<String>>,
        results: &HashMap<String, AllocatedTask>,
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

    fn collect_in_order(&self, mut results: HashMap<String, AllocatedTask>) -> Vec<AllocatedTask> {
        self.repository
            .codes_in_order()
            .filter_map(|code| results.remove(code))
            .collect()
    }
}
