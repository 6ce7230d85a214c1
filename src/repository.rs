use crate::task::Task;
use std::collections::{HashMap, HashSet};

/// In-memory task set for one scheduling run, keyed by task code.
///
/// Iteration follows insertion order so that repeated runs over the same input
/// resolve scheduling ties identically.
#[derive(Debug, Clone, Default)]
pub struct TaskRepository {
    tasks: HashMap<String, Task>,
    order: Vec<String>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a task under its code. `blocks` targets are not
    /// validated here; absent targets simply never block anything.
    pub fn save(&mut self, task: Task) {
        if !self.tasks.contains_key(&task.code) {
            self.order.push(task.code.clone());
        }
        self.tasks.insert(task.code.clone(), task);
    }

    pub fn get(&self, code: &str) -> Option<&Task> {
        self.tasks.get(code)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn codes(&self) -> HashSet<String> {
        self.tasks.keys().cloned().collect()
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|code| self.tasks.get(code))
    }

    /// Codes in insertion order.
    pub fn codes_in_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Transpose of the `blocks` edges, restricted to codes present in the
    /// repository: for every task, the set of tasks that must be scheduled
    /// before it. Recomputed from the full task set on each call.
    pub fn depends_on_map(&self) -> HashMap<String, HashSet<String>> {
        let mut result: HashMap<String, HashSet<String>> = self
            .tasks
            .keys()
            .map(|code| (code.clone(), HashSet::new()))
            .collect();
        for task in self.tasks.values() {
            for blocked in &task.blocks {
                if let Some(dependencies) = result.get_mut(blocked) {
                    dependencies.insert(task.code.clone());
                }
            }
        }
        result
    }
}
