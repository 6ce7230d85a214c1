use chrono::NaiveDate;
use gantt_engine::{
    AllocatedTask, ScheduleConfig, ScheduleError, Scheduler, Task, TaskRepository,
};
use std::collections::HashMap;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday 2024-01-01, 8h days, no exclusions.
fn open_scheduler() -> Scheduler {
    Scheduler::new(&ScheduleConfig::new(d(2024, 1, 1), 8.0)).unwrap()
}

fn resources(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn by_code(tasks: Vec<AllocatedTask>) -> HashMap<String, AllocatedTask> {
    tasks.into_iter().map(|t| (t.code.clone(), t)).collect()
}

#[test]
fn three_tasks_over_two_resources() {
    let mut repo = TaskRepository::new();
    for code in ["A", "B", "C"] {
        repo.save(Task::new(code).with_original_estimate_hours(8.0));
    }

    let pool = resources(&["r1", "r2"]);
    let result = by_code(
        open_scheduler()
            .compute_original_allocation(&repo, &pool)
            .unwrap(),
    );

    // First two tasks run in parallel on day one; the third waits for
    // whichever resource frees first.
    assert_eq!(result["A"].start, d(2024, 1, 1));
    assert_eq!(result["A"].resource, "r1");
    assert_eq!(result["B"].start, d(2024, 1, 1));
    assert_eq!(result["B"].resource, "r2");
    assert_eq!(result["C"].start, d(2024, 1, 2));
    assert_eq!(result["C"].end, d(2024, 1, 3));
}

#[test]
fn most_idle_resource_is_preferred() {
    let mut repo = TaskRepository::new();
    repo.save(
        Task::new("A")
            .with_blocks(["C"])
            .with_original_estimate_hours(16.0),
    );
    repo.save(Task::new("B").with_original_estimate_hours(8.0));
    repo.save(Task::new("C").with_original_estimate_hours(8.0));

    let pool = resources(&["r1", "r2"]);
    let result = by_code(
        open_scheduler()
            .compute_original_allocation(&repo, &pool)
            .unwrap(),
    );

    // A occupies r1 until Jan 3, B frees r2 on Jan 2. When C becomes ready on
    // Jan 3 both resources are idle; r2 has been free longer and wins.
    assert_eq!(result["A"].resource, "r1");
    assert_eq!(result["B"].resource, "r2");
    assert_eq!(result["C"].resource, "r2");
    assert_eq!(result["C"].start, d(2024, 1, 3));
}

#[test]
fn soonest_free_resource_wins_when_none_is_idle() {
    let mut repo = TaskRepository::new();
    repo.save(Task::new("A").with_original_estimate_hours(24.0));
    repo.save(Task::new("B").with_original_estimate_hours(8.0));
    repo.save(Task::new("C").with_original_estimate_hours(8.0));

    let pool = resources(&["r1", "r2"]);
    let result = by_code(
        open_scheduler()
            .compute_original_allocation(&repo, &pool)
            .unwrap(),
    );

    // C is ready on day one but both resources are busy; r2 frees first.
    assert_eq!(result["C"].resource, "r2");
    assert_eq!(result["C"].start, d(2024, 1, 2));
    assert_eq!(result["C"].end, d(2024, 1, 3));
}

#[test]
fn availability_ties_go_to_the_first_listed_resource() {
    let mut repo = TaskRepository::new();
    repo.save(Task::new("A").with_original_estimate_hours(8.0));

    let pool = resources(&["alpha", "beta"]);
    let result = open_scheduler()
        .compute_original_allocation(&repo, &pool)
        .unwrap();

    assert_eq!(result[0].resource, "alpha");
}

#[test]
fn tasks_on_one_resource_never_overlap() {
    let mut repo = TaskRepository::new();
    for i in 0..8 {
        repo.save(Task::new(format!("T-{i}")).with_original_estimate_hours(12.0));
    }

    let pool = resources(&["r1", "r2", "r3"]);
    let result = open_scheduler()
        .compute_original_allocation(&repo, &pool)
        .unwrap();
    assert_eq!(result.len(), 8);

    let mut per_resource: HashMap<&str, Vec<(NaiveDate, NaiveDate)>> = HashMap::new();
    for task in &result {
        per_resource
            .entry(task.resource.as_str())
            .or_default()
            .push((task.start, task.end));
    }
    for intervals in per_resource.values_mut() {
        intervals.sort();
        for pair in intervals.windows(2) {
            assert!(
                pair[0].1 <= pair[1].0,
                "overlapping intervals {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn precedence_holds_across_resources() {
    let mut repo = TaskRepository::new();
    repo.save(
        Task::new("A")
            .with_blocks(["C"])
            .with_original_estimate_hours(8.0),
    );
    repo.save(Task::new("B").with_original_estimate_hours(8.0));
    repo.save(Task::new("C").with_original_estimate_hours(8.0));

    let pool = resources(&["r1", "r2"]);
    let result = by_code(
        open_scheduler()
            .compute_original_allocation(&repo, &pool)
            .unwrap(),
    );

    assert!(result["C"].start >= result["A"].end);
}

#[test]
fn weekend_gap_does_not_double_book_a_resource() {
    // Both tasks end up on the single resource; the second starts only after
    // the first's span, which straddles a weekend.
    let config = ScheduleConfig::new(d(2024, 1, 5), 8.0)
        .with_excluded_weekday_numbers(&[5, 6])
        .unwrap();
    let scheduler = Scheduler::new(&config).unwrap();

    let mut repo = TaskRepository::new();
    repo.save(Task::new("A").with_original_estimate_hours(16.0));
    repo.save(Task::new("B").with_original_estimate_hours(8.0));

    let pool = resources(&["solo"]);
    let result = by_code(scheduler.compute_original_allocation(&repo, &pool).unwrap());

    assert_eq!(result["A"].start, d(2024, 1, 5));
    assert_eq!(result["A"].end, d(2024, 1, 9));
    assert_eq!(result["B"].start, d(2024, 1, 9));
    assert_eq!(result["B"].end, d(2024, 1, 10));
}

#[test]
fn zero_estimate_task_does_not_hold_a_resource() {
    let mut repo = TaskRepository::new();
    repo.save(Task::new("A"));
    repo.save(Task::new("B").with_original_estimate_hours(8.0));

    let pool = resources(&["r1"]);
    let result = by_code(
        open_scheduler()
            .compute_original_allocation(&repo, &pool)
            .unwrap(),
    );

    assert_eq!(result["A"].start, result["A"].end);
    assert_eq!(result["B"].start, d(2024, 1, 1));
}

#[test]
fn remaining_mode_allocates_with_remaining_estimates() {
    let mut repo = TaskRepository::new();
    repo.save(
        Task::new("A")
            .with_original_estimate_hours(24.0)
            .with_remaining_estimate_hours(8.0),
    );

    let pool = resources(&["r1"]);
    let scheduler = open_scheduler();
    let original = by_code(scheduler.compute_original_allocation(&repo, &pool).unwrap());
    let remaining = by_code(scheduler.compute_remaining_allocation(&repo, &pool).unwrap());

    assert_eq!(original["A"].end, d(2024, 1, 4));
    assert_eq!(remaining["A"].end, d(2024, 1, 2));
}

#[test]
fn empty_resource_pool_is_rejected() {
    let mut repo = TaskRepository::new();
    repo.save(Task::new("A"));

    let err = open_scheduler()
        .compute_original_allocation(&repo, &[])
        .unwrap_err();
    assert_eq!(err, ScheduleError::NoResources);
}

#[test]
fn duplicate_resource_names_are_rejected() {
    let mut repo = TaskRepository::new();
    repo.save(Task::new("A"));

    let pool = resources(&["r1", "r1"]);
    let err = open_scheduler()
        .compute_original_allocation(&repo, &pool)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::DuplicateResource { .. }));
}

#[test]
fn dependency_cycle_is_rejected_before_allocation() {
    let mut repo = TaskRepository::new();
    repo.save(Task::new("A").with_blocks(["B"]));
    repo.save(Task::new("B").with_blocks(["A"]));

    let pool = resources(&["r1"]);
    let err = open_scheduler()
        .compute_original_allocation(&repo, &pool)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::CyclicDependency { .. }));
}

#[test]
fn repeated_runs_assign_identically() {
    let mut repo = TaskRepository::new();
    repo.save(Task::new("A").with_original_estimate_hours(8.0));
    repo.save(Task::new("B").with_original_estimate_hours(8.0));
    repo.save(Task::new("C").with_blocks(["A"]).with_original_estimate_hours(16.0));
    repo.save(Task::new("D").with_original_estimate_hours(4.0));

    let pool = resources(&["r1", "r2"]);
    let scheduler = open_scheduler();
    let first = scheduler.compute_original_allocation(&repo, &pool).unwrap();
    let second = scheduler.compute_original_allocation(&repo, &pool).unwrap();
    assert_eq!(first, second);
}
