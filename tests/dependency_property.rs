mod common;

use proptest::prelude::*;
use stargate::errors::StargateError;
use stargate::flow::{Orchestrator, RunContext, StatusRecord};
use stargate::types::TaskStatus;
use stargate_test_utils::builders::FlowBuilder;
use stargate_test_utils::recording_task::ExecutionLog;

use common::mock_store;

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        3 => Just(TaskStatus::Success),
        1 => Just(TaskStatus::NotStarted),
        1 => Just(TaskStatus::InProgress),
        1 => Just(TaskStatus::Failed),
    ]
}

// Section sizes plus one recorded status per task, in global order.
fn layout_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<TaskStatus>)> {
    proptest::collection::vec(1..4usize, 1..4).prop_flat_map(|sizes| {
        let total: usize = sizes.iter().sum();
        (
            Just(sizes),
            proptest::collection::vec(status_strategy(), total),
        )
    })
}

proptest! {
    #[test]
    fn task_runs_iff_everything_before_it_succeeded(
        (sizes, recorded) in layout_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let (_fs, store) = mock_store();
        let log = ExecutionLog::new();

        let mut names = Vec::new();
        let mut builder = FlowBuilder::new("prop");
        for (s, size) in sizes.iter().enumerate() {
            let tasks: Vec<String> = (0..*size).map(|t| format!("s{s}t{t}")).collect();
            let refs: Vec<&str> = tasks.iter().map(String::as_str).collect();
            builder = builder.section(&format!("sec{s}"), &refs);
            names.extend(tasks);
        }
        let flow = builder.build(&log);

        for (name, status) in names.iter().zip(&recorded) {
            if *status != TaskStatus::NotStarted {
                store.write("prop", name, &StatusRecord::new(*status, 0, "")).unwrap();
            }
        }

        let target = pick.index(names.len());
        let ready = recorded[..target].iter().all(TaskStatus::is_success);

        let result = Orchestrator::new(&store, RunContext::default())
            .execute_task(&flow, &names[target]);

        if ready {
            prop_assert!(result.is_ok());
            prop_assert_eq!(log.names(), vec![names[target].clone()]);
            prop_assert_eq!(store.read("prop", &names[target]), TaskStatus::Success);
        } else {
            let is_unmet = matches!(result, Err(StargateError::UnmetDependency { .. }));
            prop_assert!(is_unmet);
            prop_assert!(log.names().is_empty());
            prop_assert_eq!(store.read("prop", &names[target]), recorded[target]);
        }
    }
}
