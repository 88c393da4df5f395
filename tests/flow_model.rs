use stargate::errors::{LookupKind, StargateError};
use stargate::flow::{BUILD_SECTION, Flow, FlowManager, TaskId, VIVADO_FLOW, vivado_flow};
use stargate_test_utils::builders::FlowBuilder;
use stargate_test_utils::recording_task::{ExecutionLog, RecordingTask};

#[test]
fn ranks_follow_insertion_order() {
    let log = ExecutionLog::new();
    let flow = FlowBuilder::new("demo")
        .section("build", &["synth", "impl"])
        .section("run", &["program"])
        .build(&log);

    assert_eq!(flow.section("build").unwrap().rank(), 0);
    assert_eq!(flow.section("run").unwrap().rank(), 1);
    assert_eq!(flow.section("build").unwrap().task_rank("impl"), Some(1));
    assert_eq!(flow.locate_task("program"), Some(TaskId { section: 1, task: 0 }));
    assert_eq!(flow.locate_task("missing"), None);
}

#[test]
fn global_order_is_section_then_task_rank() {
    let log = ExecutionLog::new();
    let flow = FlowBuilder::new("demo")
        .section("build", &["a", "b", "c"])
        .section("run", &["d"])
        .build(&log);

    let ids: Vec<TaskId> = flow.tasks_in_order().map(|(id, _, _)| id).collect();
    let names: Vec<&str> = flow.tasks_in_order().map(|(_, _, t)| t.name()).collect();

    assert_eq!(names, vec!["a", "b", "c", "d"]);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(TaskId { section: 0, task: 9 } < TaskId { section: 1, task: 0 });
}

#[test]
fn duplicate_section_is_rejected() {
    let mut flow = Flow::new("demo");
    flow.add_section("build").unwrap();

    let err = flow.add_section("build").unwrap_err();

    assert!(matches!(
        err,
        StargateError::DuplicateName { kind: LookupKind::Section, .. }
    ));
    assert_eq!(flow.sections().len(), 1);
}

#[test]
fn duplicate_task_is_rejected_across_sections() {
    let log = ExecutionLog::new();
    let mut flow = Flow::new("demo");
    let build = flow.add_section("build").unwrap();
    let run = flow.add_section("run").unwrap();
    flow.add_task(build, Box::new(RecordingTask::new("a", &log))).unwrap();

    let same_section = flow.add_task(build, Box::new(RecordingTask::new("a", &log)));
    let other_section = flow.add_task(run, Box::new(RecordingTask::new("a", &log)));

    assert!(matches!(
        same_section,
        Err(StargateError::DuplicateName { kind: LookupKind::Task, .. })
    ));
    assert!(matches!(
        other_section,
        Err(StargateError::DuplicateName { kind: LookupKind::Task, .. })
    ));
    assert_eq!(flow.section("build").unwrap().len(), 1);
    assert!(flow.section("run").unwrap().is_empty());
}

#[test]
fn builtin_vivado_flow_shape() {
    let flow = vivado_flow().unwrap();

    assert_eq!(flow.name(), VIVADO_FLOW);
    let build = flow.build_section().unwrap();
    assert_eq!(build.name(), BUILD_SECTION);
    assert_eq!(
        build.task_names().collect::<Vec<_>>(),
        vec!["synth", "impl", "bitstream"]
    );
    assert!(flow.run_section().is_none());
}

#[test]
fn manager_rejects_duplicate_flows_and_reports_missing_ones() {
    let mut manager = FlowManager::with_builtin_flows().unwrap();

    assert!(manager.flow(VIVADO_FLOW).is_some());
    assert!(matches!(
        manager.register(Flow::new(VIVADO_FLOW)),
        Err(StargateError::DuplicateName { kind: LookupKind::Flow, .. })
    ));

    let id = manager.register(Flow::new("quartus")).unwrap();
    assert_eq!(manager.get(id).unwrap().name(), "quartus");
    assert_eq!(manager.flows().len(), 2);

    let err = manager.require("yosys").unwrap_err();
    assert!(matches!(err, StargateError::NotFound { kind: LookupKind::Flow, .. }));
    assert_eq!(err.exit_code(), 3);
}
