use npc_core::{Status, TaskState};

#[test]
fn fresh_state_has_never_started() {
    let state = TaskState::new();
    assert_eq!(state.status(), Status::NotStarted);
    assert!(!state.is_active());
}

#[test]
fn begin_enters_active() {
    let mut state = TaskState::new();
    state.begin();
    assert_eq!(state.status(), Status::Active);
    assert!(state.is_active());
}

#[test]
fn halt_on_active_stops() {
    let mut state = TaskState::new();
    state.begin();
    state.halt();
    assert_eq!(state.status(), Status::Stopped);
}

#[test]
fn halt_on_never_started_is_a_no_op() {
    let mut state = TaskState::new();
    state.halt();
    assert_eq!(state.status(), Status::NotStarted);
}

#[test]
fn halt_keeps_finished() {
    let mut state = TaskState::new();
    state.begin();
    state.finish();
    state.halt();
    assert_eq!(state.status(), Status::Finished);
}

#[test]
fn stopped_can_restart() {
    let mut state = TaskState::new();
    state.begin();
    state.halt();
    state.begin();
    assert_eq!(state.status(), Status::Active);
}

#[test]
fn finished_can_restart() {
    let mut state = TaskState::new();
    state.begin();
    state.finish();
    state.begin();
    assert_eq!(state.status(), Status::Active);
}
