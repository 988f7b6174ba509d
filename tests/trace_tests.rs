use anchor_workbench::workbench::trace::{
    ExecutionTrace, ProgramInvoker, TraceReplayer, TraceStep,
};
use anchor_workbench::workbench::TraceRunner;
use anchor_workbench::Result;
use async_trait::async_trait;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[test]
fn test_load_trace_file() {
    let temp_dir = TempDir::new().unwrap();
    let trace_file = temp_dir.path().join("trace.json");

    let content = r#"[
        {"program": "lottery", "instruction": "join", "args": "[10, 5]", "label": "Join", "expected": "ok"},
        {"program": "lottery", "instruction": "revealP1", "args": ["secret"]},
        {"program": "lottery", "instruction": "winP1"}
    ]"#;

    fs::write(&trace_file, content).unwrap();

    let trace = ExecutionTrace::load(&trace_file).unwrap();
    assert_eq!(trace.steps.len(), 3);
    assert_eq!(trace.steps[0].args, "[10, 5]");
    assert_eq!(trace.steps[0].label, Some("Join".to_string()));
    assert_eq!(trace.steps[0].expected, Some("ok".to_string()));
    assert_eq!(trace.steps[1].args, r#"["secret"]"#);
    assert_eq!(trace.steps[2].args, "[]");
    assert_eq!(trace.steps[2].expected, None);
}

#[test]
fn test_load_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ExecutionTrace::load(temp_dir.path().join("absent.json"));
    assert!(result.is_err());
}

#[test]
fn test_load_rejects_non_array_json() {
    let temp_dir = TempDir::new().unwrap();
    let trace_file = temp_dir.path().join("trace.json");
    fs::write(&trace_file, r#"{"program": "p"}"#).unwrap();

    assert!(ExecutionTrace::load(&trace_file).is_err());
}

/// Scripted invoker: answers each call from a list, recording the order
/// in a log the test keeps a handle to.
struct FakeInvoker {
    outcomes: Mutex<Vec<Result<String>>>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl FakeInvoker {
    fn new(outcomes: Vec<Result<String>>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut outcomes = outcomes;
        outcomes.reverse();
        (
            FakeInvoker {
                outcomes: Mutex::new(outcomes),
                seen: Arc::clone(&seen),
            },
            seen,
        )
    }
}

#[async_trait]
impl ProgramInvoker for FakeInvoker {
    async fn invoke(&self, program: &str, instruction: &str, args: &str) -> Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push(format!("{}.{} {}", program, instruction, args));
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

fn step(instruction: &str, expected: Option<&str>) -> TraceStep {
    TraceStep {
        program: "lottery".to_string(),
        instruction: instruction.to_string(),
        args: "[]".to_string(),
        label: None,
        expected: expected.map(|s| s.to_string()),
    }
}

#[tokio::test]
async fn test_replay_is_ordered_and_error_accumulating() {
    let trace = ExecutionTrace {
        steps: vec![
            step("join", None),
            step("revealP1", Some("done")),
            step("winP1", None),
        ],
    };

    let (invoker, seen) = FakeInvoker::new(vec![
        Ok("joined".to_string()),
        Err(miette::miette!("cluster unreachable")),
        Ok("won".to_string()),
    ]);

    let replayer = TraceReplayer::new(Box::new(invoker), "unused.json".into());
    let results = replayer.replay(&trace).await;

    // Every step ran, in order, despite the middle failure
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["lottery.join []", "lottery.revealP1 []", "lottery.winP1 []"]
    );
    assert_eq!(results.len(), 3);
    assert!(results[0].success && results[0].passed);
    assert!(!results[1].success);
    assert!(results[1]
        .error
        .as_deref()
        .unwrap()
        .contains("cluster unreachable"));
    assert!(results[2].success);

    let summary = TraceReplayer::summarize(&results);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.errors, 1);
}

#[tokio::test]
async fn test_replay_checks_expected_output() {
    let trace = ExecutionTrace {
        steps: vec![step("join", Some("ok")), step("winP1", Some("ok"))],
    };

    let (invoker, _) = FakeInvoker::new(vec![Ok("ok".to_string()), Ok("nope".to_string())]);
    let replayer = TraceReplayer::new(Box::new(invoker), "unused.json".into());
    let results = replayer.replay(&trace).await;

    assert!(results[0].passed);
    assert!(results[1].success);
    assert!(!results[1].passed);

    let summary = TraceReplayer::summarize(&results);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.errors, 0);
}

#[tokio::test]
async fn test_run_execution_trace_reads_the_file() {
    let temp_dir = TempDir::new().unwrap();
    let trace_file = temp_dir.path().join("trace.json");
    fs::write(
        &trace_file,
        r#"[
            {"program": "lottery", "instruction": "join", "args": "[1]"},
            {"program": "lottery", "instruction": "winP1"}
        ]"#,
    )
    .unwrap();

    let (invoker, seen) = FakeInvoker::new(vec![Ok("a".to_string()), Ok("b".to_string())]);
    let mut replayer = TraceReplayer::new(Box::new(invoker), trace_file);
    replayer.run_execution_trace().await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["lottery.join [1]", "lottery.winP1 []"]
    );
}

#[tokio::test]
async fn test_run_execution_trace_fails_on_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let (invoker, seen) = FakeInvoker::new(vec![]);
    let mut replayer =
        TraceReplayer::new(Box::new(invoker), temp_dir.path().join("absent.json"));

    assert!(replayer.run_execution_trace().await.is_err());
    assert!(seen.lock().unwrap().is_empty());
}
