//! Stress tests for parallel blocks and concurrent sessions.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use silk_eval::{ErrorCategory, EvalErrorKind, Interpreter, Value};
use silk_ir::{Name, Node};

#[test]
fn distinct_writes_survive_repeated_runs() {
    const CHILDREN: usize = 200;
    for _ in 0..20 {
        let mut interp = Interpreter::new();
        let body = (0..CHILDREN)
            .map(|i| Node::assign(format!("slot_{i}"), Node::string(format!("{i}"))))
            .collect();
        assert_eq!(interp.execute(&Node::parallel(body)), Ok(Value::Void));
        assert_eq!(interp.globals().len(), CHILDREN);
        assert_eq!(interp.global("slot_199"), Some(Value::from("199")));
    }
}

#[test]
fn very_large_block_with_small_limit_completes() {
    const CHILDREN: usize = 60_000;
    let mut interp = Interpreter::builder().max_concurrency(2).build();
    let body = (0..CHILDREN)
        .map(|i| Node::assign(format!("v{i}"), Node::number(1.0)))
        .collect();
    assert_eq!(interp.execute(&Node::parallel(body)), Ok(Value::Void));
    assert_eq!(interp.globals().len(), CHILDREN);
    assert_eq!(interp.global("v59999"), Some(Value::number(1.0)));
}

#[test]
fn three_failures_are_all_reported() {
    let mut interp = Interpreter::new();
    interp.register_builtin("fail", |args: &[Value]| {
        Err(silk_eval::EvalError::new(format!("failure {}", args[0])))
    });
    let err = interp
        .execute(&Node::parallel(vec![
            Node::call("fail", vec![Node::number(1.0)]),
            Node::call("fail", vec![Node::number(2.0)]),
            Node::call("fail", vec![Node::number(3.0)]),
        ]))
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Aggregate);
    let messages: Vec<String> = err.aggregated().iter().map(ToString::to_string).collect();
    assert_eq!(messages, ["failure 1", "failure 2", "failure 3"].map(String::from));
    assert_eq!(
        err.to_string(),
        "3 errors in parallel block: [failure 1; failure 2; failure 3]"
    );
}

#[test]
fn all_success_yields_no_error() {
    let mut interp = Interpreter::new();
    let body = (0..8).map(|_| Node::number(1.0)).collect();
    assert_eq!(interp.execute(&Node::parallel(body)), Ok(Value::Void));
}

#[test]
fn concurrency_is_bounded_by_configuration() {
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let mut interp = Interpreter::builder().max_concurrency(2).build();
    {
        let running = Arc::clone(&running);
        let peak = Arc::clone(&peak);
        interp.register_builtin("work", move |_| {
            let now = running.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            running.fetch_sub(1, Ordering::SeqCst);
            Ok(Value::Void)
        });
    }

    let body = (0..12).map(|_| Node::call("work", vec![])).collect();
    interp.execute(&Node::parallel(body)).unwrap();
    assert!(peak.load(Ordering::SeqCst) <= 2);
    assert_eq!(running.load(Ordering::SeqCst), 0);
}

#[test]
fn parallel_children_call_shared_functions() {
    let mut interp = Interpreter::new();
    let square = Node::function(
        "square",
        &["n"],
        vec![Node::ret(Node::binary("*", Node::var("n"), Node::var("n")))],
    );
    interp.execute(&square).unwrap();

    let body = (0..16)
        .map(|i| {
            Node::assign(
                format!("sq{i}"),
                Node::call("square", vec![Node::number(f64::from(i))]),
            )
        })
        .collect();
    interp.execute(&Node::parallel(body)).unwrap();
    for i in 0..16 {
        assert_eq!(
            interp.global(&format!("sq{i}")),
            Some(Value::number(f64::from(i * i)))
        );
    }
}

#[test]
fn redeclaring_a_function_from_children_is_safe() {
    let mut interp = Interpreter::new();
    let body = (0..32)
        .map(|i| Node::function("latest", &[], vec![Node::ret(Node::number(f64::from(i)))]))
        .collect();
    interp.execute(&Node::parallel(body)).unwrap();

    // Some declaration won; whichever it was is a complete one.
    let value = interp
        .execute(&Node::call("latest", vec![]))
        .unwrap()
        .as_number()
        .unwrap();
    assert!((0.0..32.0).contains(&value));
}

#[test]
fn nested_blocks_with_single_worker_do_not_deadlock() {
    let mut interp = Interpreter::builder().max_concurrency(1).build();
    let inner = |prefix: &str| {
        Node::parallel(
            (0..3)
                .map(|i| Node::assign(format!("{prefix}{i}"), Node::number(1.0)))
                .collect(),
        )
    };
    interp
        .execute(&Node::parallel(vec![inner("a"), inner("b"), inner("c")]))
        .unwrap();
    assert_eq!(interp.globals().len(), 9);
}

#[test]
fn independent_sessions_run_concurrently() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let mut interp = Interpreter::new();
                let program = Node::program(vec![
                    Node::function(
                        "id",
                        &["x"],
                        vec![Node::ret(Node::var("x"))],
                    ),
                    Node::assign("out", Node::call("id", vec![Node::number(f64::from(i))])),
                ]);
                interp.execute(&program).unwrap();
                interp.global("out")
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = Value::number(f64::from(u32::try_from(i).unwrap()));
        assert_eq!(handle.join().unwrap(), Some(expected));
    }
}

#[test]
fn deep_failure_inside_child_keeps_its_trace() {
    let mut interp = Interpreter::new();
    let program = Node::program(vec![
        Node::function(
            "divide",
            &["a", "b"],
            vec![Node::ret(Node::binary("/", Node::var("a"), Node::var("b")))],
        ),
        Node::parallel(vec![Node::call(
            "divide",
            vec![Node::number(1.0), Node::number(0.0)],
        )]),
    ]);
    let err = interp.execute(&program).unwrap_err();
    let child = &err.aggregated()[0];
    assert_eq!(child.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(child.trace(), &[Name::new("divide")]);
}
