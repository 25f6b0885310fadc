use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_handler_captures_lines() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.println("world");
    assert_eq!(handler.output(), "hello\nworld\n");
    assert_eq!(handler.lines(), vec!["hello".to_string(), "world".to_string()]);
}

#[test]
fn buffer_handler_clear() {
    let handler = buffer_handler();
    handler.println("gone");
    handler.clear();
    assert_eq!(handler.output(), "");
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");
    assert_eq!(stdout_handler().output(), "");
}

#[test]
fn print_builtin_joins_with_spaces() {
    let handler = buffer_handler();
    let print = print_builtin(Arc::clone(&handler));
    let result = print
        .call(&[
            Value::from("Result:"),
            Value::number(8.0),
            Value::Bool(true),
            Value::Void,
        ])
        .unwrap();
    assert_eq!(result, Value::Void);
    assert_eq!(handler.output(), "Result: 8 true <nil>\n");
}

#[test]
fn print_builtin_with_no_args_prints_empty_line() {
    let handler = buffer_handler();
    print_builtin(Arc::clone(&handler)).call(&[]).unwrap();
    assert_eq!(handler.output(), "\n");
}

#[test]
fn print_builtin_is_named_print() {
    assert_eq!(print_builtin(silent_handler()).name().as_str(), "print");
}
