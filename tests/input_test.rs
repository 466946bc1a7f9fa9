mod common;
use basic::lang::ErrorCode;
use common::*;

#[test]
fn test_input_number() {
    let (result, console) = run_with_input("10 INPUT X\n20 PRINT X * 2", &[" 21 "]);
    result.unwrap();
    assert_eq!(console.output(), "? 42\n");
}

#[test]
fn test_input_string_keeps_text() {
    let (result, console) =
        run_with_input("10 INPUT \"Name? \"; N$\n20 PRINT \"HI \" + N$", &["  Ada "]);
    result.unwrap();
    assert_eq!(console.output(), "Name? HI   Ada \n");
}

#[test]
fn test_input_not_a_number() {
    let (result, console) = run_with_input("10 INPUT X", &["abc"]);
    let e = result.unwrap_err();
    assert_eq!(e.code(), ErrorCode::CannotConvert);
    assert_eq!(
        e.to_string(),
        "runtime error at line 10: cannot convert string 'abc' to number"
    );
    assert_eq!(console.output(), "? ");
}

#[test]
fn test_input_past_end() {
    let (result, _) = run_with_input("10 INPUT A\n20 INPUT B", &["1"]);
    let e = result.unwrap_err();
    assert_eq!(e.code(), ErrorCode::InputPastEnd);
    assert_eq!(e.line_number(), Some(20));
}
