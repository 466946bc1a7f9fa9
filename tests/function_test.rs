mod common;
use basic::lang::Program;
use basic::mach::{Environment, Runtime, Transcript};
use common::*;

#[test]
fn test_numeric_functions() {
    assert_eq!(exec("10 PRINT ABS(-2.5), INT(7.9), INT(-7.9)"), "2.5 7 -7\n");
    assert_eq!(exec("10 PRINT SQR(16), SIN(0), COS(0)"), "4 0 1\n");
}

#[test]
fn test_string_functions() {
    assert_eq!(exec("10 PRINT LEN(\"HELLO\"), LEN(\"\")"), "5 0\n");
    assert_eq!(exec("10 PRINT MID$(\"HELLO WORLD\", 7, 5)"), "WORLD\n");
    assert_eq!(exec("10 PRINT \"[\" + MID$(\"ABC\", 9, 1) + \"]\""), "[]\n");
    assert_eq!(exec("10 PRINT \"[\" + MID$(\"ABC\", 2, -1) + \"]\""), "[]\n");
    assert_eq!(exec("10 A$ = STR$(2.5)\n20 PRINT A$ + \"!\""), "2.5!\n");
    assert_eq!(exec("10 PRINT VAL(\"12\") + 1"), "13\n");
}

#[test]
fn test_names_are_case_insensitive() {
    assert_eq!(exec("10 print len(\"abc\"), Abs(-1)"), "3 1\n");
}

#[test]
fn test_call_errors() {
    assert_eq!(
        exec_err("10 PRINT FOO(1)"),
        "runtime error at line 10: unknown function: FOO"
    );
    assert_eq!(
        exec_err("10 PRINT ABS(1, 2)"),
        "runtime error at line 10: function ABS expects 1 argument(s), got 2"
    );
    assert_eq!(
        exec_err("10 PRINT LEN(5)"),
        "runtime error at line 10: argument 1 must be string"
    );
    assert_eq!(
        exec_err("10 PRINT VAL(\"ten\")"),
        "runtime error at line 10: cannot convert string 'ten' to number"
    );
    assert_eq!(
        exec_err("10 PRINT SQR(-1)"),
        "runtime error at line 10: SQR of negative number"
    );
}

#[test]
fn test_rnd_is_seeded() {
    let p: Program = "10 FOR I = 1 TO 5\n20 PRINT RND\n30 NEXT I".parse().unwrap();
    let run = |seed| {
        let mut console = Transcript::new();
        Runtime::new()
            .execute(&p, &mut Environment::with_seed(seed), &mut console)
            .unwrap();
        console.output().to_string()
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8));
    for line in run(7).lines() {
        let x: f64 = line.parse().unwrap();
        assert!((0.0..1.0).contains(&x));
    }
}

#[test]
fn test_mid_with_nan_arguments() {
    assert_eq!(exec("10 PRINT \"[\" + MID$(\"ABC\", VAL(\"nan\"), 1) + \"]\""), "[]\n");
    assert_eq!(exec("10 PRINT \"[\" + MID$(\"ABC\", 10^400 - 10^400, 1) + \"]\""), "[]\n");
    assert_eq!(exec("10 PRINT \"[\" + MID$(\"ABC\", 1, VAL(\"nan\")) + \"]\""), "[]\n");
}
