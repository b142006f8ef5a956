use super::*;

use intbits_lex::scan::Scanner;
use intbits_parse::parse::Parser;
use intbits_set::{BitSetError, WORD_BITS};

fn run_on(interp: &mut Interpreter<Vec<u8>>, source: &str) -> Result<(), RuntimeError> {
    let scanned = Scanner::new(source).scan_tokens();
    assert!(scanned.errors.is_empty(), "scan errors: {:?}", scanned.errors);

    let stmts = Parser::new(
        scanned.tokens.into_iter().peekable(),
        scanned.eof_span,
        interp.interner_mut(),
    )
    .parse()
    .expect("program should parse");

    interp.interpret(&stmts)
}

fn run(source: &str) -> String {
    let mut interp = Interpreter::new(Vec::new());
    run_on(&mut interp, source).expect("program should run");
    String::from_utf8(interp.into_out()).unwrap()
}

fn run_err(source: &str) -> RuntimeErrorKind {
    let mut interp = Interpreter::new(Vec::new());
    run_on(&mut interp, source).unwrap_err().kind
}

#[test]
fn prints_inserted_elements() {
    let out = run("let s = {}; add s 1; add s 9; add s 144; print s; print len(s);");
    assert_eq!(out, "{1 9 144}\n3\n");
}

#[test]
fn empty_set_renders_braces() {
    assert_eq!(run("let s = {}; print s; print len(s); print elems(s);"), "{}\n0\n[]\n");
}

#[test]
fn union_then_intersection() {
    let out = run(
        "let s = {1 2 3};
         let t = {3 4 5};
         s |= t;
         print elems(s);
         s &= t;
         print elems(s);",
    );
    assert_eq!(out, "[1 2 3 4 5]\n[3 4 5]\n");
}

#[test]
fn binary_operators_leave_operands_alone() {
    let out = run(
        "let a = {1 2 3};
         let b = {2 3 4};
         print a | b;
         print a & b;
         print a - b;
         print a ^ b;
         print a;
         print b;",
    );
    assert_eq!(out, "{1 2 3 4}\n{2 3}\n{1}\n{1 4}\n{1 2 3}\n{2 3 4}\n");
}

#[test]
fn compound_assignment_with_mismatched_lengths() {
    let big = 3 * WORD_BITS;
    let out = run(&format!(
        "let a = {{1 {big}}};
         a &= {{1}};
         print a;
         let b = {{1}};
         b ^= {{1 {big}}};
         print b;
         let c = {{2 {big}}};
         c -= {{2}};
         print c;"
    ));
    assert_eq!(out, format!("{{1}}\n{{{big}}}\n{{{big}}}\n"));
}

#[test]
fn variables_hold_independent_copies() {
    let out = run(
        "let a = {1 2};
         let b = a;
         let c = copy(a);
         add b 3;
         remove c 1;
         print a;
         print b;
         print c;",
    );
    assert_eq!(out, "{1 2}\n{1 2 3}\n{2}\n");
}

#[test]
fn add_accepts_ints_and_sets() {
    assert_eq!(run("let s = {1}; add s 2, {3 4}, 5; print s;"), "{1 2 3 4 5}\n");
    assert_eq!(run("let s = {1, {7 8}}; print s;"), "{1 7 8}\n");
}

#[test]
fn has_reports_membership() {
    let out = run("let s = {5}; print has(s, 5); print has(s, 6); print has(s, 100000);");
    assert_eq!(out, "true\nfalse\nfalse\n");
}

#[test]
fn clear_and_compact() {
    let out = run(
        "let s = {1 500};
         clear s;
         print s;
         add s 1;
         compact s;
         print s;",
    );
    assert_eq!(out, "{}\n{1}\n");
}

#[test]
fn remove_beyond_allocated_words_fails() {
    let kind = run_err("let s = {1}; remove s 1000;");
    assert!(matches!(
        kind,
        RuntimeErrorKind::Set(BitSetError::WordNotAllocated { elem: 1000, .. })
    ));
}

#[test]
fn oversized_elements_are_runtime_errors() {
    assert!(matches!(
        run_err("let s = {}; add s 18446744073709551615;"),
        RuntimeErrorKind::Set(BitSetError::ElementTooLarge { .. })
    ));
    assert!(matches!(
        run_err("let s = {1 18446744073709551615};"),
        RuntimeErrorKind::Set(BitSetError::ElementTooLarge { .. })
    ));
}

#[test]
fn session_survives_oversized_add() {
    let mut interp = Interpreter::new(Vec::new());
    run_on(&mut interp, "let s = {7};").unwrap();
    assert!(run_on(&mut interp, "add s 18446744073709551615;").is_err());

    run_on(&mut interp, "print s; print has(s, 18446744073709551615);").unwrap();
    assert_eq!(String::from_utf8(interp.into_out()).unwrap(), "{7}\nfalse\n");
}

#[test]
fn remove_keeps_earlier_removals_on_error() {
    let mut interp = Interpreter::new(Vec::new());
    let result = run_on(&mut interp, "let s = {1 2}; remove s 1, 5000;");
    assert!(result.is_err());

    run_on(&mut interp, "print s;").unwrap();
    assert_eq!(String::from_utf8(interp.into_out()).unwrap(), "{2}\n");
}

#[test]
fn variables_survive_between_programs() {
    let mut interp = Interpreter::new(Vec::new());
    run_on(&mut interp, "let s = {4};").unwrap();
    run_on(&mut interp, "s |= {5}; print s;").unwrap();
    assert_eq!(String::from_utf8(interp.into_out()).unwrap(), "{4 5}\n");
}

#[test]
fn undefined_variable() {
    assert!(matches!(
        run_err("print nope;"),
        RuntimeErrorKind::UndefinedVariable(name) if name == "nope"
    ));
    assert!(matches!(
        run_err("nope = {};"),
        RuntimeErrorKind::UndefinedVariable(_)
    ));
}

#[test]
fn type_errors() {
    assert!(matches!(
        run_err("print {1} | 2;"),
        RuntimeErrorKind::TypeError {
            expected: "set",
            found: "int"
        }
    ));
    assert!(matches!(
        run_err("let n = 3; add n 1;"),
        RuntimeErrorKind::TypeError {
            expected: "set",
            found: "int"
        }
    ));
    assert!(matches!(
        run_err("let s = {true};"),
        RuntimeErrorKind::TypeError {
            expected: "int or set",
            found: "bool"
        }
    ));
    assert!(matches!(
        run_err("let s = {}; remove s {1};"),
        RuntimeErrorKind::TypeError {
            expected: "int",
            found: "set"
        }
    ));
}

#[test]
fn builtin_arity_is_checked() {
    assert!(matches!(
        run_err("print has({1});"),
        RuntimeErrorKind::ArityMismatch {
            func: Builtin::Has,
            expected: 2,
            found: 1
        }
    ));
    assert!(matches!(
        run_err("print len();"),
        RuntimeErrorKind::ArityMismatch {
            func: Builtin::Len,
            expected: 1,
            found: 0
        }
    ));
}

#[test]
fn reassignment_can_change_type() {
    assert_eq!(run("let x = {1}; x = len(x); print x;"), "1\n");
}
