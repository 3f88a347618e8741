//! Integration tests for the banter REPL.
//!
//! These tests run scripted sessions through `Repl::process_line` and
//! verify behavior end to end.

use banter_repl::Repl;

/// Helper to run multiple lines through one REPL session and collect
/// outputs. Blank lines and `#` comment lines are skipped.
fn run_script(script: &str) -> Vec<String> {
    let mut repl = Repl::new();
    let mut outputs = Vec::new();

    for line in script.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match repl.process_line(trimmed) {
            Ok(Some(output)) => outputs.push(output),
            Ok(None) => {}
            Err(e) => outputs.push(format!("ERROR: {}", e)),
        }
    }

    outputs
}

/// Helper to check if output contains expected strings.
fn outputs_contain(outputs: &[String], expected: &[&str]) -> bool {
    let joined = outputs.join("\n");
    expected.iter().all(|e| joined.contains(e))
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn set_number_then_show_displays_decimal_rendering() {
    let outputs = run_script(
        r#"
        set x to 42
        show x
        set y to 2.5
        show y
    "#,
    );
    assert!(outputs_contain(&outputs, &["x: 42", "y: 2.5"]));
}

#[test]
fn show_is_idempotent() {
    let outputs = run_script(
        r#"
        set x to 7
        show x
        show x
    "#,
    );
    assert_eq!(outputs[1], outputs[2]);
}

#[test]
fn reassignment_across_variants_is_legal() {
    let outputs = run_script(
        r#"
        set x to 1
        set x to "now text"
        show x
    "#,
    );
    assert!(outputs_contain(&outputs, &["x: now text"]));
}

#[test]
fn show_zero_and_empty_string_are_not_undefined() {
    // Presence decides, not truthiness
    let outputs = run_script(
        r#"
        set z to 0
        set e to ""
        show z
        show e
    "#,
    );
    assert!(outputs_contain(&outputs, &["z: 0"]));
    assert!(!outputs_contain(&outputs, &["not defined"]));
}

#[test]
fn show_undefined_variable_reports_error() {
    let outputs = run_script("show ghost");
    assert!(outputs_contain(&outputs, &["ERROR: Variable 'ghost' not defined"]));
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn arithmetic_phrases() {
    let outputs = run_script(
        r#"
        set a to 6
        set b to 7
        show a times b
        show 10 divided by 4
    "#,
    );
    assert!(outputs_contain(&outputs, &["Result: 42", "Result: 2.5"]));
}

#[test]
fn phrase_division_by_zero_is_infinity_but_divide_is_guarded() {
    let outputs = run_script(
        r#"
        show 10 divided by 0
        DIVIDE 10 0
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["Result: Infinity", "ERROR: Division by zero"]
    ));
}

#[test]
fn uppercase_math_commands() {
    let outputs = run_script(
        r#"
        ADD 3 4
        SUBTRACT 10 4
        MULTIPLY 6 7
        MOD 17 5
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["Result: 7", "Result: 6", "Result: 42", "Result: 2"]
    ));
}

#[test]
fn set_concatenation_is_textual_not_arithmetic() {
    let outputs = run_script(
        r#"
        set a to 1
        set b to 2
        set c to a + b
        show c
    "#,
    );
    // Joins rendered digits, never adds
    assert!(outputs_contain(&outputs, &["c: 12"]));
}

#[test]
fn sum_and_single_argument_functions() {
    let outputs = run_script(
        r#"
        sum 1 + 2 + 3
        sqrt 16
        log 100
        cos 0
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["sum(1 + 2 + 3): 6", "sqrt(16): 4", "log(100): 2", "cos(0): 1"]
    ));
}

#[test]
fn math_helpers() {
    let outputs = run_script(
        r#"
        factorial 5
        factorial 0
        fibonacci 7
        primecheck 17
        primecheck 1
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &[
            "Factorial of 5: 120",
            "Factorial of 0: 1",
            "Fibonacci sequence: 0, 1, 1, 2, 3, 5, 8",
            "17 is a prime",
            "1 is not a prime",
        ]
    ));
}

#[test]
fn negative_factorial_is_a_domain_error() {
    let outputs = run_script("factorial -1");
    assert_eq!(
        outputs,
        vec!["ERROR: factorial is not defined for negative numbers"]
    );
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn array_lifecycle() {
    let outputs = run_script(
        r#"
        set xs to [1, 2, 3]
        show length of xs
        show get 1 from xs
        show xs[2]
        append 4 to xs
        remove 4 from xs
        show xs
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &[
            "Length of 'xs': 3",
            "Element at index 1: 2",
            "Element at index 2 in 'xs': 3",
            "Appended '4' to 'xs': [1, 2, 3, 4]",
            "Removed '4' from 'xs': [1, 2, 3]",
            "xs: [1, 2, 3]",
        ]
    ));
}

#[test]
fn array_type_errors() {
    let outputs = run_script(
        r#"
        set s to "text"
        append 1 to s
        show length of s
        show get 0 from s
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["ERROR: 's' is not an array", "ERROR: s is not an array"]
    ));
}

#[test]
fn malformed_array_literal_is_reported_not_fatal() {
    let outputs = run_script(
        r#"
        set xs to [1, 2,]
        print still alive
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["ERROR: Invalid array literal", "still alive"]
    ));
}

#[test]
fn out_of_bounds_read_renders_undefined() {
    let outputs = run_script(
        r#"
        set xs to [1]
        show get 9 from xs
    "#,
    );
    assert!(outputs_contain(&outputs, &["Element at index 9: undefined"]));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn string_transforms() {
    let outputs = run_script(
        r#"
        set word to "rust"
        UPPERCASE word
        REVERSE abc
        LENGTH hello
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["Result: RUST", "Result: cba", "Result: 5"]
    ));
}

#[test]
fn palindrome_checks() {
    let outputs = run_script(
        r#"
        palindrome A man a plan a canal Panama
        palindrome hello
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &[
            "\"A man a plan a canal Panama\" is a palindrome",
            "\"hello\" is not a palindrome",
        ]
    ));
}

#[test]
fn concatenate_and_index() {
    let outputs = run_script(
        r#"
        set greeting to "hello"
        concatenate greeting with " world"
        index "ll" in greeting
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["Concatenation: hello world", "Index of \"ll\" in greeting: 2"]
    ));
}

#[test]
fn repeat_command() {
    let outputs = run_script("repeat ha 3");
    assert_eq!(outputs, vec!["ha ha ha"]);
}

// ============================================================================
// Command precedence
// ============================================================================

#[test]
fn quoted_remove_prefers_string_rule_for_text_targets() {
    let outputs = run_script(
        r#"
        set greeting to "hello world"
        remove "l" from greeting
        show greeting
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["Removed \"l\" from greeting: heo word", "greeting: heo word"]
    ));
}

#[test]
fn quoted_remove_against_list_reaches_generic_rule() {
    let outputs = run_script(
        r#"
        set xs to [1, 2]
        remove "1" from xs
    "#,
    );
    // Generic list remove sees the token with quotes intact
    assert!(outputs_contain(&outputs, &["ERROR: '\"1\"' not found in 'xs'"]));
}

// ============================================================================
// Conditionals
// ============================================================================

#[test]
fn if_redispatches_on_equality() {
    let outputs = run_script(
        r#"
        set mode to "on"
        .if mode is "on" then print active
        .if mode is "off" then print inactive
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["active", "Condition failed: mode is not \"off\""]
    ));
}

#[test]
fn malformed_if_reports_error_without_running_action() {
    let outputs = run_script(".if broken");
    assert_eq!(outputs, vec!["ERROR: Invalid .if statement"]);
}

#[test]
fn if_can_mutate_through_redispatch() {
    let outputs = run_script(
        r#"
        set state to "init"
        .if state is "init" then set state to "ready"
        show state
    "#,
    );
    assert!(outputs_contain(&outputs, &["Set 'state' to 'ready'", "state: ready"]));
}

// ============================================================================
// Executor edges and meta-commands
// ============================================================================

#[test]
fn empty_input_produces_no_output() {
    let mut repl = Repl::new();
    assert!(repl.process_line("").unwrap().is_none());
    assert!(repl.process_line("   ").unwrap().is_none());
}

#[test]
fn unknown_action_and_invalid_format() {
    let outputs = run_script(
        r#"
        frobnicate x
        ??? what
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["ERROR: Unsupported action", "Invalid command format"]
    ));
}

#[test]
fn vars_meta_command_lists_sorted_store() {
    let outputs = run_script(
        r#"
        set b to 2
        set a to "text"
        /vars
    "#,
    );
    let listing = outputs.last().unwrap();
    assert!(listing.contains("a = \"text\""));
    assert!(listing.contains("b = 2"));
    let a_pos = listing.find("a =").unwrap();
    let b_pos = listing.find("b =").unwrap();
    assert!(a_pos < b_pos);
}

#[test]
fn reset_meta_command_clears_variables() {
    let outputs = run_script(
        r#"
        set x to 1
        /reset
        show x
    "#,
    );
    assert!(outputs_contain(
        &outputs,
        &["Session reset (variables cleared)", "ERROR: Variable 'x' not defined"]
    ));
}

#[test]
fn quit_meta_command_signals_exit() {
    let mut repl = Repl::new();
    let err = repl.process_line("/quit").unwrap_err();
    assert_eq!(err.to_string(), "__REPL_EXIT__");
    let mut repl = Repl::new();
    let err = repl.process_line("exit").unwrap_err();
    assert_eq!(err.to_string(), "__REPL_EXIT__");
}

#[test]
fn error_lines_are_prefixed_and_single() {
    let outputs = run_script("DIVIDE 10 0");
    assert_eq!(outputs, vec!["ERROR: Division by zero"]);
}
