//! Unit tests for error handling.
//!
//! This module contains tests for error types and the diagnostics sink.

use crate::errors::errors::{Diagnostics, Error, ErrorImpl, ErrorTip};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        10,
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_line(), 10);
}

#[test]
fn test_error_display_is_line_tagged() {
    let error = Error::new(ErrorImpl::NoEntryPoint, 7);

    assert_eq!(error.to_string(), "Line 7: no entry point defined");
}

#[test]
fn test_missing_initializer_error() {
    let error = Error::new(
        ErrorImpl::MissingInitializer {
            variable: "x".to_string(),
        },
        1,
    );

    assert_eq!(error.get_error_name(), "MissingInitializer");
    assert!(error.to_string().contains("missing initializer"));
}

#[test]
fn test_type_mismatch_error_names_both_types() {
    let error = Error::new(
        ErrorImpl::ReturnTypeMatchError {
            expected: "float".to_string(),
            received: "int".to_string(),
        },
        3,
    );

    let message = error.to_string();
    assert!(message.contains("float"));
    assert!(message.contains("int"));
    assert_eq!(error.get_error_name(), "ReturnTypeMatchError");
}

#[test]
fn test_variable_already_declared_error() {
    let error = Error::new(
        ErrorImpl::VariableAlreadyDeclared {
            variable: "x".to_string(),
        },
        0,
    );

    assert_eq!(error.get_error_name(), "VariableAlreadyDeclared");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        0,
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::MisspelledTypeSpecifier {
            token: "itn".to_string(),
        },
        0,
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("itn")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_diagnostics_record_in_order() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());

    diagnostics.record(4, ErrorImpl::NoEntryPoint);
    diagnostics.record(
        2,
        ErrorImpl::UnknownIdentifier {
            identifier: "y".to_string(),
        },
    );

    assert_eq!(diagnostics.len(), 2);
    let lines: Vec<u32> = diagnostics.iter().map(|error| error.get_line()).collect();
    assert_eq!(lines, vec![4, 2]);
}

#[test]
fn test_diagnostics_count_by_name() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.record(1, ErrorImpl::NoEntryPoint);
    diagnostics.record(2, ErrorImpl::InvalidAssignmentTarget);
    diagnostics.record(3, ErrorImpl::InvalidAssignmentTarget);

    assert_eq!(diagnostics.count("InvalidAssignmentTarget"), 2);
    assert_eq!(diagnostics.count("NoEntryPoint"), 1);
    assert_eq!(diagnostics.count("TypeMatchError"), 0);
}

#[test]
fn test_diagnostics_extend_appends() {
    let mut first = Diagnostics::new();
    first.record(1, ErrorImpl::NoEntryPoint);

    let mut second = Diagnostics::new();
    second.record(9, ErrorImpl::ReturnOutsideFunction);

    first.extend(second);
    let errors = first.into_vec();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1].get_error_name(), "ReturnOutsideFunction");
}

#[test]
fn test_nesting_too_deep_message() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 128 }, 3);

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.to_string(), "Line 3: nesting deeper than 128 levels");
}
