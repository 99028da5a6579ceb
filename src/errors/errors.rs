use std::fmt::Display;

use thiserror::Error;
use tracing::debug;

/// A single line-tagged diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::ForInitializerNotLet { .. } => "ForInitializerNotLet",
            ErrorImpl::NestedFunction { .. } => "NestedFunction",
            ErrorImpl::MissingTypeSpecifier { .. } => "MissingTypeSpecifier",
            ErrorImpl::MisspelledTypeSpecifier { .. } => "MisspelledTypeSpecifier",
            ErrorImpl::MissingInitializer { .. } => "MissingInitializer",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::MultipleEntryPoints { .. } => "MultipleEntryPoints",
            ErrorImpl::UnknownIdentifier { .. } => "UnknownIdentifier",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::BinaryTypeMatchError { .. } => "BinaryTypeMatchError",
            ErrorImpl::ReturnTypeMatchError { .. } => "ReturnTypeMatchError",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::NoEntryPoint => "NoEntryPoint",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid literal: `{}`, is it above the limit of its type?",
                token
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only variables can appear on the left of `=`",
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression or block into smaller pieces",
            )),
            ErrorImpl::ForInitializerNotLet { .. } => ErrorTip::Suggestion(String::from(
                "Start the loop with a declaration such as `let int i = 0;`",
            )),
            ErrorImpl::NestedFunction { function } => ErrorTip::Suggestion(format!(
                "Move `{}` to the top level of the file",
                function
            )),
            ErrorImpl::MissingTypeSpecifier { name } => ErrorTip::Suggestion(format!(
                "Add a type before `{}`, for example `int {}`",
                name, name
            )),
            ErrorImpl::MisspelledTypeSpecifier { token } => ErrorTip::Suggestion(format!(
                "`{}` is not a type, expected one of int, float, byte, bool, string, void",
                token
            )),
            ErrorImpl::MissingInitializer { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` must be given a value, for example `= 0`",
                variable
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::MultipleEntryPoints { function } => ErrorTip::Suggestion(format!(
                "Only one function may be marked `entry`, declare `{}` with `function`",
                function
            )),
            ErrorImpl::UnknownIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "`{}` is not declared in this scope or any enclosing scope",
                identifier
            )),
            ErrorImpl::NotAFunction { identifier } => {
                ErrorTip::Suggestion(format!("`{}` is a variable, not a function", identifier))
            }
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::BinaryTypeMatchError { left, right } => ErrorTip::Suggestion(format!(
                "Both operands must have the same type, found `{}` and `{}`",
                left, right
            )),
            ErrorImpl::ReturnTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Function returns `{}`, but this returns `{}`",
                    expected, received
                ))
            }
            ErrorImpl::ReturnOutsideFunction => ErrorTip::None,
            ErrorImpl::NoEntryPoint => ErrorTip::Suggestion(String::from(
                "Mark one function with `entry`, for example `entry int main() { ... }`",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing literal: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("for loop initialization must be a let declaration, found {token:?}")]
    ForInitializerNotLet { token: String },
    #[error("function {function:?} defined inside a block, function definitions are only allowed at the top level")]
    NestedFunction { function: String },
    #[error("missing type specifier for {name:?}")]
    MissingTypeSpecifier { name: String },
    #[error("misspelled type specifier {token:?}")]
    MisspelledTypeSpecifier { token: String },
    #[error("missing initializer for variable {variable:?}")]
    MissingInitializer { variable: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("multiple entry points defined: {function:?}")]
    MultipleEntryPoints { function: String },
    #[error("unknown identifier {identifier:?}")]
    UnknownIdentifier { identifier: String },
    #[error("{identifier:?} is not a function")]
    NotAFunction { identifier: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("type incompatibility: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("operand types do not match: {left} != {right}")]
    BinaryTypeMatchError { left: String, right: String },
    #[error("return type {received} does not match declared return type {expected}")]
    ReturnTypeMatchError { expected: String, received: String },
    #[error("return statement outside of a function")]
    ReturnOutsideFunction,
    #[error("no entry point defined")]
    NoEntryPoint,
}

/// Append-only sink shared by every pass of one compilation unit.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    /// Records a new diagnostic at `line`.
    pub fn record(&mut self, line: u32, error: ErrorImpl) {
        self.push(Error::new(error, line));
    }

    pub fn push(&mut self, error: Error) {
        debug!(line = error.get_line(), error = %error.get_kind(), "recorded diagnostic");
        self.errors.push(error);
    }

    /// Moves every diagnostic of `other` to the end of this sink.
    pub fn extend(&mut self, other: Diagnostics) {
        for error in other.errors {
            self.push(error);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of diagnostics whose error name is `name`.
    pub fn count(&self, name: &str) -> usize {
        self.errors
            .iter()
            .filter(|error| error.get_error_name() == name)
            .count()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
