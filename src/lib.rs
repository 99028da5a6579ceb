#![allow(clippy::module_inception)]

use std::{fmt::Write, path::Path};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod symbol_table;
pub mod type_checker;

extern crate regex;

/// Text of the 1-based `line` of `source`, without its line ending.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches('\r'))
}

/// Formats a diagnostic together with the source line it points at.
pub fn render_error(error: &Error, source: &str, file: &Path) -> String {
    /*
        Error: name (tip)
        -> main.tb
           |
        20 | let int a = #;
           | ^^^^^^^^^^^^^
           = Line 20: message
    */

    let line_string = error.get_line().to_string();
    let padding = line_string.len() + 2;
    let mut out = String::new();

    // Writing into a String cannot fail
    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file.to_string_lossy());
    let _ = writeln!(out, "{:>padding$}", "|");

    if let Some(line_text) = get_line(source, error.get_line()) {
        let (line_text_removed, _) = remove_starting_whitespace(line_text);
        let line_text_removed = line_text_removed.trim_end();
        let _ = writeln!(out, "{} | {}", line_string, line_text_removed);

        let arrows = line_text_removed.chars().count().max(1);
        let _ = writeln!(out, "{:>padding$} {:^>arrows$}", "|", "^");
    }

    let _ = writeln!(out, "{:>padding$} {}", "=", error);
    out
}

pub fn display_error(error: &Error, source: &str, file: &Path) {
    eprint!("{}", render_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
