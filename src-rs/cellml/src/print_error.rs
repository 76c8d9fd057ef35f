//! Error message formatting and display functionality
//!
//! ```text
//! error: expected `</component>`
//!  --> model.cellml:4:1
//!   |
//! 4 | </model>
//!   | ^
//!
//! note: `<component>` opened here
//!  --> model.cellml:3:3
//!   |
//! 3 |   <component name="membrane">
//!   |   ^
//! ```

use std::path::Path;

use anstream::eprintln;
use cellml_shared::error::{CellmlError, Context, ErrorLocation};
use owo_colors::{OwoColorize, Style};

use crate::stylesheet;

/// Prints a formatted error message to stderr
pub fn print(error: &CellmlError) {
    let error_string = error_to_string(error);
    eprintln!("{error_string}");
}

/// Converts an error to a formatted string representation
fn error_to_string(error: &CellmlError) -> String {
    let message_line = get_message_line("error", stylesheet::ERROR_COLOR, error.message());
    let location_line = get_location_line(error.path(), error.location());

    let mut lines = vec![message_line, location_line];

    match error.location() {
        Some(location) => {
            lines.push(get_source_lines(location, error.context(), stylesheet::ERROR_COLOR));
        }
        None => lines.extend(error.context().iter().map(|context| {
            let (equals, message) = get_context_parts(context);
            format!("  {equals} {message}")
        })),
    }

    lines.push(String::new());

    for (context, location) in error.context_with_source() {
        let (message, color) = match context {
            Context::Note(message) => (
                get_message_line("note", stylesheet::NOTE_COLOR, message),
                stylesheet::NOTE_COLOR,
            ),
            Context::Help(message) => (
                get_message_line("help", stylesheet::HELP_COLOR, message),
                stylesheet::HELP_COLOR,
            ),
        };

        lines.push(message);
        lines.push(get_location_line(error.path(), Some(location)));
        lines.push(get_source_lines(location, &[], color));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Formats a message line with a colored prefix
fn get_message_line(kind: &str, kind_color: Style, message: &str) -> String {
    // <kind>: <message>
    let kind_str = kind_color.style(kind);
    let message_line = format!("{kind_str}: {message}");

    message_line.bold().to_string()
}

/// Formats the location information line
fn get_location_line(path: &Path, location: Option<&ErrorLocation>) -> String {
    //  --> <path>
    // OR
    //  --> <path>:<line>:<column>
    let arrow = stylesheet::SOURCE_ANNOTATION.style("-->");
    let path = path.display();

    location.map_or_else(
        || format!(" {arrow} {path}"),
        |location| format!(" {arrow} {path}:{}:{}", location.line(), location.column()),
    )
}

/// Returns the `=` marker and message line for a context item
fn get_context_parts(context: &Context) -> (String, String) {
    match context {
        Context::Note(message) => (
            stylesheet::NOTE_COLOR.bold().style("=").to_string(),
            get_message_line("note", stylesheet::NOTE_COLOR, message),
        ),
        Context::Help(message) => (
            stylesheet::HELP_COLOR.bold().style("=").to_string(),
            get_message_line("help", stylesheet::HELP_COLOR, message),
        ),
    }
}

/// Formats the source code snippet with error highlighting
fn get_source_lines(
    location: &ErrorLocation,
    context: &[Context],
    code_highlight_color: Style,
) -> String {
    //   |
    // 1 | <component name="a">
    //   | ^
    let line = location.line();
    let column = location.column();
    let length = location.length().max(1);
    let line_source = location.line_source();

    // one column per digit of the line number
    let margin_width = line.ilog10() + 1;
    let margin = " ".repeat(margin_width as usize);

    let bar = stylesheet::SOURCE_ANNOTATION.style("|");
    let line_label = stylesheet::SOURCE_ANNOTATION.style(line.to_string());

    let pointer_indent = " ".repeat(column.saturating_sub(1));
    let pointer = code_highlight_color.bold().style("^");
    let pointer_rest = code_highlight_color.bold().style("-".repeat(length - 1));

    let blank_line = format!("{margin} {bar} ");
    let source_line = format!("{line_label} {bar} {line_source}");
    let pointer_line = format!("{margin} {bar} {pointer_indent}{pointer}{pointer_rest}");

    let context_lines = context.iter().map(|context| {
        let (equals, message) = get_context_parts(context);
        format!("{margin} {equals} {message}")
    });

    let mut source_lines = vec![blank_line, source_line, pointer_line];
    source_lines.extend(context_lines);

    source_lines.join("\n")
}
