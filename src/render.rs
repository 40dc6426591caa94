//! Plain-text table of a machine's events.
//!
//! The renderer only reads [`StateMachine::events`] and
//! [`StateMachine::current_state`]; it never changes the machine.
//!
//! ```text
//! +-------+------+----+
//! | EVENT | FROM | TO |
//! +-------+------+----+
//! | go    | [A]  | B  |
//! +-------+------+----+
//! current state: A
//! ```

use crate::core::{format_states, State};
use crate::engine::StateMachine;
use std::io;

const HEADER: [&str; 3] = ["EVENT", "FROM", "TO"];

/// Render the event table as a string.
pub fn render_table<S, M>(machine: &M) -> String
where
    S: State,
    M: StateMachine<S> + ?Sized,
{
    let rows: Vec<[String; 3]> = machine
        .events()
        .iter()
        .map(|e| {
            [
                e.name().to_string(),
                format_states(e.from()),
                e.to().name().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut table = String::new();
    table.push_str(&separator);
    push_row(&mut table, &HEADER, &widths);
    table.push_str(&separator);
    if !rows.is_empty() {
        for row in &rows {
            push_row(&mut table, row, &widths);
        }
        table.push_str(&separator);
    }
    table.push_str(&format!(
        "current state: {}\n",
        machine.current_state().name()
    ));
    table
}

/// Write the event table to `out`.
pub fn write_table<S, M, W>(machine: &M, out: &mut W) -> io::Result<()>
where
    S: State,
    M: StateMachine<S> + ?Sized,
    W: io::Write,
{
    out.write_all(render_table(machine).as_bytes())?;
    out.flush()
}

fn push_row<C: AsRef<str>>(table: &mut String, cells: &[C], widths: &[usize; 3]) {
    table.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        table.push_str(&format!(" {:<width$} |", cell.as_ref(), width = *width));
    }
    table.push('\n');
}
