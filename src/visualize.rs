use std::io;
use std::path::Path;

use crate::board::{Column, Queens, BOARD_SIZE};
use crate::solver::tracing::{Event, Trace};

/// Writes the search recorded in `trace` as a graphviz digraph, one board table per node.
///
/// A placement hangs below the latest node of a lower row, so branches abandoned by backtracking
/// fan out from their common parent.
pub fn visualize_trace<P>(trace: &Trace, path: P) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let root_board = emit_board(&trace.root, "root", false);

    let boards = board_events(&trace.events)
        .enumerate()
        .map(|(i, (queens, solved))| emit_board(queens, &format!("b_{i}"), solved))
        .collect::<Vec<String>>()
        .join("\n\n\n");

    let edges = emit_edges(&trace.events);

    let graphviz_file_content = format!(
        r#"digraph QueensSearch {{
        node [shape=plaintext];

        {root_board}
        {boards}
        {edges}
}}"#
    );
    std::fs::write(path, graphviz_file_content)
}

// every event that produces a node, with whether the board it holds was reported as solved
fn board_events(events: &[Event]) -> impl Iterator<Item = (&Queens, bool)> + '_ {
    events.iter().enumerate().filter_map(move |(i, event)| match event {
        Event::Place { queens, .. } | Event::Set { queens } => {
            let solved = matches!(events.get(i + 1), Some(Event::Solved { .. }));
            Some((queens, solved))
        }
        Event::Remove { .. } | Event::Solved { .. } => None,
    })
}

fn node_name(node: Option<usize>) -> String {
    node.map_or_else(|| "root".to_owned(), |i| format!("b_{i}"))
}

fn emit_edges(events: &[Event]) -> String {
    // (row, node) of the placements on the current branch
    let mut stack: Vec<(usize, usize)> = vec![];
    let mut edges = vec![];
    let mut next_index = 0;

    for event in events {
        match event {
            Event::Place { row, from, to, .. } => {
                while stack.last().is_some_and(|&(top_row, _)| top_row >= *row) {
                    stack.pop();
                }
                let parent = node_name(stack.last().map(|&(_, node)| node));
                let label = emit_place_label(*row, *from, *to);
                edges.push(format!("{parent} -> b_{next_index} {label}"));

                stack.push((*row, next_index));
                next_index += 1;
            }
            Event::Set { .. } => {
                let parent = node_name(stack.last().map(|&(_, node)| node));
                edges.push(format!(r#"{parent} -> b_{next_index} [ label = "replace board" ]"#));

                stack.clear();
                stack.push((BOARD_SIZE, next_index));
                next_index += 1;
            }
            Event::Remove { row, .. } => {
                while stack.last().is_some_and(|&(top_row, _)| top_row >= *row) {
                    stack.pop();
                }
            }
            Event::Solved { .. } => {}
        }
    }
    edges.join("\n")
}

fn emit_place_label(row: usize, from: Option<Column>, to: Column) -> String {
    match from {
        Some(from) => format!(r#"[ label = "row {row} :: {from} -> {to}" ]"#),
        None => format!(r#"[ label = "row {row} :: place {to}" ]"#),
    }
}

fn emit_board(queens: &Queens, name: &str, solved: bool) -> String {
    let board_table = emit_board_table(queens, solved);
    format!("{name} [label=<\n    {board_table}\n        >];")
}

fn emit_board_table(queens: &Queens, solved: bool) -> String {
    let trs = queens.iter().map(|&queen| emit_row(queen)).collect::<Vec<String>>().join("\n");
    let color = if solved { "darkgreen" } else { "black" };
    format!(
        r#"        <TABLE BORDER="2" COLOR="{color}" CELLBORDER="1" CELLSPACING="0" CELLPADDING="8">
{trs}
            </TABLE>"#
    )
}

fn emit_row(queen: Option<Column>) -> String {
    let tds = (0..BOARD_SIZE as Column)
        .map(|column| {
            if queen == Some(column) {
                "                    <TD>Q</TD>".to_owned()
            } else {
                "                    <TD></TD>".to_owned()
            }
        })
        .collect::<Vec<String>>()
        .join("\n");
    format!("                <TR>\n{tds}\n                </TR>")
}
