//! Textual rendering of dungeon layouts for logs and the command line.

use crate::{query, Dungeon};

/// Renders the dungeon as one line per row, each room shown by its kind glyph.
#[must_use]
pub fn render_layout(dungeon: &Dungeon) -> String {
    let size = query::size(dungeon).get();
    let mut output = String::new();
    for (position, room) in query::rooms(dungeon) {
        output.push(room.kind().glyph());
        if position.column() + 1 == size {
            output.push('\n');
        } else {
            output.push(' ');
        }
    }
    output
}
