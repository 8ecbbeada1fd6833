use std::fmt;

use sweeper_core::{CellView, Phase, Snapshot};

/// Text rendering of a snapshot: a labelled grid followed by a status line.
pub struct Board<'a>(pub &'a Snapshot);

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let (rows, cols) = snapshot.size;

        write!(f, "    ")?;
        for col in 0..cols {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{:>3} ", row)?;
            for col in 0..cols {
                let glyph = if snapshot.triggered_mine == Some((row, col)) {
                    'X'
                } else {
                    snapshot.cell((row, col)).map_or('?', glyph)
                };
                write!(f, "{:>3}", glyph)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", Status(snapshot))
    }
}

/// One-line summary of the game state.
pub struct Status<'a>(pub &'a Snapshot);

impl fmt::Display for Status<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let secs = snapshot.elapsed.as_secs();

        match snapshot.phase {
            Phase::Unstarted => write!(f, "There are {} mines.", snapshot.total_mines),
            Phase::InProgress => write!(
                f,
                "Mines left: {}  Time: {}s",
                snapshot.remaining_mines, secs
            ),
            Phase::Won => write!(f, "You win! Cleared in {}s", secs),
            Phase::Lost => write!(f, "Boom! Game over after {}s", secs),
        }
    }
}

fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Open(0) => '.',
        CellView::Open(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => '*',
    }
}

#[cfg(test)]
mod tests {
    use sweeper_core::{BoardConfig, GameSession};

    use super::*;

    #[test]
    fn renders_unstarted_board() {
        let game = GameSession::new(BoardConfig::new(2, 2, 1).unwrap(), 0).unwrap();

        let text = Board(&game.snapshot()).to_string();

        assert_eq!(
            text,
            "      0  1\n  0   #  #\n  1   #  #\nThere are 1 mines.\n"
        );
    }

    #[test]
    fn renders_loss_with_triggered_mine() {
        let config = BoardConfig::new(4, 1, 2).unwrap();
        let mut game = GameSession::with_mines(config, vec![(0, 0), (0, 2)]).unwrap();
        game.reveal((0, 1)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        let snapshot = game.reveal((0, 2)).unwrap();
        let text = Board(&snapshot).to_string();

        assert!(text.starts_with("      0  1  2  3\n"));
        assert!(text.contains("  0   F  2  X  #\n"));
        assert!(Status(&snapshot).to_string().starts_with("Boom!"));
    }

    #[test]
    fn glyphs_cover_every_view() {
        assert_eq!(glyph(CellView::Hidden), '#');
        assert_eq!(glyph(CellView::Open(0)), '.');
        assert_eq!(glyph(CellView::Open(8)), '8');
        assert_eq!(glyph(CellView::Mine), '*');
    }
}
