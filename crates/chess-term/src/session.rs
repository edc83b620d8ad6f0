//! The interactive game loop.
//!
//! Commands are read one per line. A move is given in coordinate form
//! (`e2e4`, `e7e8q`); a lone square lists what its piece can do.

use crate::config::GlyphStyle;
use crate::prompt::PromptPromotion;
use crate::render::{render_board, render_targets};
use chess_core::{Color, Move, MoveParseError, Square};
use chess_rules::{EngineError, Game, GameEvent, MoveReport, MoveStatus, TargetList};
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

const HELP: &str = "\
commands:
  e2e4      move a piece (add n, b, r or q to choose a promotion: e7e8q)
  e2        show the legal moves of the piece on e2
  undo      put back the board saved before the last move or clear
  clear e2  remove the piece on e2 (kings cannot be removed)
  board     show the board
  help      show this text
  quit      leave the game";

/// Errors from parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (type help)")]
    Unknown(String),
    #[error("invalid square: {0}")]
    InvalidSquare(String),
    #[error(transparent)]
    InvalidMove(#[from] MoveParseError),
}

/// A parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Show(Square),
    Undo,
    Clear(Square),
    Board,
    Help,
    Quit,
}

fn parse_square(text: &str) -> Result<Square, CommandError> {
    Square::from_algebraic(text).ok_or_else(|| CommandError::InvalidSquare(text.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();

        match (head, arg) {
            ("undo", None) => Ok(Command::Undo),
            ("board", None) => Ok(Command::Board),
            ("help" | "?", None) => Ok(Command::Help),
            ("quit" | "exit", None) => Ok(Command::Quit),
            ("clear", Some(sq)) => Ok(Command::Clear(parse_square(sq)?)),
            (text, None) if text.len() == 2 => Ok(Command::Show(parse_square(text)?)),
            (text, None) if text.len() == 4 || text.len() == 5 => {
                Ok(Command::Move(text.parse()?))
            }
            _ => Err(CommandError::Unknown(line.clone())),
        }
    }
}

/// Lines announced after an accepted move.
pub fn announce(report: &MoveReport, next: Color) -> Vec<String> {
    let mut lines = vec![format!("{}'S TURN", next.to_string().to_uppercase())];
    let outcome = report.events.iter().find_map(|event| match event {
        GameEvent::Checkmate(_) => Some("CHECKMATE"),
        GameEvent::Stalemate(_) => Some("STALEMATE"),
        GameEvent::InCheck(_) => None,
    });
    match outcome {
        Some(text) => lines.push(text.to_string()),
        None => {
            if report.events.iter().any(|e| matches!(e, GameEvent::InCheck(_))) {
                lines.push("CHECK".to_string());
            }
        }
    }
    lines
}

/// A game played from a terminal by two people taking turns.
pub struct Session {
    game: Game,
    glyphs: GlyphStyle,
}

impl Session {
    pub fn new(game: Game, glyphs: GlyphStyle) -> Self {
        Session { game, glyphs }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and on a position that has lost a king.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<()> {
        self.print_board(output, &TargetList::new())?;
        writeln!(output, "{}'S TURN", self.side_name())?;

        loop {
            write!(output, "> ")?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                }
            };
            tracing::debug!(?command, "command");

            match command {
                Command::Move(mv) => self.play(mv, input, output)?,
                Command::Show(sq) => {
                    let targets = self.game.legal_targets(sq)?;
                    self.print_board(output, &targets)?;
                    writeln!(output, "{}", render_targets(sq, &targets))?;
                }
                Command::Undo => {
                    if self.game.restore()? {
                        self.print_board(output, &TargetList::new())?;
                    } else {
                        writeln!(output, "nothing to undo")?;
                    }
                }
                Command::Clear(sq) => match self.game.clear_square(sq) {
                    Ok(Some(piece)) => {
                        writeln!(output, "removed {piece} from {sq}")?;
                        self.print_board(output, &TargetList::new())?;
                    }
                    Ok(None) => writeln!(output, "{sq} is already empty")?,
                    Err(e @ EngineError::KingRemoval { .. }) => writeln!(output, "{e}")?,
                    Err(e) => return Err(e.into()),
                },
                Command::Board => {
                    self.print_board(output, &TargetList::new())?;
                    writeln!(output, "{}'S TURN", self.side_name())?;
                }
                Command::Help => writeln!(output, "{HELP}")?,
                Command::Quit => break,
            }
        }
        Ok(())
    }

    fn play<R: BufRead, W: Write>(
        &mut self,
        mv: Move,
        input: &mut R,
        output: &mut W,
    ) -> anyhow::Result<()> {
        if !self.game.legal_targets(mv.from)?.contains(mv.to) {
            writeln!(output, "illegal move: {mv}")?;
            return Ok(());
        }

        let before = self.game.clone();
        self.game.snapshot();
        let result = match mv.promotion {
            Some(mut choice) => self.game.try_move(mv.from, mv.to, &mut choice),
            None => {
                let mut prompt = PromptPromotion::new(input, &mut *output);
                let result = self.game.try_move(mv.from, mv.to, &mut prompt);
                if let Some(e) = prompt.take_error() {
                    self.game = before;
                    return Err(e.into());
                }
                result
            }
        };
        let status = match result {
            Ok(status) => status,
            Err(e @ EngineError::UnresolvedPromotion { .. }) => {
                // Keep the undo slot as it was before this attempt.
                self.game = before;
                writeln!(output)?;
                writeln!(output, "{e}; move not played")?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match status {
            MoveStatus::Accepted(report) => {
                self.print_board(output, &TargetList::new())?;
                for line in announce(&report, self.game.side_to_move()) {
                    writeln!(output, "{line}")?;
                }
            }
            MoveStatus::Rejected => writeln!(output, "illegal move: {mv}")?,
        }
        Ok(())
    }

    fn print_board<W: Write>(&self, output: &mut W, targets: &TargetList) -> std::io::Result<()> {
        let board = render_board(self.game.board(), self.game.check_flags(), targets, self.glyphs);
        write!(output, "{board}")
    }

    fn side_name(&self) -> String {
        self.game.side_to_move().to_string().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Piece, PieceKind, Promotion};
    use chess_rules::Board;
    use std::io::Cursor;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn run(game: Game, script: &str) -> (Session, String) {
        let mut session = Session::new(game, GlyphStyle::Ascii);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        session.run(&mut input, &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parse_commands() {
        assert_eq!("undo".parse::<Command>(), Ok(Command::Undo));
        assert_eq!(" BOARD \n".parse::<Command>(), Ok(Command::Board));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("e2".parse::<Command>(), Ok(Command::Show(sq("e2"))));
        assert_eq!("clear d1".parse::<Command>(), Ok(Command::Clear(sq("d1"))));
        assert_eq!(
            "e7e8q".parse::<Command>(),
            Ok(Command::Move(Move::with_promotion(
                sq("e7"),
                sq("e8"),
                Promotion::Queen
            )))
        );
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "z9".parse::<Command>(),
            Err(CommandError::InvalidSquare("z9".to_string()))
        );
        assert!(matches!(
            "e2e9".parse::<Command>(),
            Err(CommandError::InvalidMove(_))
        ));
        assert!(matches!(
            "castle now".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn fools_mate_announced() {
        let (session, output) = run(Game::new(), "f2f3\ne7e5\ng2g4\nd8h4\nquit\n");
        assert!(output.contains("BLACK'S TURN"));
        assert!(output.contains("CHECKMATE"));
        assert!(!output.contains("STALEMATE"));
        assert_eq!(session.game().side_to_move(), Color::White);
    }

    #[test]
    fn check_announced() {
        let (_, output) = run(Game::new(), "e2e4\nf7f6\nd1h5\n");
        assert!(output.lines().any(|line| line == "CHECK"));
    }

    #[test]
    fn illegal_move_reported() {
        let (session, output) = run(Game::new(), "e2e5\ne7e5\n");
        assert_eq!(output.matches("illegal move").count(), 2);
        assert_eq!(*session.game().board(), Board::startpos());
        assert!(!session.game().has_snapshot());
    }

    #[test]
    fn promotion_prompted() {
        let game = Game::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let (session, output) = run(game, "b7b8\nx\nn\n");
        assert!(output.contains("N,B,R,Q ?"));
        assert_eq!(
            session.game().piece_at(sq("b8")),
            Some(Piece::new(PieceKind::Knight, Color::White))
        );
    }

    #[test]
    fn promotion_not_played_when_input_ends() {
        let game = Game::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = game.clone();
        let (session, output) = run(game, "b7b8\n");
        assert!(output.contains("N,B,R,Q ?"));
        assert!(output.contains("no promotion piece was chosen; move not played"));
        assert_eq!(session.game().piece_at(sq("b8")), None);
        assert_eq!(
            session.game().piece_at(sq("b7")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
        assert_eq!(session.game().side_to_move(), Color::White);
        assert_eq!(*session.game(), before);
    }

    #[test]
    fn promotion_given_inline() {
        let game = Game::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let (session, output) = run(game, "b7b8q\n");
        assert!(!output.contains("N,B,R,Q ?"));
        assert!(output.lines().any(|line| line == "CHECK"));
        assert_eq!(
            session.game().piece_at(sq("b8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn undo_restores_board() {
        let (session, output) = run(Game::new(), "e2e4\nundo\nundo\n");
        assert_eq!(*session.game().board(), Board::startpos());
        assert!(output.contains("nothing to undo"));
    }

    #[test]
    fn clear_and_refuse_king() {
        let (session, output) = run(Game::new(), "clear d1\nclear e1\nclear e4\n");
        assert!(output.contains("removed White Queen from d1"));
        assert!(output.contains("cannot remove the White king from e1"));
        assert!(output.contains("e4 is already empty"));
        assert!(session.game().piece_at(sq("d1")).is_none());
    }

    #[test]
    fn show_targets() {
        let (_, output) = run(Game::new(), "b1\n");
        assert!(output.contains("b1: a3 c3"));
    }

    #[test]
    fn announce_lines() {
        let report = MoveReport {
            mv: Move::new(sq("f6"), sq("f7")),
            piece: Piece::new(PieceKind::Queen, Color::White),
            captured: None,
            castled: None,
            events: vec![GameEvent::Stalemate(Color::Black)],
        };
        assert_eq!(announce(&report, Color::Black), vec!["BLACK'S TURN", "STALEMATE"]);
    }
}
