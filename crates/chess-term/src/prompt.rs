//! Interactive promotion choice.

use chess_core::{Color, Promotion, Square};
use chess_rules::PromotionHandler;
use std::io::{self, BufRead, Write};

/// Asks the player for the promotion piece, repeating until one of
/// N, B, R or Q is given.
///
/// If input ends before a valid answer no piece is chosen and the move is
/// not played. An I/O error is kept for the caller to collect with
/// [`PromptPromotion::take_error`].
pub struct PromptPromotion<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
    error: Option<io::Error>,
}

impl<'a, R: BufRead, W: Write> PromptPromotion<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        PromptPromotion {
            input,
            output,
            error: None,
        }
    }

    /// Returns the I/O error that interrupted the last prompt, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn ask(&mut self, color: Color, square: Square) -> io::Result<Option<Promotion>> {
        writeln!(self.output, "PROMOTION: {color} pawn reaches {square}")?;
        loop {
            write!(self.output, "N,B,R,Q ? ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let mut chars = line.trim().chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if let Some(choice) = Promotion::from_char(c) {
                    return Ok(Some(choice));
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> PromotionHandler for PromptPromotion<'_, R, W> {
    fn choose_promotion(&mut self, color: Color, square: Square) -> Option<Promotion> {
        match self.ask(color, square) {
            Ok(Some(choice)) => Some(choice),
            Ok(None) => {
                tracing::warn!(%square, "input closed during promotion, no piece chosen");
                None
            }
            Err(e) => {
                tracing::warn!(%square, error = %e, "promotion prompt failed");
                self.error = Some(e);
                None
            }
        }
    }
}
