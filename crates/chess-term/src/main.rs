//! Chess in the terminal for two local players.

use anyhow::Context;
use chess_rules::Game;
use chess_term::config::{ChessTermConfig, GlyphStyle};
use chess_term::session::Session;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::Level;

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess-term")]
#[command(about = "Play chess against another person at the same terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting position in FEN, overriding the configuration
    #[arg(long)]
    fen: Option<String>,

    /// Draw pieces as letters instead of Unicode symbols
    #[arg(long)]
    ascii: bool,

    /// Log engine activity at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ChessTermConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.level()?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let fen = cli
        .fen
        .unwrap_or_else(|| config.start_position.clone());
    let game = Game::from_fen(&fen).with_context(|| format!("invalid start position: {fen}"))?;
    let glyphs = if cli.ascii {
        GlyphStyle::Ascii
    } else {
        config.glyphs
    };
    tracing::info!(%fen, ?glyphs, "starting game");

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Session::new(game, glyphs).run(&mut input, &mut output)
}
