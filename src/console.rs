//! Interactive console session: a menu for picking a game or puzzle, and a
//! play loop that reads moves as pairs of squares.
//!
//! The session is generic over its input and output so it can be driven from
//! stdin/stdout or from an in-memory script.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::error;

use crate::catalogue::PuzzleDatabase;
use crate::game::Game;
use crate::moves::Move;
use crate::render::{render, RenderOptions};
use crate::square::Square;

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Play,
    List,
    Add(&'a str),
    PlayPuzzle(&'a str),
    Quit,
    Unknown,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line.split_once(' ') {
            None if line == "p" => Command::Play,
            None if line == "l" => Command::List,
            None if line == "q" => Command::Quit,
            Some(("a", file)) if !file.trim().is_empty() => Command::Add(file.trim()),
            Some(("p", n)) => Command::PlayPuzzle(n.trim()),
            _ => Command::Unknown,
        }
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
    database: PuzzleDatabase,
    options: RenderOptions,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, database: PuzzleDatabase, options: RenderOptions) -> Self {
        Console {
            input,
            output,
            database,
            options,
        }
    }

    pub fn database(&self) -> &PuzzleDatabase {
        &self.database
    }

    /// Run the menu until `q` or end of input, then save the catalogue. The
    /// catalogue is saved even when the session ends on an I/O error.
    pub fn run(&mut self) -> Result<()> {
        let session = self.menu();
        let saved = self
            .database
            .save()
            .context("saving the puzzle database on exit");
        if let (Err(_), Err(e)) = (&session, &saved) {
            error!("{e:#}");
        }
        session.and(saved)
    }

    fn menu(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to Chess Console!")?;
        loop {
            self.print_instructions()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            match Command::parse(&line) {
                Command::Quit => break,
                Command::Play => self.play(Game::new())?,
                Command::List => self.list()?,
                Command::Add(file) => match self.database.add_from_file(file) {
                    Ok(added) => writeln!(self.output, "Added {added} new puzzles.")?,
                    Err(e) => {
                        error!("import from {file} failed: {e}");
                        writeln!(self.output, "Could not add puzzles: {e}")?;
                    }
                },
                Command::PlayPuzzle(n) => self.play_puzzle(n)?,
                Command::Unknown => {
                    writeln!(self.output, "Unknown instruction. Please try again.")?
                }
            }
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        for (i, puzzle) in self.database.iter().enumerate() {
            writeln!(self.output, "{i}: {puzzle}")?;
        }
        Ok(())
    }

    fn play_puzzle(&mut self, n: &str) -> Result<()> {
        let puzzle = n.parse::<usize>().ok().and_then(|i| self.database.get(i));
        let Some(puzzle) = puzzle else {
            writeln!(self.output, "There is no puzzle number {n}.")?;
            return Ok(());
        };
        match puzzle.to_game() {
            Ok(game) => self.play(game),
            Err(e) => {
                writeln!(self.output, "Cannot set up puzzle {n}: {e}")?;
                Ok(())
            }
        }
    }

    /// Play until a resignation or end of input. `game.is_game_over()` never
    /// ends the loop on its own.
    pub fn play(&mut self, mut game: Game) -> Result<()> {
        self.print_board(&game, None)?;

        while !game.is_game_over() {
            writeln!(self.output, "{}'s move: ", game.turn())?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if tokens.first() == Some(&"resign") {
                writeln!(self.output, "{} has resigned.", game.turn())?;
                return Ok(());
            }

            let origin = tokens.first().and_then(|t| Square::from_algebraic(t));
            let Some((origin, piece)) = origin.and_then(|o| game.piece_at(o).map(|p| (o, p)))
            else {
                writeln!(self.output, "Invalid position. Please try again.")?;
                continue;
            };
            let own_piece = piece.color() == game.turn();

            match &tokens[1..] {
                [] => {
                    if !own_piece {
                        writeln!(self.output, "That piece belongs to the opponent.")?;
                    }
                    self.print_board(&game, Some(origin))?;
                }
                [_] if !own_piece => {
                    writeln!(self.output, "That piece belongs to the opponent.")?;
                }
                [target] => {
                    let moved = Square::from_algebraic(target)
                        .is_some_and(|dest| game.perform_move(Move::new(origin, dest)));
                    if !moved {
                        writeln!(self.output, "Invalid move. Please try again.")?;
                    }
                    self.print_board(&game, None)?;
                }
                _ => writeln!(self.output, "Invalid move. Please try again.")?,
            }
        }
        Ok(())
    }

    fn print_board(&mut self, game: &Game, origin: Option<Square>) -> Result<()> {
        writeln!(self.output, "{}", render(game, origin, self.options))?;
        Ok(())
    }

    fn print_instructions(&mut self) -> Result<()> {
        writeln!(self.output, "Input 'p' to play chess.")?;
        writeln!(self.output, "Input 'l' to list the puzzles in the database.")?;
        writeln!(self.output, "Input 'a <filename>' to add new puzzles into the database.")?;
        writeln!(self.output, "Input 'p <number>' to play a puzzle.")?;
        writeln!(self.output, "If you want to end the program, input 'q'.")?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).context("reading console input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
