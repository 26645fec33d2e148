//! Flat-file puzzle catalogue.
//!
//! The database file starts with a line holding the number of puzzles,
//! followed by two lines per puzzle: `arrangement,TURN,DIFFICULTY` and a
//! free-text description. Files imported with [`PuzzleDatabase::add_from_file`]
//! have no count line, just the two-line records.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::puzzle::{Puzzle, PuzzleError};

pub const DEFAULT_DATABASE_PATH: &str = "database.txt";

#[derive(thiserror::Error, Debug)]
pub enum CatalogueError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {source}", .path.display())]
    Puzzle {
        path: PathBuf,
        line: usize,
        #[source]
        source: PuzzleError,
    },

    #[error("{}:{line}: {reason}", .path.display())]
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Sorted, duplicate-free puzzles bound to the file they are saved to.
#[derive(Debug)]
pub struct PuzzleDatabase {
    path: PathBuf,
    puzzles: Vec<Puzzle>,
}

impl PuzzleDatabase {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        PuzzleDatabase {
            path: path.into(),
            puzzles: Vec::new(),
        }
    }

    /// Load the catalogue at `path`. A missing file gives an empty catalogue
    /// that will be created on the first [`save`](Self::save).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogueError> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("puzzle database {} not found, starting empty", path.display());
                return Ok(Self::empty(path));
            }
            Err(source) => return Err(CatalogueError::Io { path, source }),
        };

        let puzzles = parse_database(&path, &text)?;
        let mut db = Self::empty(path);
        db.extend(puzzles);
        info!("loaded {} puzzles from {}", db.len(), db.path.display());
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Import two-line records from `path`. Either every record is valid and
    /// the new ones are added, or nothing changes. Returns how many puzzles
    /// were actually new.
    pub fn add_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogueError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let lines: Vec<&str> = text.lines().collect();
        let used = lines.len() - lines.iter().rev().take_while(|l| l.trim().is_empty()).count();
        let lines = &lines[..used];

        if lines.len() % 2 != 0 {
            return Err(CatalogueError::Format {
                path: path.to_path_buf(),
                line: lines.len(),
                reason: "puzzle record is missing its description line".to_string(),
            });
        }

        let puzzles = lines
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                Puzzle::parse(pair[0], pair[1]).map_err(|source| CatalogueError::Puzzle {
                    path: path.to_path_buf(),
                    line: 2 * i + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let added = self.extend(puzzles);
        info!("added {added} puzzles from {}", path.display());
        Ok(added)
    }

    /// Add one puzzle, keeping the catalogue sorted. Returns `false` if an
    /// equal puzzle is already present.
    pub fn add(&mut self, puzzle: Puzzle) -> bool {
        match self.puzzles.binary_search(&puzzle) {
            Ok(_) => {
                warn!("skipping duplicate puzzle {}", puzzle.details());
                false
            }
            Err(at) => {
                self.puzzles.insert(at, puzzle);
                true
            }
        }
    }

    fn extend(&mut self, puzzles: impl IntoIterator<Item = Puzzle>) -> usize {
        puzzles
            .into_iter()
            .map(|p| self.add(p))
            .filter(|&added| added)
            .count()
    }

    pub fn save(&self) -> Result<(), CatalogueError> {
        fs::write(&self.path, self.render()).map_err(|source| CatalogueError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("saved {} puzzles to {}", self.len(), self.path.display());
        Ok(())
    }

    fn render(&self) -> String {
        let mut out = format!("{}\n", self.puzzles.len());
        for puzzle in &self.puzzles {
            out.push_str(&puzzle.to_string());
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.iter()
    }

    pub fn to_json(&self) -> Result<String, CatalogueError> {
        Ok(serde_json::to_string_pretty(&self.puzzles)?)
    }
}

fn parse_database(path: &Path, text: &str) -> Result<Vec<Puzzle>, CatalogueError> {
    let format_error = |line: usize, reason: String| CatalogueError::Format {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut lines = text.lines();
    let header = lines.next().unwrap_or("");
    let count: usize = header
        .trim()
        .parse()
        .map_err(|_| format_error(1, format!("expected a puzzle count, got {header:?}")))?;

    let mut puzzles = Vec::with_capacity(count);
    for i in 0..count {
        let line = 2 * i + 2;
        let (Some(details), Some(description)) = (lines.next(), lines.next()) else {
            return Err(format_error(
                line,
                format!("expected {count} puzzles, found {i}"),
            ));
        };
        let puzzle = Puzzle::parse(details, description).map_err(|source| CatalogueError::Puzzle {
            path: path.to_path_buf(),
            line,
            source,
        })?;
        puzzles.push(puzzle);
    }
    Ok(puzzles)
}
