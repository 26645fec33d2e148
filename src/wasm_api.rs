use crate::engine::{legal_moves, pick_move, AiConfig};
use crate::game::Game;
use crate::moves::Move;
use crate::piece::Color;
use crate::square::Square;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct BoardState {
    /// Eight rows of eight cells, rank 8 first; `None` for empty squares.
    squares: Vec<Vec<Option<char>>>,
    arrangement: String,
    current_turn: String,
    move_count: u32,
    is_in_check: bool,
    game_over: bool,
    legal_moves: Vec<MoveJson>,
}

#[derive(Serialize)]
struct MoveJson {
    from: String,
    to: String,
}

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<BoardState>,
    error: Option<String>,
}

fn move_json(mv: &Move) -> MoveJson {
    MoveJson {
        from: mv.origin().to_string(),
        to: mv.destination().to_string(),
    }
}

fn string_to_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "white" => Some(Color::White),
        "black" => Some(Color::Black),
        _ => None,
    }
}

fn build_board_state(game: &Game) -> BoardState {
    let board = game.board();
    let squares = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| Square::new(r, c).and_then(|sq| board.piece_at(sq)).map(|p| p.to_char()))
                .collect()
        })
        .collect();

    BoardState {
        squares,
        arrangement: board.to_arrangement(),
        current_turn: game.turn().to_string(),
        move_count: game.move_count(),
        is_in_check: game.king_under_attack(game.turn()),
        game_over: game.is_game_over(),
        legal_moves: legal_moves(game).iter().map(move_json).collect(),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn error_result(message: &str) -> JsValue {
    to_js(&MoveResult {
        board_state: None,
        error: Some(message.to_string()),
    })
}

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    ai_config: AiConfig,
    last_evals: u64,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            game: Game::new(),
            ai_config: AiConfig::new(),
            last_evals: 0,
        }
    }

    /// Start from a 64-character arrangement; `turn` is "white" or "black".
    pub fn from_arrangement(arrangement: &str, turn: &str) -> Result<WasmGame, JsValue> {
        let turn = string_to_color(turn)
            .ok_or_else(|| JsValue::from_str(&format!("unknown turn {turn:?}")))?;
        let game = Game::from_arrangement(arrangement, turn)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame {
            game,
            ai_config: AiConfig::new(),
            last_evals: 0,
        })
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.ai_config.depth = depth.clamp(1, 3);
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&build_board_state(&self.game))
    }

    /// Reachable squares from `square` in algebraic notation, or null for an
    /// empty or malformed square.
    pub fn reachable_from(&self, square: &str) -> JsValue {
        match Square::from_algebraic(square).and_then(|sq| self.game.reachable_from(sq)) {
            Some(dests) => {
                let names: Vec<String> = dests.iter().map(|s| s.to_string()).collect();
                to_js(&names)
            }
            None => JsValue::NULL,
        }
    }

    pub fn make_move(&mut self, from: &str, to: &str) -> JsValue {
        let (Some(origin), Some(destination)) =
            (Square::from_algebraic(from), Square::from_algebraic(to))
        else {
            return error_result("Invalid square");
        };

        if self.game.perform_move(Move::new(origin, destination)) {
            to_js(&build_board_state(&self.game))
        } else {
            error_result("Illegal move")
        }
    }

    pub fn make_ai_move(&mut self) -> JsValue {
        if let Some(result) = pick_move(&self.game, &self.ai_config) {
            self.last_evals = result.evals;
            self.game.perform_move(result.mv);
        }
        to_js(&build_board_state(&self.game))
    }

    pub fn get_last_evals(&self) -> u64 {
        self.last_evals
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
