// =============================================================================
// Look-ahead helpers and a small computer opponent
//
// Everything here works on private clones of a Game: a candidate move is
// tried with Game::perform_move on a copy, so the self-check rollback of the
// live game is never exercised by the search. The search is negamax with
// alpha-beta pruning over material and mobility; it knows nothing about
// checkmate, and a side with no legal move is simply scored as it stands.
// =============================================================================

use crate::board::Board;
use crate::game::Game;
use crate::moves::Move;
use crate::piece::{Color, PieceType};

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Clone, Debug)]
pub struct Weights {
    /// Score per destination square one side can reach beyond the other.
    pub mobility: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights { mobility: 0.05 }
    }
}

/// Controls which evaluation modules are active and the search depth.
#[derive(Clone, Debug)]
pub struct AiConfig {
    /// Count material using standard piece values (P=1, N=B=3, R=5, Q=9).
    pub material_module: bool,
    /// Reward having more reachable squares than the opponent.
    pub mobility_module: bool,
    /// Search depth in plies, at least 1.
    pub depth: u32,
    pub weights: Weights,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AiConfig {
    pub fn new() -> Self {
        AiConfig {
            material_module: true,
            mobility_module: true,
            depth: 2,
            weights: Weights::default(),
        }
    }
}

/// The result of a move search, including the chosen move and the number of
/// static evaluations performed during the search.
#[derive(Clone, Debug)]
pub struct PickResult {
    pub mv: Move,
    pub score: f64,
    pub evals: u64,
}

// =============================================================================
// Legal moves
// =============================================================================

/// Every move the side to move could play, paired with the game it leads to.
fn legal_successors(game: &Game) -> Vec<(Move, Game)> {
    let turn = game.turn();
    let mut result = Vec::new();
    for (from, piece) in game.board().pieces().filter(|(_, p)| p.color() == turn) {
        for to in piece.destinations(game.board(), from) {
            let mv = Move::new(from, to);
            let mut probe = game.clone();
            if probe.perform_move(mv) {
                result.push((mv, probe));
            }
        }
    }
    result
}

/// All moves `perform_move` would accept for the side to move. Computed on
/// copies; `game` itself is not touched.
pub fn legal_moves(game: &Game) -> Vec<Move> {
    legal_successors(game).into_iter().map(|(mv, _)| mv).collect()
}

// =============================================================================
// Evaluation
// =============================================================================

/// Standard piece values in pawns. The king carries no material value.
fn piece_value(pt: PieceType) -> f64 {
    match pt {
        PieceType::Pawn => 1.0,
        PieceType::Knight => 3.0,
        PieceType::Bishop => 3.0,
        PieceType::Rook => 5.0,
        PieceType::Queen => 9.0,
        PieceType::King => 0.0,
    }
}

/// Material balance from White's perspective.
fn eval_material(board: &Board) -> f64 {
    board
        .pieces()
        .map(|(_, p)| match p.color() {
            Color::White => piece_value(p.piece_type()),
            Color::Black => -piece_value(p.piece_type()),
        })
        .sum()
}

/// Reachable-square balance from White's perspective.
fn eval_mobility(board: &Board, w: &Weights) -> f64 {
    let white = board.all_destinations_by_color(Color::White).len() as f64;
    let black = board.all_destinations_by_color(Color::Black).len() as f64;
    (white - black) * w.mobility
}

/// Evaluate the board from `color`'s perspective by summing the enabled
/// modules.
pub fn evaluate(board: &Board, color: Color, config: &AiConfig) -> f64 {
    let mut score = 0.0;
    if config.material_module {
        score += eval_material(board);
    }
    if config.mobility_module {
        score += eval_mobility(board, &config.weights);
    }
    match color {
        Color::White => score,
        Color::Black => -score,
    }
}

// =============================================================================
// Move ordering
// =============================================================================

/// Captures first, most valuable victim by least valuable attacker; quiet
/// moves score 0.
fn move_priority(board: &Board, mv: &Move) -> i32 {
    let Some(victim) = board.piece_at(mv.destination()) else {
        return 0;
    };
    let attacker = board
        .piece_at(mv.origin())
        .map(|p| piece_value(p.piece_type()) as i32)
        .unwrap_or(0);
    100 + piece_value(victim.piece_type()) as i32 * 10 - attacker
}

fn order_successors(board: &Board, successors: &mut [(Move, Game)]) {
    successors.sort_by_key(|(mv, _)| std::cmp::Reverse(move_priority(board, mv)));
}

// =============================================================================
// Search
// =============================================================================

/// Scores are from the side to move's perspective.
fn negamax(
    game: &Game,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    config: &AiConfig,
    evals: &mut u64,
) -> f64 {
    if depth == 0 {
        *evals += 1;
        return evaluate(game.board(), game.turn(), config);
    }

    let mut successors = legal_successors(game);
    if successors.is_empty() {
        *evals += 1;
        return evaluate(game.board(), game.turn(), config);
    }
    order_successors(game.board(), &mut successors);

    let mut best = f64::NEG_INFINITY;
    for (_, next) in &successors {
        let score = -negamax(next, depth - 1, -beta, -alpha, config, evals);
        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Pick a move for the side to move, or `None` if it has no legal move.
///
/// Every candidate is scored by searching `config.depth - 1` further plies;
/// among moves tied for the best score the highest-priority capture wins and
/// any remaining tie is broken at random.
pub fn pick_move(game: &Game, config: &AiConfig) -> Option<PickResult> {
    let mut successors = legal_successors(game);
    if successors.is_empty() {
        return None;
    }
    order_successors(game.board(), &mut successors);

    let plies = config.depth.max(1);
    let mut evals = 0;
    let scored: Vec<(Move, f64)> = successors
        .iter()
        .map(|(mv, next)| {
            let score = -negamax(
                next,
                plies - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                config,
                &mut evals,
            );
            (*mv, score)
        })
        .collect();

    let max_score = scored
        .iter()
        .map(|&(_, s)| s)
        .fold(f64::NEG_INFINITY, f64::max);
    let best: Vec<&(Move, f64)> = scored
        .iter()
        .filter(|(_, s)| (s - max_score).abs() < 0.001)
        .collect();

    let max_pri = best
        .iter()
        .map(|(mv, _)| move_priority(game.board(), mv))
        .max()
        .unwrap_or(0);
    let top: Vec<&&(Move, f64)> = best
        .iter()
        .filter(|(mv, _)| move_priority(game.board(), mv) == max_pri)
        .collect();

    let index = ((random_f64() * top.len() as f64) as usize).min(top.len() - 1);
    let &&(mv, score) = top[index];
    Some(PickResult { mv, score, evals })
}
