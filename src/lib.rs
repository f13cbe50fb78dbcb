use std::fmt::Display;

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod types;
pub mod worker;

use crate::board::Board;
use crate::game::GameInstance;
use crate::types::{Cell, Coord, Difficulty, Player};
use crate::worker::SearchRequest;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Routes `log` output and panics to the browser console.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}

/// Worker entry point: `{ cells, color, difficulty, depth? }` in, a move or
/// `undefined` out.
#[wasm_bindgen(js_name = findMove)]
pub fn find_move(request: JsValue) -> Result<JsValue, JsValue> {
    let request: SearchRequest = serde_wasm_bindgen::from_value(request)?;
    let selected = worker::handle_request(&request, &mut rand::thread_rng()).map_err(js_error)?;
    match selected {
        Some(mv) => Ok(serde_wasm_bindgen::to_value(&mv)?),
        None => Ok(JsValue::UNDEFINED),
    }
}

#[wasm_bindgen(js_name = legalMoves)]
pub fn legal_moves(cells: JsValue, x: u8, y: u8) -> Result<JsValue, JsValue> {
    let cells: Vec<Cell> = serde_wasm_bindgen::from_value(cells)?;
    let moves = worker::legal_moves(&cells, Coord::new(x, y)).map_err(js_error)?;
    Ok(serde_wasm_bindgen::to_value(&moves)?)
}

/// Parses a placement string into the 64-cell array used by `findMove`.
#[wasm_bindgen(js_name = parsePlacement)]
pub fn parse_placement(placement: &str) -> Result<JsValue, JsValue> {
    let board: Board = placement.parse().map_err(js_error)?;
    Ok(serde_wasm_bindgen::to_value(&board.cells().to_vec())?)
}

/// Human against the AI, driven from JavaScript.
#[wasm_bindgen]
pub struct Game {
    inner: GameInstance,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new(human: &str, difficulty: &str) -> Result<Game, JsValue> {
        let human: Player = human.parse().map_err(js_error)?;
        let difficulty: Difficulty = difficulty.parse().map_err(js_error)?;
        Ok(Self {
            inner: GameInstance::new_with_default_selector(human, difficulty),
        })
    }

    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, difficulty: &str) -> Result<(), JsValue> {
        self.inner.difficulty = difficulty.parse().map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = tryMove)]
    pub fn try_move(&mut self, from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> Result<(), JsValue> {
        let from = checked_coord(from_x, from_y)?;
        let to = checked_coord(to_x, to_y)?;
        self.inner.try_move(from, to).map_err(js_error)
    }

    #[wasm_bindgen(js_name = hasLegalMoves)]
    pub fn has_legal_moves(&self) -> bool {
        self.inner.has_legal_moves_for_current()
    }

    /// Gives up the human's turn; only allowed when no move exists.
    pub fn pass(&mut self) -> Result<(), JsValue> {
        self.inner.pass().map_err(js_error)
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<(), JsValue> {
        self.inner.do_ai_move().map_err(js_error)
    }

    #[wasm_bindgen(js_name = legalDestinations)]
    pub fn legal_destinations(&self, x: u8, y: u8) -> Result<JsValue, JsValue> {
        let from = checked_coord(x, y)?;
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_destinations(from))?)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.to_game_state())?)
    }
}

fn checked_coord(x: u8, y: u8) -> Result<Coord, JsValue> {
    let coord = Coord::new(x, y);
    if !coord.is_on_board() {
        return Err(js_error(error::RequestError::OffBoard(coord)));
    }
    Ok(coord)
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
