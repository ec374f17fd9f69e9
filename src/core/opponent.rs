/// Opponent move generators
use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::core::moves::Move;

/// Produces the automated player's move, one per round
pub trait MoveGenerator: Send {
    fn generate(&mut self) -> Move;
}

/// Uniform pick over the three moves, no memory between rounds
pub struct RandomOpponent<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomOpponent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOpponent<StdRng> {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(StdRng::seed_from_u64(seed)),
            None => Self::new(StdRng::from_os_rng()),
        }
    }
}

impl<R: Rng + Send> MoveGenerator for RandomOpponent<R> {
    fn generate(&mut self) -> Move {
        *Move::ALL.choose(&mut self.rng).unwrap_or(&Move::Rock)
    }
}

/// Replays a fixed list of moves, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    moves: Vec<Move>,
    next: usize,
}

impl ScriptedOpponent {
    pub fn new(moves: Vec<Move>) -> Result<Self> {
        if moves.is_empty() {
            return Err(anyhow!("scripted opponent needs at least one move"));
        }
        Ok(Self { moves, next: 0 })
    }

    pub fn always(mv: Move) -> Self {
        Self { moves: vec![mv], next: 0 }
    }
}

impl MoveGenerator for ScriptedOpponent {
    fn generate(&mut self) -> Move {
        let mv = self.moves[self.next];
        self.next = (self.next + 1) % self.moves.len();
        mv
    }
}
