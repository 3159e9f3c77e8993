use crate::board::Board;
use crate::types::MoveEvent;

/// Owned copy of everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub board: Board,
    pub score: u32,
    pub game_over: bool,
    pub won: bool,
    pub first_win_achieved: bool,
    pub episode_id: u32,
    pub moves: u32,
    pub events: Vec<MoveEvent>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board.clear();
        self.score = 0;
        self.game_over = false;
        self.won = false;
        self.first_win_achieved = false;
        self.episode_id = 0;
        self.moves = 0;
        self.events.clear();
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn max_tile(&self) -> u32 {
        self.board.max_tile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;
    use crate::types::Direction;

    #[test]
    fn snapshot_is_detached_from_the_engine() {
        let mut state = GameState::new(4);
        let snap = state.snapshot();
        for dir in Direction::ALL {
            state.apply_move(dir);
        }
        assert_eq!(snap.moves, 0);
        assert_eq!(snap.board.tile_count(), 2);
        assert_eq!(snap.events.len(), 2);
    }

    #[test]
    fn snapshot_into_reuses_buffers() {
        let state = GameState::new(4);
        let mut snap = GameSnapshot::default();
        state.snapshot_into(&mut snap);
        assert_eq!(&snap.board, state.board());
        assert_eq!(snap.events.as_slice(), state.last_move_events());

        snap.clear();
        assert_eq!(snap.board.tile_count(), 0);
        assert!(snap.events.is_empty());
        assert!(snap.playable());
    }
}
