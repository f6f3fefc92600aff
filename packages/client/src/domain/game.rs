//! Turn state machine.
//!
//! Each peer owns an independent [`Game`] and keeps it in step with the other
//! side by applying the same moves in the same order. Nothing here talks to
//! the network.

use domino_server::domain::Seat;

use super::{
    action::Move,
    error::TurnError,
    tile::{BoardEnds, Deal, Side, Tile},
};

/// Consecutive passes that end the match as blocked
const PASSES_TO_BLOCK: u8 = 2;

/// Whether a tile may be placed against the current board.
///
/// The first tile of a match is always legal. After that a tile is legal when
/// either of its pips equals either open end.
pub fn validate_move(tile: &Tile, board_ends: Option<BoardEnds>, placed_count: usize) -> bool {
    if placed_count == 0 {
        return true;
    }
    match board_ends {
        Some(ends) => tile.matches(ends.left) || tile.matches(ends.right),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Seat),
    /// Nobody can place and the boneyard is empty
    Blocked,
}

/// One peer's copy of the match state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    current_player: Seat,
    /// `None` until the first tile is down
    board_ends: Option<BoardEnds>,
    /// Tiles in the order they were placed
    placed: Vec<Tile>,
    hands: [Vec<Tile>; 2],
    boneyard: Vec<Tile>,
    status: GameStatus,
    consecutive_passes: u8,
}

fn slot(seat: Seat) -> usize {
    match seat {
        Seat::One => 0,
        Seat::Two => 1,
    }
}

impl Game {
    /// Start a match from a deal. Seat one moves first.
    pub fn new(deal: Deal) -> Self {
        Self {
            current_player: Seat::One,
            board_ends: None,
            placed: Vec::new(),
            hands: deal.hands,
            boneyard: deal.boneyard,
            status: GameStatus::InProgress,
            consecutive_passes: 0,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(Deal::from_seed(seed))
    }

    pub fn current_player(&self) -> Seat {
        self.current_player
    }

    pub fn board_ends(&self) -> Option<BoardEnds> {
        self.board_ends
    }

    pub fn placed(&self) -> &[Tile] {
        &self.placed
    }

    pub fn hand(&self, seat: Seat) -> &[Tile] {
        &self.hands[slot(seat)]
    }

    pub fn boneyard_len(&self) -> usize {
        self.boneyard.len()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Placements `seat` could make right now, in hand order
    pub fn legal_placements(&self, seat: Seat) -> Vec<(Tile, Side)> {
        self.hand(seat)
            .iter()
            .filter_map(|tile| match self.board_ends {
                None => Some((*tile, Side::Left)),
                Some(ends) => ends
                    .resolve_side(tile, Side::Left)
                    .map(|side| (*tile, side)),
            })
            .collect()
    }

    fn has_legal_placement(&self, seat: Seat) -> bool {
        let ends = self.board_ends;
        let placed = self.placed.len();
        self.hand(seat)
            .iter()
            .any(|tile| validate_move(tile, ends, placed))
    }

    /// Whether `mv` would currently be accepted, ignoring turn ownership
    pub fn validate_move(&self, mv: &Move) -> bool {
        if self.is_over() {
            return false;
        }
        match mv {
            Move::Place { player, .. } => mv.tile().is_some_and(|tile| {
                !self.placed.iter().any(|p| p.same_piece(&tile))
                    && self.hand(*player).iter().any(|t| t.same_piece(&tile))
                    && validate_move(&tile, self.board_ends, self.placed.len())
            }),
            Move::Draw { player } => self.can_draw(*player),
            Move::Pass { player } => self.can_pass(*player),
        }
    }

    fn can_draw(&self, seat: Seat) -> bool {
        !self.boneyard.is_empty() && !self.has_legal_placement(seat)
    }

    fn can_pass(&self, seat: Seat) -> bool {
        self.boneyard.is_empty() && !self.has_legal_placement(seat)
    }

    /// Local entry point: refuses moves made out of turn, then applies.
    pub fn attempt_move(&mut self, local_seat: Seat, mv: &Move) -> Result<(), TurnError> {
        if self.is_over() {
            return Err(TurnError::MatchOver(self.status));
        }
        for attempted in [local_seat, mv.player()] {
            if attempted != self.current_player {
                return Err(TurnError::NotYourTurn {
                    current: self.current_player,
                    attempted,
                });
            }
        }
        self.apply_move(mv)
    }

    /// Apply a move from either seat.
    ///
    /// Turn ownership is not checked here: a relayed move is trusted to have
    /// passed the sender's [`Game::attempt_move`].
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), TurnError> {
        if self.is_over() {
            return Err(TurnError::MatchOver(self.status));
        }

        match *mv {
            Move::Place {
                player,
                left,
                right,
                side,
            } => self.place(player, Tile::new(left, right), side),
            Move::Draw { player } => self.draw(player),
            Move::Pass { player } => self.pass(player),
        }
    }

    fn place(&mut self, player: Seat, tile: Tile, side: Side) -> Result<(), TurnError> {
        if self.placed.iter().any(|p| p.same_piece(&tile)) {
            return Err(TurnError::DuplicateTile(tile));
        }
        if !validate_move(&tile, self.board_ends, self.placed.len()) {
            return Err(TurnError::IllegalMove(tile));
        }
        let next_ends = match self.board_ends {
            None => BoardEnds::new(tile.left, tile.right),
            Some(mut ends) => match ends.resolve_side(&tile, side) {
                Some(Side::Left) => {
                    ends.left = tile.other_end(ends.left).unwrap_or(ends.left);
                    ends
                }
                Some(Side::Right) => {
                    ends.right = tile.other_end(ends.right).unwrap_or(ends.right);
                    ends
                }
                None => return Err(TurnError::IllegalMove(tile)),
            },
        };
        let hand = &mut self.hands[slot(player)];
        let Some(index) = hand.iter().position(|t| t.same_piece(&tile)) else {
            return Err(TurnError::TileNotInHand { tile, player });
        };

        hand.remove(index);
        self.board_ends = Some(next_ends);
        self.placed.push(tile);
        self.consecutive_passes = 0;
        self.current_player = self.current_player.other();
        self.check_win_condition(player);
        Ok(())
    }

    fn draw(&mut self, player: Seat) -> Result<(), TurnError> {
        if !self.can_draw(player) {
            return Err(TurnError::CannotDraw(player));
        }
        if let Some(tile) = self.boneyard.pop() {
            self.hands[slot(player)].push(tile);
        }
        Ok(())
    }

    fn pass(&mut self, player: Seat) -> Result<(), TurnError> {
        if !self.can_pass(player) {
            return Err(TurnError::CannotPass(player));
        }
        self.consecutive_passes += 1;
        self.current_player = self.current_player.other();
        if self.consecutive_passes >= PASSES_TO_BLOCK {
            self.status = GameStatus::Blocked;
        }
        Ok(())
    }

    /// Ends the match in `player`'s favour once their hand is empty
    pub fn check_win_condition(&mut self, player: Seat) -> bool {
        if self.hand(player).is_empty() {
            self.status = GameStatus::Won(player);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(pips: &[(u8, u8)]) -> Vec<Tile> {
        pips.iter().map(|&(l, r)| Tile::new(l, r)).collect()
    }

    fn game_with(one: &[(u8, u8)], two: &[(u8, u8)], boneyard: &[(u8, u8)]) -> Game {
        Game::new(Deal {
            hands: [tiles(one), tiles(two)],
            boneyard: tiles(boneyard),
        })
    }

    fn place(player: Seat, left: u8, right: u8, side: Side) -> Move {
        Move::place(player, Tile::new(left, right), side)
    }

    #[test]
    fn test_first_move_is_always_legal() {
        // テスト項目: 1 枚目はどのタイルでも置ける
        // given (前提条件):
        // when (操作):
        let legal = validate_move(&Tile::new(2, 4), None, 0);

        // then (期待する結果):
        assert!(legal);
    }

    #[test]
    fn test_tile_matching_neither_end_is_illegal() {
        // テスト項目: 盤面の端が (5, 6) のとき [2|2] は置けない
        // given (前提条件):
        let ends = Some(BoardEnds::new(5, 6));

        // when (操作):
        let legal = validate_move(&Tile::new(2, 2), ends, 1);

        // then (期待する結果):
        assert!(!legal);
        assert!(validate_move(&Tile::new(2, 6), ends, 1));
        assert!(validate_move(&Tile::new(5, 0), ends, 3));
    }

    #[test]
    fn test_first_placement_sets_ends_and_flips_turn() {
        // テスト項目: [3|5] を最初に置くと端は (3, 5) になり手番が seat 2 に移る
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (1, 1)], &[(2, 2)], &[]);

        // when (操作):
        let result = game.attempt_move(Seat::One, &place(Seat::One, 3, 5, Side::Left));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(game.board_ends(), Some(BoardEnds::new(3, 5)));
        assert_eq!(game.current_player(), Seat::Two);
        assert_eq!(game.placed(), &[Tile::new(3, 5)]);
        assert_eq!(game.hand(Seat::One), &[Tile::new(1, 1)]);
    }

    #[test]
    fn test_receiver_applies_same_move_to_same_state() {
        // テスト項目: 送信側と受信側で同じ手を適用すると同じ状態になる
        // given (前提条件):
        let mut mover = Game::from_seed(99);
        let mut receiver = Game::from_seed(99);
        let (tile, side) = mover.legal_placements(Seat::One)[0];
        let mv = Move::place(Seat::One, tile, side);

        // when (操作):
        mover.attempt_move(Seat::One, &mv).unwrap();
        receiver.apply_move(&mv).unwrap();

        // then (期待する結果):
        assert_eq!(mover, receiver);
        assert_eq!(receiver.current_player(), Seat::Two);
    }

    #[test]
    fn test_attempt_out_of_turn_is_rejected() {
        // テスト項目: 手番でない seat の attempt_move は NotYourTurn になる
        // given (前提条件):
        let mut game = game_with(&[(3, 5)], &[(2, 2)], &[]);
        let before = game.clone();

        // when (操作):
        let result = game.attempt_move(Seat::Two, &place(Seat::Two, 2, 2, Side::Left));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(TurnError::NotYourTurn {
                current: Seat::One,
                attempted: Seat::Two
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_attempt_on_behalf_of_opponent_is_rejected() {
        // テスト項目: 自分の手番でも相手名義の手は送れない
        // given (前提条件):
        let mut game = game_with(&[(3, 5)], &[(2, 2)], &[]);

        // when (操作):
        let result = game.attempt_move(Seat::One, &place(Seat::Two, 2, 2, Side::Left));

        // then (期待する結果):
        assert!(matches!(result, Err(TurnError::NotYourTurn { .. })));
    }

    #[test]
    fn test_same_tile_is_applied_at_most_once() {
        // テスト項目: 置かれたタイルは向きを変えても二度と適用されない
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (0, 0)], &[(2, 2)], &[]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();
        let before = game.clone();

        // when (操作):
        let result = game.apply_move(&place(Seat::Two, 5, 3, Side::Right));

        // then (期待する結果):
        assert_eq!(result, Err(TurnError::DuplicateTile(Tile::new(5, 3))));
        assert_eq!(game, before);
    }

    #[test]
    fn test_illegal_placement_leaves_state_unchanged() {
        // テスト項目: 端に合わないタイルは IllegalMove で状態も手番も変わらない
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (0, 0)], &[(2, 2), (1, 4)], &[]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();
        let before = game.clone();

        // when (操作):
        let result = game.attempt_move(Seat::Two, &place(Seat::Two, 2, 2, Side::Left));

        // then (期待する結果):
        assert_eq!(result, Err(TurnError::IllegalMove(Tile::new(2, 2))));
        assert_eq!(game, before);
        assert_eq!(game.current_player(), Seat::Two);
    }

    #[test]
    fn test_tile_must_be_in_movers_hand() {
        // テスト項目: 手札にないタイルは TileNotInHand になる
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (0, 0)], &[(2, 2)], &[]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();

        // when (操作):
        let result = game.apply_move(&place(Seat::Two, 5, 6, Side::Right));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(TurnError::TileNotInHand {
                tile: Tile::new(5, 6),
                player: Seat::Two
            })
        );
    }

    #[test]
    fn test_validate_move_agrees_with_apply_for_unplayable_tiles() {
        // テスト項目: 手札にないタイルや置き済みのタイルは端に合っても受け付けないと判定される
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (0, 0)], &[(2, 2), (5, 1)], &[]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();
        let not_in_hand = place(Seat::Two, 5, 6, Side::Right);
        let duplicate = place(Seat::Two, 5, 3, Side::Right);
        let playable = place(Seat::Two, 5, 1, Side::Right);

        // when (操作):
        let verdicts = [
            game.validate_move(&not_in_hand),
            game.validate_move(&duplicate),
            game.validate_move(&playable),
        ];

        // then (期待する結果): apply_move の結果と一致する
        assert_eq!(verdicts, [false, false, true]);
        assert!(game.clone().apply_move(&not_in_hand).is_err());
        assert!(game.clone().apply_move(&duplicate).is_err());
        assert!(game.clone().apply_move(&playable).is_ok());
    }

    #[test]
    fn test_open_ends_follow_placement_side() {
        // テスト項目: つないだ側の端が反対の目に置き換わり、指定側に合わなければ左から合う側に置かれる
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (4, 3), (0, 0)], &[(5, 6), (1, 1)], &[]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();

        // when (操作):
        game.apply_move(&place(Seat::Two, 5, 6, Side::Right)).unwrap();
        let after_right = game.board_ends();
        game.apply_move(&place(Seat::One, 4, 3, Side::Right)).unwrap();

        // then (期待する結果):
        assert_eq!(after_right, Some(BoardEnds::new(3, 6)));
        assert_eq!(game.board_ends(), Some(BoardEnds::new(4, 6)));
        assert_eq!(game.placed().len(), 3);
    }

    #[test]
    fn test_emptying_hand_wins_and_ends_match() {
        // テスト項目: 手札がなくなると勝利し、以降の手はすべて拒否される
        // given (前提条件):
        let mut game = game_with(&[(3, 5)], &[(5, 1)], &[]);

        // when (操作):
        game.attempt_move(Seat::One, &place(Seat::One, 3, 5, Side::Left))
            .unwrap();

        // then (期待する結果):
        assert_eq!(game.status(), GameStatus::Won(Seat::One));
        assert!(game.is_over());
        let next = place(Seat::Two, 5, 1, Side::Right);
        assert!(!game.validate_move(&next));
        assert_eq!(
            game.apply_move(&next),
            Err(TurnError::MatchOver(GameStatus::Won(Seat::One)))
        );
    }

    #[test]
    fn test_check_win_condition_with_cards_left() {
        // テスト項目: 手札が残っていれば勝利にならない
        // given (前提条件):
        let mut game = game_with(&[(3, 5)], &[(5, 1)], &[]);

        // when (操作):
        let won = game.check_win_condition(Seat::Two);

        // then (期待する結果):
        assert!(!won);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_draw_only_without_playable_tile() {
        // テスト項目: 置けるタイルがなければ山札から引け、手番は変わらない
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (0, 0)], &[(1, 1)], &[(2, 4), (6, 5)]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();
        let draw = Move::Draw { player: Seat::Two };

        // when (操作):
        let pass_result = game.attempt_move(Seat::Two, &Move::Pass { player: Seat::Two });
        let draw_result = game.attempt_move(Seat::Two, &draw);

        // then (期待する結果):
        assert_eq!(pass_result, Err(TurnError::CannotPass(Seat::Two)));
        assert!(draw_result.is_ok());
        assert_eq!(game.hand(Seat::Two), &[Tile::new(1, 1), Tile::new(6, 5)]);
        assert_eq!(game.boneyard_len(), 1);
        assert_eq!(game.current_player(), Seat::Two);

        // [6|5] が置けるので、もう引けない
        assert!(!game.validate_move(&draw));
        assert_eq!(
            game.attempt_move(Seat::Two, &draw),
            Err(TurnError::CannotDraw(Seat::Two))
        );
    }

    #[test]
    fn test_two_passes_block_the_match() {
        // テスト項目: 山札が空で両者とも置けず続けてパスすると Blocked になる
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (0, 0)], &[(1, 1)], &[]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();

        // when (操作):
        game.attempt_move(Seat::Two, &Move::Pass { player: Seat::Two })
            .unwrap();
        let after_first = game.status();
        game.attempt_move(Seat::One, &Move::Pass { player: Seat::One })
            .unwrap();

        // then (期待する結果):
        assert_eq!(after_first, GameStatus::InProgress);
        assert_eq!(game.status(), GameStatus::Blocked);
    }

    #[test]
    fn test_legal_placements_lists_playable_tiles() {
        // テスト項目: 置けるタイルとその側が列挙される
        // given (前提条件):
        let mut game = game_with(&[(3, 5), (0, 0)], &[(1, 1), (6, 5), (4, 3)], &[]);
        game.apply_move(&place(Seat::One, 3, 5, Side::Left)).unwrap();

        // when (操作):
        let placements = game.legal_placements(Seat::Two);

        // then (期待する結果):
        assert_eq!(
            placements,
            vec![
                (Tile::new(6, 5), Side::Right),
                (Tile::new(4, 3), Side::Left)
            ]
        );
    }
}
