//! Who decides the local seat's moves, and who gets told about the match.

use domino_server::domain::Seat;

use crate::domain::{Game, GameStatus, Move};

/// Decision and presentation hooks driven by the match session.
///
/// Only [`GameView::choose_move`] is required; the notifications default to
/// doing nothing.
pub trait GameView: Send {
    /// Pick the next move for `seat`. Called only on the local seat's turn.
    fn choose_move(&mut self, seat: Seat, game: &Game) -> Move;

    fn on_start(&mut self, _seat: Seat, _game: &Game) {}

    /// Called after a move from either seat was applied
    fn on_move(&mut self, _mv: &Move, _game: &Game) {}

    fn on_finish(&mut self, _seat: Seat, _game: &Game) {}
}

/// Plays the heaviest legal tile, otherwise draws, otherwise passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoPlayer;

impl GameView for AutoPlayer {
    fn choose_move(&mut self, seat: Seat, game: &Game) -> Move {
        let best = game
            .legal_placements(seat)
            .into_iter()
            .max_by_key(|(tile, _)| tile.pips());

        match best {
            Some((tile, side)) => Move::place(seat, tile, side),
            None if game.boneyard_len() > 0 => Move::Draw { player: seat },
            None => Move::Pass { player: seat },
        }
    }

    fn on_start(&mut self, seat: Seat, game: &Game) {
        let hand: Vec<String> = game.hand(seat).iter().map(|t| t.to_string()).collect();
        tracing::info!("Playing as {} with hand {}", seat, hand.join(" "));
    }

    fn on_move(&mut self, mv: &Move, game: &Game) {
        match game.board_ends() {
            Some(ends) => tracing::info!("{} -> open ends {}", mv, ends),
            None => tracing::info!("{}", mv),
        }
    }

    fn on_finish(&mut self, seat: Seat, game: &Game) {
        match game.status() {
            GameStatus::Won(winner) if winner == seat => tracing::info!("{} wins!", seat),
            GameStatus::Won(winner) => tracing::info!("{} wins, {} loses", winner, seat),
            GameStatus::Blocked => {
                tracing::info!("Match blocked after {} tiles", game.placed().len())
            }
            GameStatus::InProgress => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Deal, Side, Tile};

    fn game_with(one: Vec<Tile>, two: Vec<Tile>, boneyard: Vec<Tile>) -> Game {
        Game::new(Deal {
            hands: [one, two],
            boneyard,
        })
    }

    #[test]
    fn test_auto_player_opens_with_heaviest_tile() {
        // テスト項目: 最初の手では目の合計が最大のタイルを置く
        // given (前提条件):
        let game = game_with(
            vec![Tile::new(1, 2), Tile::new(6, 6), Tile::new(3, 4)],
            vec![Tile::new(0, 0)],
            vec![],
        );

        // when (操作):
        let mv = AutoPlayer.choose_move(Seat::One, &game);

        // then (期待する結果):
        assert_eq!(mv, Move::place(Seat::One, Tile::new(6, 6), Side::Left));
        assert!(game.validate_move(&mv));
    }

    #[test]
    fn test_auto_player_draws_then_passes() {
        // テスト項目: 置けなければ山札から引き、山札が空ならパスする
        // given (前提条件):
        let mut with_boneyard = game_with(
            vec![Tile::new(3, 5), Tile::new(0, 0)],
            vec![Tile::new(1, 1)],
            vec![Tile::new(2, 4)],
        );
        let mut without_boneyard = game_with(
            vec![Tile::new(3, 5), Tile::new(0, 0)],
            vec![Tile::new(1, 1)],
            vec![],
        );
        let opening = Move::place(Seat::One, Tile::new(3, 5), Side::Left);
        with_boneyard.apply_move(&opening).unwrap();
        without_boneyard.apply_move(&opening).unwrap();

        // when (操作):
        let draw = AutoPlayer.choose_move(Seat::Two, &with_boneyard);
        let pass = AutoPlayer.choose_move(Seat::Two, &without_boneyard);

        // then (期待する結果):
        assert_eq!(draw, Move::Draw { player: Seat::Two });
        assert_eq!(pass, Move::Pass { player: Seat::Two });
    }

    #[test]
    fn test_auto_player_finishes_a_seeded_game() {
        // テスト項目: 自動プレイヤー同士で 1 つの Game を最後まで進められる
        // given (前提条件):
        let mut game = Game::from_seed(2024);
        let mut player = AutoPlayer;

        // when (操作):
        for _ in 0..200 {
            if game.is_over() {
                break;
            }
            let seat = game.current_player();
            let mv = player.choose_move(seat, &game);
            game.attempt_move(seat, &mv).unwrap();
        }

        // then (期待する結果):
        assert!(game.is_over());
    }
}
