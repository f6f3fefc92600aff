//! Entities of the relay domain: matches and the lobby that forms them.
//!
//! `Lobby` is a plain synchronous state machine. Locking lives in the
//! repository that owns it, so every method here runs inside one critical
//! section.

use std::collections::HashMap;


use super::{LobbyError, MatchId, ParticipantId, Seat, Timestamp};

/// Two participants sharing one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    seats: [ParticipantId; 2],
    pub created_at: Timestamp,
}

impl Match {
    pub fn new(seat_one: ParticipantId, seat_two: ParticipantId, created_at: Timestamp) -> Self {
        Self {
            id: MatchId::generate(),
            seats: [seat_one, seat_two],
            created_at,
        }
    }

    /// Participant sitting at `seat`.
    pub fn participant(&self, seat: Seat) -> ParticipantId {
        match seat {
            Seat::One => self.seats[0],
            Seat::Two => self.seats[1],
        }
    }

    pub fn participants(&self) -> [ParticipantId; 2] {
        self.seats
    }

    pub fn seat_of(&self, participant_id: &ParticipantId) -> Option<Seat> {
        if &self.seats[0] == participant_id {
            Some(Seat::One)
        } else if &self.seats[1] == participant_id {
            Some(Seat::Two)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, participant_id: &ParticipantId) -> Option<ParticipantId> {
        self.seat_of(participant_id)
            .map(|seat| self.participant(seat.other()))
    }
}

/// Result of a participant joining the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    /// The pool was empty; the participant now waits for an opponent.
    Waiting,
    /// The participant completed a pair with the one who was waiting.
    Paired(Match),
}

/// Result of a participant leaving the lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// The participant was waiting and has left the pool.
    LeftPool,
    /// The participant's match was torn down; `opponent` must be told.
    MatchClosed {
        match_id: MatchId,
        opponent: ParticipantId,
    },
    /// The participant was neither waiting nor paired.
    Unknown,
}

/// Where a participant currently stands in the pairing lifecycle.
///
/// A participant whose match was torn down reports `Unpaired` again: the
/// lobby keeps no record of closed matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unpaired,
    Waiting,
    Paired { match_id: MatchId, seat: Seat },
}

/// Snapshot counters of the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobbyStats {
    pub waiting: usize,
    pub active_matches: usize,
}

/// Waiting slot plus the table of active matches.
///
/// Pairing is strictly first-come first-served, two at a time. The waiting
/// pool never holds more than one participant.
#[derive(Debug, Clone, Default)]
pub struct Lobby {
    waiting: Option<ParticipantId>,
    matches: HashMap<MatchId, Match>,
    membership: HashMap<ParticipantId, MatchId>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the participant in the pool, or pair it with the one waiting.
    pub fn join(
        &mut self,
        participant_id: ParticipantId,
        at: Timestamp,
    ) -> Result<Pairing, LobbyError> {
        if self.state_of(&participant_id) != SessionState::Unpaired {
            return Err(LobbyError::AlreadyJoined(participant_id));
        }

        match self.waiting.take() {
            None => {
                self.waiting = Some(participant_id);
                Ok(Pairing::Waiting)
            }
            Some(waiting) => {
                let new_match = Match::new(waiting, participant_id, at);
                self.membership.insert(waiting, new_match.id);
                self.membership.insert(participant_id, new_match.id);
                self.matches.insert(new_match.id, new_match.clone());
                Ok(Pairing::Paired(new_match))
            }
        }
    }

    /// Remove the participant from the pool or tear down its match.
    pub fn leave(&mut self, participant_id: &ParticipantId) -> Departure {
        if self.waiting.as_ref() == Some(participant_id) {
            self.waiting = None;
            return Departure::LeftPool;
        }

        let Some(match_id) = self.membership.remove(participant_id) else {
            return Departure::Unknown;
        };
        let Some(closed) = self.matches.remove(&match_id) else {
            return Departure::Unknown;
        };

        // 相手も membership から外す（Closed は Unpaired として扱う）
        let Some(opponent) = closed.opponent_of(participant_id) else {
            return Departure::Unknown;
        };
        self.membership.remove(&opponent);

        Departure::MatchClosed { match_id, opponent }
    }

    pub fn opponent_of(&self, participant_id: &ParticipantId) -> Option<ParticipantId> {
        let match_id = self.membership.get(participant_id)?;
        self.matches.get(match_id)?.opponent_of(participant_id)
    }

    pub fn state_of(&self, participant_id: &ParticipantId) -> SessionState {
        if self.waiting.as_ref() == Some(participant_id) {
            return SessionState::Waiting;
        }
        self.membership
            .get(participant_id)
            .and_then(|match_id| self.matches.get(match_id))
            .and_then(|m| {
                m.seat_of(participant_id).map(|seat| SessionState::Paired {
                    match_id: m.id,
                    seat,
                })
            })
            .unwrap_or(SessionState::Unpaired)
    }

    pub fn stats(&self) -> LobbyStats {
        LobbyStats {
            waiting: usize::from(self.waiting.is_some()),
            active_matches: self.matches.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> Timestamp {
        Timestamp::new(1_000)
    }

    fn assert_invariants(lobby: &Lobby) {
        assert!(lobby.stats().waiting <= 1);
        for m in lobby.matches.values() {
            let [one, two] = m.participants();
            assert_ne!(one, two);
            assert_eq!(lobby.membership.get(&one), Some(&m.id));
            assert_eq!(lobby.membership.get(&two), Some(&m.id));
        }
        assert_eq!(lobby.membership.len(), lobby.matches.len() * 2);
    }

    #[test]
    fn test_first_participant_waits() {
        // テスト項目: 待機プールが空のとき、最初の参加者は Waiting になる
        // given (前提条件):
        let mut lobby = Lobby::new();
        let alice = ParticipantId::generate();

        // when (操作):
        let result = lobby.join(alice, at());

        // then (期待する結果):
        assert_eq!(result, Ok(Pairing::Waiting));
        assert_eq!(lobby.state_of(&alice), SessionState::Waiting);
        assert_eq!(
            lobby.stats(),
            LobbyStats {
                waiting: 1,
                active_matches: 0
            }
        );
    }

    #[test]
    fn test_second_participant_pairs_with_waiting_one() {
        // テスト項目: 2 人目の参加でマッチが作られ、待機プールが空に戻る
        // given (前提条件):
        let mut lobby = Lobby::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        lobby.join(alice, at()).unwrap();

        // when (操作):
        let result = lobby.join(bob, at()).unwrap();

        // then (期待する結果): 待っていた alice が seat 1
        let Pairing::Paired(m) = result else {
            panic!("expected a match");
        };
        assert_eq!(m.participant(Seat::One), alice);
        assert_eq!(m.participant(Seat::Two), bob);
        assert_eq!(
            lobby.stats(),
            LobbyStats {
                waiting: 0,
                active_matches: 1
            }
        );
        assert_eq!(
            lobby.state_of(&alice),
            SessionState::Paired {
                match_id: m.id,
                seat: Seat::One
            }
        );
        assert_eq!(
            lobby.state_of(&bob),
            SessionState::Paired {
                match_id: m.id,
                seat: Seat::Two
            }
        );
    }

    #[test]
    fn test_pairing_is_fifo() {
        // テスト項目: A, B, C の順に接続すると A と B がペアになり、C は待機する
        // given (前提条件):
        let mut lobby = Lobby::new();
        let a = ParticipantId::generate();
        let b = ParticipantId::generate();
        let c = ParticipantId::generate();

        // when (操作):
        lobby.join(a, at()).unwrap();
        lobby.join(b, at()).unwrap();
        let third = lobby.join(c, at()).unwrap();

        // then (期待する結果):
        assert_eq!(lobby.opponent_of(&a), Some(b));
        assert_eq!(lobby.opponent_of(&b), Some(a));
        assert_eq!(third, Pairing::Waiting);
        assert_eq!(lobby.opponent_of(&c), None);
    }

    #[test]
    fn test_join_twice_is_rejected() {
        // テスト項目: 同じ参加者の二重 join はエラー
        // given (前提条件):
        let mut lobby = Lobby::new();
        let alice = ParticipantId::generate();
        lobby.join(alice, at()).unwrap();

        // when (操作):
        let result = lobby.join(alice, at());

        // then (期待する結果):
        assert_eq!(result, Err(LobbyError::AlreadyJoined(alice)));
        assert_eq!(lobby.stats().waiting, 1);
    }

    #[test]
    fn test_waiting_participant_leaves_pool() {
        // テスト項目: 待機中の参加者が切断すると待機プールが空になる
        // given (前提条件):
        let mut lobby = Lobby::new();
        let alice = ParticipantId::generate();
        lobby.join(alice, at()).unwrap();

        // when (操作):
        let departure = lobby.leave(&alice);

        // then (期待する結果):
        assert_eq!(departure, Departure::LeftPool);
        assert_eq!(lobby.stats(), LobbyStats::default());
        assert_eq!(lobby.state_of(&alice), SessionState::Unpaired);
    }

    #[test]
    fn test_leaving_match_tears_it_down() {
        // テスト項目: マッチ中の参加者が切断するとマッチが破棄され、相手が通知対象になる
        // given (前提条件):
        let mut lobby = Lobby::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        lobby.join(alice, at()).unwrap();
        let Pairing::Paired(m) = lobby.join(bob, at()).unwrap() else {
            panic!("expected a match");
        };

        // when (操作):
        let departure = lobby.leave(&alice);

        // then (期待する結果):
        assert_eq!(
            departure,
            Departure::MatchClosed {
                match_id: m.id,
                opponent: bob
            }
        );
        assert_eq!(lobby.opponent_of(&bob), None);
        assert_eq!(lobby.state_of(&bob), SessionState::Unpaired);
        assert_eq!(lobby.stats(), LobbyStats::default());
    }

    #[test]
    fn test_leave_is_idempotent() {
        // テスト項目: 既に外れた参加者の leave は Unknown を返す
        // given (前提条件):
        let mut lobby = Lobby::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        lobby.join(alice, at()).unwrap();
        lobby.join(bob, at()).unwrap();
        lobby.leave(&alice);

        // when (操作):
        let again = lobby.leave(&alice);
        let opponent = lobby.leave(&bob);

        // then (期待する結果):
        assert_eq!(again, Departure::Unknown);
        assert_eq!(opponent, Departure::Unknown);
    }

    #[test]
    fn test_closed_participant_does_not_rejoin_previous_match() {
        // テスト項目: マッチ破棄後に残った参加者は新しい参加者と自動でペアにならない
        // given (前提条件):
        let mut lobby = Lobby::new();
        let alice = ParticipantId::generate();
        let bob = ParticipantId::generate();
        lobby.join(alice, at()).unwrap();
        lobby.join(bob, at()).unwrap();
        lobby.leave(&alice);

        // when (操作):
        let carol = ParticipantId::generate();
        let result = lobby.join(carol, at()).unwrap();

        // then (期待する結果):
        assert_eq!(result, Pairing::Waiting);
        assert_eq!(lobby.opponent_of(&bob), None);
    }

    #[test]
    fn test_invariants_hold_over_event_sequence() {
        // テスト項目: 任意の接続・切断列の後も、待機数は 0 か 1、各マッチは 2 人
        // given (前提条件):
        let mut lobby = Lobby::new();
        let ids: Vec<ParticipantId> = (0..9).map(|_| ParticipantId::generate()).collect();

        // when (操作): 接続と切断を交互に混ぜる
        for (i, id) in ids.iter().enumerate() {
            lobby.join(*id, at()).unwrap();
            assert_invariants(&lobby);
            if i % 3 == 2 {
                lobby.leave(&ids[i - 1]);
                assert_invariants(&lobby);
            }
        }
        for id in ids.iter().rev() {
            lobby.leave(id);
            assert_invariants(&lobby);
        }

        // then (期待する結果):
        assert_eq!(lobby.stats(), LobbyStats::default());
    }
}
