//! The losers bracket of a double elimination tournament.
//!
//! The losers bracket is built by simulating a queue of entrants per losers round. An entrant is
//! either a team that just lost in the winners bracket or the winner of an earlier losers match.
//! The losers of each winners round are dropped into a fixed losers round (see [`DropRegime`]),
//! then every losers round pairs its queue:
//!
//! 1. Fresh winners bracket losers are paired against losers bracket winners first.
//! 2. The remaining entrants (all of one kind) are paired among themselves, skipping pairings
//!    where two winners bracket losers could meet again right away.
//! 3. A single leftover entrant is carried into the next round without playing.
//!
//! The winner of every losers match is queued for the next losers round.
//!
//! Only step 2 avoids rematches, and only between two winners bracket losers whose matches feed
//! each other. A winners bracket loser can still meet the winner of a losers match that was fed
//! by the loser of its own previous winners match. For team counts that are not a power of two
//! a few of these pairings are unavoidable with a fixed drop order (the first one shows up at 5
//! teams). Power-of-two brackets have none.
use std::collections::VecDeque;
use std::mem;

use crate::utils::NumExt;
use crate::winners::WinnersBracket;
use crate::{InvariantViolation, MatchId, Matches, Result, Slot, Stage};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rule deciding which losers round the losers of a winners round drop into.
///
/// Winners round 1 always drops into losers round 1. For a later winners round `r`:
/// - [`Lower`]: the team count is closer to the power of two below it (ties included). Losers of
///   round `r` drop into losers round `2r - 3`, so the first losers round also takes the losers
///   of winners round 2.
/// - [`Upper`]: the team count is a power of two or closer to the power of two above it. Losers
///   of round `r` drop into losers round `2r - 2`.
///
/// [`Lower`]: Self::Lower
/// [`Upper`]: Self::Upper
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DropRegime {
    Lower,
    Upper,
}

impl DropRegime {
    /// Returns the regime used for a bracket with `team_count` teams.
    ///
    /// # Examples
    ///
    /// ```
    /// # use knockout_core::DropRegime;
    /// assert_eq!(DropRegime::new(8), DropRegime::Upper);
    /// assert_eq!(DropRegime::new(5), DropRegime::Lower);
    /// assert_eq!(DropRegime::new(7), DropRegime::Upper);
    /// ```
    pub fn new(team_count: usize) -> Self {
        if team_count.is_power_of_two() {
            return Self::Upper;
        }

        // Number of first round spots in the bracket and the real matches played in them.
        let half = team_count.next_power_of_two() / 2;
        let first_round = team_count - half;

        if first_round <= half / 2 {
            Self::Lower
        } else {
            Self::Upper
        }
    }

    /// Returns the 1-based losers round the losers of the 1-based `winners_round` drop into.
    pub fn target(self, winners_round: usize) -> usize {
        match (self, winners_round) {
            (_, 0 | 1) => 1,
            (Self::Lower, round) => 2 * round - 3,
            (Self::Upper, round) => 2 * round - 2,
        }
    }

    /// Returns the number of losers rounds of a bracket with `winners_rounds` winners rounds. The
    /// last losers round is the one the loser of the winners final drops into.
    #[inline]
    pub fn losers_rounds(self, winners_rounds: usize) -> usize {
        self.target(winners_rounds)
    }

    /// Returns the number of losers rounds of a double elimination bracket with `team_count`
    /// teams.
    #[inline]
    pub fn losers_rounds_for(team_count: usize) -> usize {
        Self::new(team_count).losers_rounds(team_count.ilog2_ceil())
    }
}

/// A token waiting in a losers round queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Entrant {
    /// The loser of a winners bracket match.
    WbLoser(MatchId),
    /// The winner of a losers bracket match.
    LbWinner(MatchId),
}

impl Entrant {
    #[inline]
    fn slot(self) -> Slot {
        match self {
            Self::WbLoser(id) => Slot::LoserOf(id),
            Self::LbWinner(id) => Slot::WinnerOf(id),
        }
    }

    #[inline]
    fn is_wb_loser(&self) -> bool {
        matches!(self, Self::WbLoser(_))
    }
}

/// The matches of the losers bracket, grouped by round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LosersBracket {
    pub rounds: Vec<Vec<MatchId>>,
    pub final_match: MatchId,
}

pub(crate) fn build(
    matches: &mut Matches,
    winners: &WinnersBracket,
    team_count: usize,
) -> Result<LosersBracket> {
    let regime = DropRegime::new(team_count);
    let total = regime.losers_rounds(winners.rounds.len());

    log::debug!(
        "Building {} losers rounds for {} teams using the {:?} drop regime",
        total,
        team_count,
        regime
    );

    let mut queues: Vec<Vec<Entrant>> = vec![Vec::new(); total];

    for (index, round) in winners.rounds.iter().enumerate() {
        let number = index + 1;
        let target = regime.target(number);

        let queue = match queues.get_mut(target - 1) {
            Some(queue) => queue,
            None => {
                return Err(InvariantViolation::LosersRounds {
                    expected: total,
                    found: target,
                }
                .into())
            }
        };

        // Bye matches have no loser.
        let drops = round
            .iter()
            .copied()
            .filter(|id| !matches[*id].is_bye())
            .map(Entrant::WbLoser);

        // Alternate the drop order to keep teams from the same part of the winners bracket
        // apart.
        if number % 2 == 0 {
            queue.extend(drops.rev());
        } else {
            queue.extend(drops);
        }
    }

    let mut rounds = Vec::with_capacity(total);
    let mut carry = Vec::new();

    for index in 0..total {
        let number = index + 1;

        let mut queue = mem::take(&mut carry);
        queue.append(&mut queues[index]);

        let pairs = pair_entrants(matches, queue, &mut carry);
        if pairs.is_empty() {
            return Err(InvariantViolation::EmptyLosersRound(number).into());
        }

        let mut round = Vec::with_capacity(pairs.len());
        for (first, second) in pairs {
            let id = matches.push(Stage::Losers, number, [first.slot(), second.slot()], false);
            round.push(id);

            if let Some(next) = queues.get_mut(index + 1) {
                next.push(Entrant::LbWinner(id));
            }
        }

        log::debug!(
            "Losers round {} has {} matches, {} entrants carried",
            number,
            round.len(),
            carry.len()
        );

        rounds.push(round);
    }

    match rounds.last().map(Vec::as_slice) {
        Some([final_match]) if carry.is_empty() => {
            let final_match = *final_match;
            Ok(LosersBracket {
                rounds,
                final_match,
            })
        }
        Some(round) => Err(InvariantViolation::UnresolvedLosersQueue {
            remaining: round.len() - 1 + carry.len(),
        }
        .into()),
        None => Err(InvariantViolation::EmptyLosersRound(1).into()),
    }
}

/// Pairs the entrants of a single losers round. A single unpaired entrant is pushed into
/// `carry`.
fn pair_entrants(
    matches: &Matches,
    queue: Vec<Entrant>,
    carry: &mut Vec<Entrant>,
) -> Vec<(Entrant, Entrant)> {
    let (wb_losers, lb_winners): (Vec<Entrant>, Vec<Entrant>) =
        queue.into_iter().partition(Entrant::is_wb_loser);

    let cross = wb_losers.len().min(lb_winners.len());

    let mut pairs: Vec<(Entrant, Entrant)> = wb_losers
        .iter()
        .copied()
        .zip(lb_winners.iter().copied())
        .collect();

    let mut rest: VecDeque<Entrant> = wb_losers[cross..]
        .iter()
        .chain(&lb_winners[cross..])
        .copied()
        .collect();

    while let Some(first) = rest.pop_front() {
        let position = match rest.iter().position(|other| !is_rematch(matches, first, *other)) {
            Some(position) => position,
            // Nothing left to pair with.
            None if rest.is_empty() => {
                carry.push(first);
                break;
            }
            None => 0,
        };

        if let Some(second) = rest.remove(position) {
            pairs.push((first, second));
        }
    }

    pairs
}

/// Returns `true` if two winners bracket losers could be the same pair of teams that already met:
/// one of the matches was fed by the winner of the other.
fn is_rematch(matches: &Matches, first: Entrant, second: Entrant) -> bool {
    match (first, second) {
        (Entrant::WbLoser(a), Entrant::WbLoser(b)) => {
            matches[b].slots.contains(&Slot::WinnerOf(a))
                || matches[a].slots.contains(&Slot::WinnerOf(b))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign_slots, seed_order, winners};

    fn losers(team_count: usize) -> (Matches, WinnersBracket, LosersBracket) {
        let size = team_count.next_power_of_two();
        let slots = assign_slots(&seed_order(size), team_count).unwrap();

        let mut matches = Matches::new();
        let winners = winners::build(&mut matches, &slots).unwrap();
        let losers = build(&mut matches, &winners, team_count).unwrap();
        (matches, winners, losers)
    }

    fn round_sizes(bracket: &LosersBracket) -> Vec<usize> {
        bracket.rounds.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_drop_regime() {
        assert_eq!(DropRegime::new(3), DropRegime::Lower);
        assert_eq!(DropRegime::new(4), DropRegime::Upper);
        assert_eq!(DropRegime::new(6), DropRegime::Lower);
        assert_eq!(DropRegime::new(7), DropRegime::Upper);
        assert_eq!(DropRegime::new(12), DropRegime::Lower);
        assert_eq!(DropRegime::new(13), DropRegime::Upper);
        assert_eq!(DropRegime::new(16), DropRegime::Upper);

        assert_eq!(DropRegime::Upper.target(1), 1);
        assert_eq!(DropRegime::Upper.target(2), 2);
        assert_eq!(DropRegime::Upper.target(3), 4);
        assert_eq!(DropRegime::Lower.target(2), 1);
        assert_eq!(DropRegime::Lower.target(3), 3);

        assert_eq!(DropRegime::losers_rounds_for(3), 1);
        assert_eq!(DropRegime::losers_rounds_for(8), 4);
        assert_eq!(DropRegime::losers_rounds_for(16), 6);
        assert_eq!(DropRegime::losers_rounds_for(9), 5);
    }

    #[test]
    fn test_losers_three_teams() {
        let (matches, winners, losers) = losers(3);

        // Winners: 1 vs Bye, 2 vs 3, 1 vs W(2 vs 3).
        assert_eq!(winners.rounds.len(), 2);
        assert_eq!(round_sizes(&losers), [1]);

        let final_match = &matches[losers.final_match];
        assert_eq!(
            final_match.slots,
            [Slot::LoserOf(MatchId(1)), Slot::LoserOf(winners.final_match)]
        );
    }

    #[test]
    fn test_losers_four_teams() {
        let (matches, winners, losers) = losers(4);

        assert_eq!(round_sizes(&losers), [1, 1]);
        assert_eq!(
            matches[losers.rounds[0][0]].slots,
            [Slot::LoserOf(MatchId(0)), Slot::LoserOf(MatchId(1))]
        );
        assert_eq!(
            matches[losers.final_match].slots,
            [
                Slot::LoserOf(winners.final_match),
                Slot::WinnerOf(losers.rounds[0][0])
            ]
        );
    }

    #[test]
    fn test_losers_eight_teams() {
        let (matches, winners, losers) = losers(8);

        assert_eq!(round_sizes(&losers), [2, 2, 1, 1]);

        // Losers of the second winners round drop in reverse order.
        let second_round = &winners.rounds[1];
        assert_eq!(
            matches[losers.rounds[1][0]].slots,
            [
                Slot::LoserOf(second_round[1]),
                Slot::WinnerOf(losers.rounds[0][0])
            ]
        );
        assert_eq!(
            matches[losers.rounds[1][1]].slots,
            [
                Slot::LoserOf(second_round[0]),
                Slot::WinnerOf(losers.rounds[0][1])
            ]
        );

        assert_eq!(
            matches[losers.final_match].slots[0],
            Slot::LoserOf(winners.final_match)
        );
    }

    #[test]
    fn test_losers_five_teams() {
        let (matches, winners, losers) = losers(5);

        assert_eq!(round_sizes(&losers), [1, 1, 1]);

        // The loser of 4 vs 5 must not meet the loser of 1 vs W(4 vs 5) right away.
        let first = &matches[losers.rounds[0][0]];
        assert_eq!(
            first.slots,
            [Slot::LoserOf(MatchId(1)), Slot::LoserOf(winners.rounds[1][1])]
        );
    }

    #[test]
    fn test_losers_seven_teams_carry() {
        let (matches, _, losers) = losers(7);

        // Three first round losers: one of them waits for the second losers round.
        assert_eq!(round_sizes(&losers), [1, 2, 1, 1]);

        let carried = losers.rounds[1]
            .iter()
            .flat_map(|id| matches[*id].slots)
            .filter(|slot| matches!(slot, Slot::LoserOf(id) if matches[*id].round == 1))
            .count();
        assert_eq!(carried, 1);
    }

    #[test]
    fn test_losers_match_count() {
        for team_count in 3..=130 {
            let (matches, _, losers) = losers(team_count);

            let count: usize = losers.rounds.iter().map(Vec::len).sum();
            assert_eq!(count, team_count - 2, "team_count = {}", team_count);
            assert_eq!(
                losers.rounds.len(),
                DropRegime::losers_rounds_for(team_count)
            );
            assert_eq!(matches.stage(Stage::Losers).count(), team_count - 2);
        }
    }

    /// Counts losers matches where a winners bracket loser faces the winner of a losers match
    /// that was fed by the loser of a match the winners bracket loser came out of.
    fn cross_rematches(matches: &Matches) -> usize {
        matches
            .stage(Stage::Losers)
            .filter(|m| {
                let (dropped, previous) = match m.slots {
                    [Slot::LoserOf(a), Slot::WinnerOf(b)]
                    | [Slot::WinnerOf(b), Slot::LoserOf(a)] => (a, b),
                    _ => return false,
                };

                matches[previous].slots.iter().any(|slot| match slot {
                    Slot::LoserOf(c) => matches[dropped].slots.contains(&Slot::WinnerOf(*c)),
                    _ => false,
                })
            })
            .count()
    }

    #[test]
    fn test_cross_rematches() {
        for team_count in [4, 8, 16, 32, 64, 128, 256] {
            let (matches, _, _) = losers(team_count);
            assert_eq!(cross_rematches(&matches), 0, "team_count = {}", team_count);
        }

        // 1 vs W(4 vs 5) drops into the second losers round, where it meets the winner of
        // L(4 vs 5) vs L(2 vs 3).
        let (matches, winners, losers) = losers(5);
        assert_eq!(cross_rematches(&matches), 1);
        assert_eq!(
            matches[losers.rounds[1][0]].slots,
            [
                Slot::LoserOf(winners.rounds[1][0]),
                Slot::WinnerOf(losers.rounds[0][0])
            ]
        );

        let (matches, _, _) = self::losers(9);
        assert!(cross_rematches(&matches) > 0);
    }

    #[test]
    fn test_no_direct_rematch() {
        for team_count in 4..=128 {
            let (matches, _, _) = losers(team_count);

            for m in matches.stage(Stage::Losers) {
                if let [Slot::LoserOf(a), Slot::LoserOf(b)] = m.slots {
                    assert!(
                        !is_rematch(&matches, Entrant::WbLoser(a), Entrant::WbLoser(b)),
                        "team_count = {}, match {}",
                        team_count,
                        m.id
                    );
                }
            }
        }
    }
}
