//! The winners bracket.
//!
//! The first round pairs adjacent slots. A pair with exactly one bye becomes a bye match that is
//! never played: its team is placed directly into the second round and the bye match only keeps
//! its winner target for record-keeping. Every following round pairs matches `2i` and `2i + 1`
//! of the previous round into match `i`.
use crate::{InvariantViolation, MatchId, Matches, Result, Slot, Stage};

/// The matches of the winners bracket, grouped by round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WinnersBracket {
    pub rounds: Vec<Vec<MatchId>>,
    pub final_match: MatchId,
}

impl WinnersBracket {
    /// Returns the two semi-finals, if the bracket has more than one round.
    pub fn semi_finals(&self) -> Option<[MatchId; 2]> {
        let round = self.rounds.len().checked_sub(2)?;

        match self.rounds[round].as_slice() {
            [first, second] => Some([*first, *second]),
            _ => None,
        }
    }
}

/// A team (or pending winner) moving into the next round.
#[derive(Copy, Clone, Debug)]
struct Advance {
    slot: Slot,
    /// The bye match the slot skipped.
    bye: Option<MatchId>,
}

pub(crate) fn build(matches: &mut Matches, slots: &[Slot]) -> Result<WinnersBracket> {
    if slots.len() < 2 || !slots.len().is_power_of_two() {
        return Err(InvariantViolation::BracketSize(slots.len()).into());
    }

    let mut round = Vec::with_capacity(slots.len() / 2);
    let mut advancing = Vec::with_capacity(slots.len() / 2);

    for (index, pair) in slots.chunks_exact(2).enumerate() {
        let advance = match (pair[0], pair[1]) {
            (Slot::Bye, Slot::Bye) => {
                return Err(InvariantViolation::ByePairing {
                    position: index * 2,
                }
                .into());
            }
            (Slot::Bye, slot) | (slot, Slot::Bye) => {
                let id = matches.push(Stage::Winners, 1, [pair[0], pair[1]], true);
                round.push(id);

                Advance {
                    slot,
                    bye: Some(id),
                }
            }
            (first, second) => {
                let id = matches.push(Stage::Winners, 1, [first, second], false);
                round.push(id);

                Advance {
                    slot: Slot::WinnerOf(id),
                    bye: None,
                }
            }
        };

        advancing.push(advance);
    }

    let mut rounds = vec![round];

    while advancing.len() > 1 {
        let number = rounds.len() + 1;

        let mut round = Vec::with_capacity(advancing.len() / 2);
        let mut next = Vec::with_capacity(advancing.len() / 2);

        for pair in advancing.chunks_exact(2) {
            let id = matches.push(Stage::Winners, number, [pair[0].slot, pair[1].slot], false);

            for bye in pair.iter().filter_map(|advance| advance.bye) {
                matches[bye].winner_target = Some(id);
            }

            round.push(id);
            next.push(Advance {
                slot: Slot::WinnerOf(id),
                bye: None,
            });
        }

        log::debug!("Winners round {} has {} matches", number, round.len());

        rounds.push(round);
        advancing = next;
    }

    // The loop always leaves a single match in the last round.
    let final_match = match rounds.last().map(Vec::as_slice) {
        Some([id]) => *id,
        _ => return Err(InvariantViolation::BracketSize(slots.len()).into()),
    };

    Ok(WinnersBracket {
        rounds,
        final_match,
    })
}

/// Creates the match for the third place between the losers of both semi-finals. Returns `None`
/// if the bracket has no semi-finals or one of them is a bye match.
pub(crate) fn build_third_place(
    matches: &mut Matches,
    winners: &WinnersBracket,
) -> Option<MatchId> {
    let [first, second] = winners.semi_finals()?;

    if matches[first].is_bye() || matches[second].is_bye() {
        log::debug!("Skipping third place match: a semi-final is a bye");
        return None;
    }

    Some(matches.push(
        Stage::ThirdPlace,
        winners.rounds.len(),
        [Slot::LoserOf(first), Slot::LoserOf(second)],
        false,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign_slots, seed_order};

    fn winners(team_count: usize) -> (Matches, WinnersBracket) {
        let size = team_count.next_power_of_two();
        let slots = assign_slots(&seed_order(size), team_count).unwrap();

        let mut matches = Matches::new();
        let bracket = build(&mut matches, &slots).unwrap();
        (matches, bracket)
    }

    #[test]
    fn test_winners_two_teams() {
        let (matches, bracket) = winners(2);

        assert_eq!(bracket.rounds, [vec![MatchId(0)]]);
        assert_eq!(bracket.final_match, MatchId(0));
        assert_eq!(matches[MatchId(0)].slots, [Slot::Seed(1), Slot::Seed(2)]);
        assert_eq!(bracket.semi_finals(), None);
    }

    #[test]
    fn test_winners_four_teams() {
        let (matches, bracket) = winners(4);

        assert_eq!(
            bracket.rounds,
            [vec![MatchId(0), MatchId(1)], vec![MatchId(2)]]
        );
        assert_eq!(matches[MatchId(0)].slots, [Slot::Seed(1), Slot::Seed(4)]);
        assert_eq!(matches[MatchId(1)].slots, [Slot::Seed(2), Slot::Seed(3)]);
        assert_eq!(
            matches[MatchId(2)].slots,
            [Slot::WinnerOf(MatchId(0)), Slot::WinnerOf(MatchId(1))]
        );
        assert_eq!(bracket.semi_finals(), Some([MatchId(0), MatchId(1)]));
    }

    #[test]
    fn test_winners_byes_collapse() {
        let (matches, bracket) = winners(5);

        assert_eq!(bracket.rounds.len(), 3);

        let first_round: Vec<bool> = bracket.rounds[0]
            .iter()
            .map(|id| matches[*id].is_bye())
            .collect();
        assert_eq!(first_round, [true, false, true, true]);

        // Seed 1 skips the first round and meets the winner of 4 vs 5.
        let second = &matches[bracket.rounds[1][0]];
        assert_eq!(second.slots, [Slot::Seed(1), Slot::WinnerOf(MatchId(1))]);
        assert_eq!(matches[MatchId(0)].winner_target, Some(second.id));

        // Seeds 2 and 3 both skip the first round.
        let second = &matches[bracket.rounds[1][1]];
        assert_eq!(second.slots, [Slot::Seed(2), Slot::Seed(3)]);
        assert_eq!(matches[MatchId(2)].winner_target, Some(second.id));
        assert_eq!(matches[MatchId(3)].winner_target, Some(second.id));
    }

    #[test]
    fn test_winners_bye_pairing() {
        let mut matches = Matches::new();

        assert_eq!(
            build(
                &mut matches,
                &[Slot::Seed(1), Slot::Seed(2), Slot::Bye, Slot::Bye]
            ),
            Err(InvariantViolation::ByePairing { position: 2 }.into())
        );
    }

    #[test]
    fn test_third_place() {
        let (mut matches, bracket) = winners(4);

        let id = build_third_place(&mut matches, &bracket).unwrap();
        assert_eq!(matches[id].stage, Stage::ThirdPlace);
        assert_eq!(matches[id].round, 2);
        assert_eq!(
            matches[id].slots,
            [Slot::LoserOf(MatchId(0)), Slot::LoserOf(MatchId(1))]
        );

        // The first semi-final of three teams is a bye.
        let (mut matches, bracket) = winners(3);
        assert_eq!(build_third_place(&mut matches, &bracket), None);

        let (mut matches, bracket) = winners(2);
        assert_eq!(build_third_place(&mut matches, &bracket), None);
    }
}
