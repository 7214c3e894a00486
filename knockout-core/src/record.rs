use crate::{Match, MatchId, Matches, Slot, Stage, Teams};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A flat, self-describing view of a single [`Match`].
///
/// Slots are described using team names and display numbers, e.g. `Seed 3 (Gamma)` or
/// `Winner of #5`. The targets still refer to [`MatchId`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchRecord {
    pub id: MatchId,
    pub number: usize,
    pub stage: Stage,
    pub round: usize,
    pub losers_round: Option<usize>,
    pub slot1: String,
    pub slot2: String,
    pub winner_target: Option<MatchId>,
    pub loser_target: Option<MatchId>,
    pub is_bye: bool,
}

impl MatchRecord {
    pub(crate) fn new(m: &Match, teams: &Teams, matches: &Matches) -> Self {
        Self {
            id: m.id,
            number: m.number,
            stage: m.stage,
            round: m.round,
            losers_round: m.losers_round(),
            slot1: describe(m.slots[0], teams, matches),
            slot2: describe(m.slots[1], teams, matches),
            winner_target: m.winner_target,
            loser_target: m.loser_target,
            is_bye: m.is_bye,
        }
    }
}

fn describe(slot: Slot, teams: &Teams, matches: &Matches) -> String {
    let number = |id: MatchId| matches.get(id).map_or(0, Match::number);

    match slot {
        Slot::Seed(seed) => match teams.get_seed(seed) {
            Some(team) => format!("Seed {} ({})", seed, team.name),
            None => format!("Seed {}", seed),
        },
        Slot::Bye => String::from("Bye"),
        Slot::WinnerOf(id) => format!("Winner of #{}", number(id)),
        Slot::LoserOf(id) => format!("Loser of #{}", number(id)),
    }
}
