use crate::options::{TournamentOptionValues, TournamentOptions};
use crate::record::MatchRecord;
use crate::{
    assign_slots, grand_finals, linker, losers, seed_order, winners, ConfigurationError,
    DropRegime, EliminationType, InvariantViolation, Match, MatchId, Matches, Result, Teams,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A generated knockout bracket.
///
/// A `Bracket` contains every match of the tournament, including bye matches that are never
/// played and the reset match of the grand finals. All progression edges between the matches
/// are resolved and validated when the bracket is created. The topology never changes
/// afterwards, the only exception being [`apply_grand_finals`].
///
/// [`apply_grand_finals`]: Self::apply_grand_finals
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Bracket {
    kind: EliminationType,
    teams: Teams,
    matches: Matches,
    options: TournamentOptionValues,
    bracket_size: usize,
    bye_count: usize,
    winners_rounds: usize,
    losers_rounds: usize,
    winners_final: MatchId,
    losers_final: Option<MatchId>,
    third_place_match: Option<MatchId>,
    grand_finals: Option<MatchId>,
    grand_finals_reset: Option<MatchId>,
}

impl Bracket {
    /// Creates a new `Bracket` for `teams` using the default options of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if there are not enough teams for `kind`.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn new(teams: Teams, kind: EliminationType) -> Result<Self> {
        Self::new_with_options(teams, kind, Self::options(kind))
    }

    /// Creates a new `Bracket` for `teams` using the given `options`. Options missing from
    /// `options` take their default value.
    ///
    /// If you don't need to specify the options consider using [`new`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if there are not enough teams for `kind`, or
    /// `options` contains an unknown key or a value with an invalid type.
    ///
    /// [`new`]: Self::new
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn new_with_options<O>(teams: Teams, kind: EliminationType, options: O) -> Result<Self>
    where
        O: Into<TournamentOptionValues>,
    {
        let team_count = teams.len();
        if team_count < kind.min_teams() {
            return Err(ConfigurationError::NotEnoughTeams {
                kind,
                minimum: kind.min_teams(),
                found: team_count,
            }
            .into());
        }

        let options = options
            .into()
            .merge(Self::options(kind))
            .map_err(ConfigurationError::from)?;
        let flags = BracketOptions::new(options.clone());
        log::debug!("Using options: {:?}", flags);

        let bracket_size = team_count.next_power_of_two();
        let bye_count = bracket_size - team_count;

        log::debug!(
            "Creating {} elimination bracket with {} teams ({} byes)",
            kind,
            team_count,
            bye_count
        );

        let slots = assign_slots(&seed_order(bracket_size), team_count)?;

        let mut matches = Matches::with_capacity(bracket_size * 2);
        let winners = winners::build(&mut matches, &slots)?;
        let winners_rounds = winners.rounds.len();

        let mut bracket = Self {
            kind,
            teams,
            matches: Matches::new(),
            options,
            bracket_size,
            bye_count,
            winners_rounds,
            losers_rounds: 0,
            winners_final: winners.final_match,
            losers_final: None,
            third_place_match: None,
            grand_finals: None,
            grand_finals_reset: None,
        };

        let terminals = match kind {
            EliminationType::Single => {
                if flags.third_place_match {
                    bracket.third_place_match =
                        winners::build_third_place(&mut matches, &winners);
                }

                let mut terminals = vec![winners.final_match];
                terminals.extend(bracket.third_place_match);
                terminals
            }
            EliminationType::Double => {
                let losers = losers::build(&mut matches, &winners, team_count)?;

                let expected = DropRegime::losers_rounds_for(team_count);
                if losers.rounds.len() != expected {
                    return Err(InvariantViolation::LosersRounds {
                        expected,
                        found: losers.rounds.len(),
                    }
                    .into());
                }

                let round = winners_rounds.max(losers.rounds.len()) + 1;
                let finals = grand_finals::build(
                    &mut matches,
                    winners.final_match,
                    losers.final_match,
                    round,
                    flags.grand_finals_reset,
                );

                bracket.losers_rounds = losers.rounds.len();
                bracket.losers_final = Some(losers.final_match);
                bracket.grand_finals = Some(finals.first);
                bracket.grand_finals_reset = finals.reset;

                vec![finals.terminal()]
            }
        };

        linker::link(&mut matches, kind, &terminals)?;
        assign_numbers(&mut matches);

        let expected =
            Self::expected_matches(team_count, kind, bracket.third_place_match.is_some());
        let found = matches.real().count();
        if found != expected {
            return Err(InvariantViolation::InvalidNumberOfMatches { expected, found }.into());
        }

        log::debug!(
            "Created bracket with {} matches ({} played)",
            matches.len(),
            found
        );

        bracket.matches = matches;
        Ok(bracket)
    }

    /// Returns the [`TournamentOptions`] accepted by brackets of the given `kind`.
    pub fn options(kind: EliminationType) -> TournamentOptions {
        match kind {
            EliminationType::Single => TournamentOptions::builder()
                .option(
                    "third_place_match",
                    "Include a match for the third place",
                    false,
                )
                .build(),
            EliminationType::Double => TournamentOptions::builder()
                .option(
                    "grand_finals_reset",
                    "Play a second grand finals match if the losers bracket champion wins",
                    true,
                )
                .build(),
        }
    }

    /// Returns the number of played matches of a bracket with `team_count` teams. Bye matches
    /// and the reset match of the grand finals are not counted.
    ///
    /// Returns `0` if `team_count` is too small for `kind`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use knockout_core::{Bracket, EliminationType};
    /// assert_eq!(Bracket::expected_matches(8, EliminationType::Single, false), 7);
    /// assert_eq!(Bracket::expected_matches(8, EliminationType::Single, true), 8);
    /// assert_eq!(Bracket::expected_matches(8, EliminationType::Double, false), 14);
    /// ```
    pub fn expected_matches(
        team_count: usize,
        kind: EliminationType,
        third_place_match: bool,
    ) -> usize {
        if team_count < kind.min_teams() {
            return 0;
        }

        match kind {
            // Both semi-finals are real matches from 4 teams on.
            EliminationType::Single if third_place_match && team_count >= 4 => team_count,
            EliminationType::Single => team_count - 1,
            // Every team except the champion loses twice, the champion may lose once in the
            // grand finals. The reset is not counted.
            EliminationType::Double => 2 * team_count - 2,
        }
    }

    #[inline]
    pub fn kind(&self) -> EliminationType {
        self.kind
    }

    #[inline]
    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    #[inline]
    pub fn into_teams(self) -> Teams {
        self.teams
    }

    #[inline]
    pub fn matches(&self) -> &Matches {
        &self.matches
    }

    #[inline]
    pub fn into_matches(self) -> Matches {
        self.matches
    }

    /// Returns the effective options of the bracket, including all default values.
    #[inline]
    pub fn option_values(&self) -> &TournamentOptionValues {
        &self.options
    }

    /// Returns the number of spots in the first round. This is the number of teams rounded up to
    /// the next power of two.
    #[inline]
    pub fn bracket_size(&self) -> usize {
        self.bracket_size
    }

    #[inline]
    pub fn bye_count(&self) -> usize {
        self.bye_count
    }

    #[inline]
    pub fn winners_rounds(&self) -> usize {
        self.winners_rounds
    }

    /// Returns the number of rounds in the losers bracket. This is `0` for single elimination.
    #[inline]
    pub fn losers_rounds(&self) -> usize {
        self.losers_rounds
    }

    #[inline]
    pub fn winners_final(&self) -> MatchId {
        self.winners_final
    }

    #[inline]
    pub fn losers_final(&self) -> Option<MatchId> {
        self.losers_final
    }

    #[inline]
    pub fn third_place_match(&self) -> Option<MatchId> {
        self.third_place_match
    }

    #[inline]
    pub fn grand_finals(&self) -> Option<MatchId> {
        self.grand_finals
    }

    #[inline]
    pub fn grand_finals_reset(&self) -> Option<MatchId> {
        self.grand_finals_reset
    }

    /// Returns the match that decides the tournament winner.
    pub fn final_match(&self) -> MatchId {
        self.grand_finals_reset
            .or(self.grand_finals)
            .unwrap_or(self.winners_final)
    }

    /// Updates the reset match of the grand finals after the first grand finals match has been
    /// decided. The reset match becomes playable if the losers side won, otherwise it stays a
    /// bye. Returns the reset match if it is playable.
    ///
    /// Once the reset is playable it stays playable. Applying the losers side again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the bracket is not a double elimination
    /// bracket or if the winners side is applied after the reset already became playable.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn apply_grand_finals(&mut self, winner: GrandFinalsWinner) -> Result<Option<MatchId>> {
        if self.kind != EliminationType::Double {
            return Err(ConfigurationError::NoGrandFinals(self.kind).into());
        }

        let reset = match self.grand_finals_reset {
            Some(reset) => reset,
            None => {
                log::debug!("Bracket has no grand finals reset");
                return Ok(None);
            }
        };

        let playable = !self.matches[reset].is_bye;
        match (winner, playable) {
            (GrandFinalsWinner::LosersSide, _) => {
                self.matches[reset].is_bye = false;
                log::debug!("Grand finals reset {} is playable", reset);
                Ok(Some(reset))
            }
            (GrandFinalsWinner::WinnersSide, false) => Ok(None),
            (GrandFinalsWinner::WinnersSide, true) => {
                Err(ConfigurationError::ResetAlreadyPlayable(reset).into())
            }
        }
    }

    /// Returns the flat [`MatchRecord`]s of all matches, ordered by their display number.
    pub fn records(&self) -> Vec<MatchRecord> {
        let mut matches: Vec<&Match> = self.matches.iter().collect();
        matches.sort_by_key(|m| m.number);

        matches
            .into_iter()
            .map(|m| MatchRecord::new(m, &self.teams, &self.matches))
            .collect()
    }
}

/// The side that won the first grand finals match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GrandFinalsWinner {
    /// The champion of the winners bracket.
    WinnersSide,
    /// The champion of the losers bracket.
    LosersSide,
}

#[derive(Copy, Clone, Debug)]
struct BracketOptions {
    third_place_match: bool,
    grand_finals_reset: bool,
}

impl BracketOptions {
    fn new(mut options: TournamentOptionValues) -> Self {
        let mut this = Self {
            third_place_match: false,
            grand_finals_reset: true,
        };

        if let Some(val) = options.take("third_place_match") {
            this.third_place_match = val.as_bool();
        }

        if let Some(val) = options.take("grand_finals_reset") {
            this.grand_finals_reset = val.as_bool();
        }

        this
    }
}

/// Assigns display numbers: winners rounds, the third place match, losers rounds and the grand
/// finals, each in ascending round order.
fn assign_numbers(matches: &mut Matches) {
    let mut order: Vec<(u8, usize, MatchId)> = matches
        .iter()
        .map(|m| (m.stage.display_order(), m.round, m.id))
        .collect();
    order.sort_unstable();

    for (index, (_, _, id)) in order.into_iter().enumerate() {
        matches[id].number = index + 1;
    }
}
