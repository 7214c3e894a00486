//! # knockout-core
//!
//! This crate generates the complete match topology of knockout tournaments. Given a seeded list
//! of teams it builds a [`Bracket`] for single or double elimination, including byes for team
//! counts that are not a power of two, the progression edges between matches and the grand
//! finals (with an optional reset match) of a double elimination bracket.
//!
//! Important types:
//! - [`Teams`]: A validated, seed-ordered list of [`Team`]s.
//! - [`Bracket`]: The generated, immutable bracket. Built with [`Bracket::new`].
//! - [`Matches`]: An arena of all [`Match`]es in a bracket, indexed by [`MatchId`].
//! - [`Slot`]: A spot within a match. Contains a seeded team, a bye or a reference to the
//! winner or loser of an earlier match.
//! - [`MatchRecord`]: The flat description of a match handed to persistence and display layers.
//!
//! Recording scores and moving teams through the bracket is not done by this crate. The bracket
//! topology never changes after construction.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to almost all types.
//!
pub mod options;

mod bracket;
mod grand_finals;
mod linker;
mod losers;
mod record;
mod seeding;
mod utils;
mod winners;

pub use bracket::{Bracket, GrandFinalsWinner};
pub use losers::DropRegime;
pub use record::MatchRecord;
pub use seeding::{assign_slots, seed_order};

use thiserror::Error;

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::ops::{Deref, Index, IndexMut};
use std::result;
use std::str::FromStr;
use std::vec::IntoIter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! id {
    ($(#[$meta:meta])* $name:ident, $id:ty) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub $id);

        impl Display for $name {
            #[inline]
            fn fmt(&self, f: &mut Formatter) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<$id> for $name {
            #[inline]
            fn from(id: $id) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = <$id as FromStr>::Err;

            #[inline]
            fn from_str(s: &str) -> result::Result<Self, Self::Err> {
                Ok(Self(s.parse::<$id>()?))
            }
        }
    };
}

id!(
    /// The id of a [`Match`]. This is the index of the match in its [`Matches`] arena. Ids are
    /// assigned at creation and never reused.
    MatchId,
    usize
);

id!(
    /// An opaque id of a [`Team`] assigned by the caller.
    TeamId,
    u64
);

/// A team competing in a tournament.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Team {
    pub id: TeamId,
    /// The 1-based rank of the team. Seed 1 is the strongest team.
    pub seed: usize,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roster: Vec<String>,
}

impl Team {
    #[inline]
    pub fn new<S>(id: TeamId, seed: usize, name: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            id,
            seed,
            name: name.into(),
            roster: Vec::new(),
        }
    }

    /// Sets the member roster of the team.
    #[inline]
    pub fn with_roster(mut self, roster: Vec<String>) -> Self {
        self.roster = roster;
        self
    }
}

/// A validated list of [`Team`]s ordered by seed.
///
/// Every `Teams` value satisfies:
/// - seeds are unique and dense (`1..=len`),
/// - names are non-empty and unique,
/// - team ids are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Team>", into = "Vec<Team>")
)]
pub struct Teams {
    teams: Vec<Team>,
}

impl Teams {
    /// Creates a new `Teams` list from teams with explicitly assigned seeds. The teams may be
    /// passed in any order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any name is empty or duplicated, any id is
    /// duplicated or the seeds are not exactly `1..=teams.len()`.
    pub fn new(mut teams: Vec<Team>) -> Result<Self> {
        teams.sort_by_key(|team| team.seed);

        let mut names = HashSet::with_capacity(teams.len());
        let mut ids = HashSet::with_capacity(teams.len());

        for (index, team) in teams.iter().enumerate() {
            let expected = index + 1;

            if team.seed != expected {
                if index > 0 && teams[index - 1].seed == team.seed {
                    return Err(ConfigurationError::DuplicateSeed(team.seed).into());
                }

                return Err(ConfigurationError::SparseSeeds {
                    expected,
                    found: team.seed,
                }
                .into());
            }

            if team.name.trim().is_empty() {
                return Err(ConfigurationError::EmptyName(team.seed).into());
            }

            if !names.insert(team.name.as_str()) {
                return Err(ConfigurationError::DuplicateName(team.name.clone()).into());
            }

            if !ids.insert(team.id) {
                return Err(ConfigurationError::DuplicateTeamId(team.id).into());
            }
        }

        Ok(Self { teams })
    }

    /// Creates a new `Teams` list from names. The seed of each team is its position in `names`
    /// (starting at 1) and its [`TeamId`] is its seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any name is empty or duplicated.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let teams = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Team::new(TeamId(index as u64 + 1), index + 1, name))
            .collect();

        Self::new(teams)
    }

    /// Applies manual seed edits.
    ///
    /// Every team named in `overrides` takes the requested seed. All other teams keep their
    /// relative order and fill the remaining seeds from the top.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if an override refers to an unknown team, names a
    /// team twice, requests a seed outside of `1..=len` or two overrides request the same seed.
    pub fn apply_overrides<I>(self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (TeamId, usize)>,
    {
        let overrides: Vec<(TeamId, usize)> = overrides.into_iter().collect();
        let len = self.teams.len();

        let mut seen = HashSet::with_capacity(overrides.len());
        for &(id, seed) in &overrides {
            if !self.teams.iter().any(|team| team.id == id) {
                return Err(ConfigurationError::UnknownTeam(id).into());
            }

            if !seen.insert(id) {
                return Err(ConfigurationError::DuplicateTeamId(id).into());
            }

            if seed == 0 || seed > len {
                return Err(ConfigurationError::SeedOutOfRange { seed, teams: len }.into());
            }
        }

        let mut seeded: Vec<Option<Team>> = std::iter::repeat_with(|| None).take(len).collect();
        let mut rest = Vec::with_capacity(len);

        for team in self.teams {
            match overrides.iter().find(|(id, _)| *id == team.id) {
                Some(&(_, seed)) => {
                    let spot = &mut seeded[seed - 1];
                    if spot.is_some() {
                        return Err(ConfigurationError::DuplicateSeed(seed).into());
                    }

                    *spot = Some(team);
                }
                None => rest.push(team),
            }
        }

        log::debug!(
            "Applying {} seed overrides to {} teams",
            overrides.len(),
            len
        );

        let mut rest = rest.into_iter();
        let teams = seeded
            .into_iter()
            .enumerate()
            .filter_map(|(index, spot)| {
                let mut team = spot.or_else(|| rest.next())?;
                team.seed = index + 1;
                Some(team)
            })
            .collect();

        Self::new(teams)
    }

    /// Returns the team with the given `seed`.
    #[inline]
    pub fn get_seed(&self, seed: usize) -> Option<&Team> {
        seed.checked_sub(1).and_then(|index| self.teams.get(index))
    }
}

impl Deref for Teams {
    type Target = [Team];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.teams
    }
}

impl IntoIterator for Teams {
    type Item = Team;
    type IntoIter = IntoIter<Team>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.teams.into_iter()
    }
}

impl TryFrom<Vec<Team>> for Teams {
    type Error = Error;

    #[inline]
    fn try_from(teams: Vec<Team>) -> Result<Self> {
        Self::new(teams)
    }
}

impl From<Teams> for Vec<Team> {
    #[inline]
    fn from(teams: Teams) -> Self {
        teams.teams
    }
}

/// The elimination type of a [`Bracket`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EliminationType {
    Single,
    Double,
}

impl EliminationType {
    /// Returns the minimum number of teams required to build a [`Bracket`] of this type.
    #[inline]
    pub fn min_teams(self) -> usize {
        match self {
            Self::Single => 2,
            Self::Double => 3,
        }
    }
}

impl Display for EliminationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Double => f.write_str("double"),
        }
    }
}

impl FromStr for EliminationType {
    type Err = ParseEliminationTypeError;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s {
            "single" | "single_elimination" => Ok(Self::Single),
            "double" | "double_elimination" => Ok(Self::Double),
            _ => Err(ParseEliminationTypeError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid elimination type {0:?}, expected \"single\" or \"double\"")]
pub struct ParseEliminationTypeError(String);

/// The stage a [`Match`] belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stage {
    Winners,
    /// The match for the third place of a single elimination bracket.
    ThirdPlace,
    Losers,
    GrandFinals,
    /// The second grand finals match, only played if the losers bracket champion wins the first.
    GrandFinalsReset,
}

impl Stage {
    /// Returns the position of the stage in display order.
    #[inline]
    pub(crate) fn display_order(self) -> u8 {
        match self {
            Self::Winners => 0,
            Self::ThirdPlace => 1,
            Self::Losers => 2,
            Self::GrandFinals => 3,
            Self::GrandFinalsReset => 4,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Winners => "Winners",
            Self::ThirdPlace => "Third Place",
            Self::Losers => "Losers",
            Self::GrandFinals => "Grand Finals",
            Self::GrandFinalsReset => "Grand Finals Reset",
        };

        f.write_str(name)
    }
}

/// A spot for a team in a [`Match`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Slot {
    /// The team with the given seed.
    Seed(usize),
    /// Permanently empty. The other team of the match advances without playing.
    Bye,
    /// The winner of the given match, once it is completed.
    WinnerOf(MatchId),
    /// The loser of the given match, once it is completed.
    LoserOf(MatchId),
}

impl Slot {
    /// Returns `true` if the `Slot` is [`Bye`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use knockout_core::Slot;
    /// assert!(Slot::Bye.is_bye());
    /// assert!(!Slot::Seed(1).is_bye());
    /// ```
    ///
    /// [`Bye`]: Self::Bye
    #[inline]
    pub fn is_bye(&self) -> bool {
        matches!(self, Self::Bye)
    }

    /// Returns the seed if the `Slot` is [`Seed`].
    ///
    /// [`Seed`]: Self::Seed
    #[inline]
    pub fn seed(&self) -> Option<usize> {
        match self {
            Self::Seed(seed) => Some(*seed),
            _ => None,
        }
    }

    /// Returns the match this `Slot` waits on, if any.
    #[inline]
    pub fn source(&self) -> Option<MatchId> {
        match self {
            Self::WinnerOf(id) | Self::LoserOf(id) => Some(*id),
            Self::Seed(_) | Self::Bye => None,
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seed(seed) => write!(f, "Seed {}", seed),
            Self::Bye => f.write_str("Bye"),
            Self::WinnerOf(id) => write!(f, "Winner of match {}", id),
            Self::LoserOf(id) => write!(f, "Loser of match {}", id),
        }
    }
}

/// A match between two [`Slot`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Match {
    pub(crate) id: MatchId,
    pub(crate) number: usize,
    pub(crate) stage: Stage,
    pub(crate) round: usize,
    pub(crate) slots: [Slot; 2],
    pub(crate) winner_target: Option<MatchId>,
    pub(crate) loser_target: Option<MatchId>,
    pub(crate) is_bye: bool,
}

impl Match {
    #[inline]
    pub(crate) fn new(
        id: MatchId,
        stage: Stage,
        round: usize,
        slots: [Slot; 2],
        is_bye: bool,
    ) -> Self {
        Self {
            id,
            number: 0,
            stage,
            round,
            slots,
            winner_target: None,
            loser_target: None,
            is_bye,
        }
    }

    #[inline]
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Returns the display number of the match. Display numbers are cosmetic and must not be used
    /// to navigate the bracket.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the 1-based round of the match within its [`Stage`].
    #[inline]
    pub fn round(&self) -> usize {
        self.round
    }

    /// Returns the round within the losers bracket. This is only `Some` for matches in the
    /// [`Stage::Losers`] stage.
    #[inline]
    pub fn losers_round(&self) -> Option<usize> {
        match self.stage {
            Stage::Losers => Some(self.round),
            _ => None,
        }
    }

    #[inline]
    pub fn slots(&self) -> &[Slot; 2] {
        &self.slots
    }

    /// Returns the match the winner of this match moves on to.
    #[inline]
    pub fn winner_target(&self) -> Option<MatchId> {
        self.winner_target
    }

    /// Returns the match the loser of this match drops into.
    #[inline]
    pub fn loser_target(&self) -> Option<MatchId> {
        self.loser_target
    }

    /// Returns `true` if the match is never played. A bye match in the winners bracket has exactly
    /// one bye slot, an unplayed grand finals reset has none.
    #[inline]
    pub fn is_bye(&self) -> bool {
        self.is_bye
    }

    /// Returns `true` if no other match follows this match.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner_target.is_none()
    }
}

impl Index<usize> for Match {
    type Output = Slot;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.slots[index]
    }
}

/// An arena of [`Match`]es. Every match is stored at the index of its [`MatchId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Matches {
    matches: Vec<Match>,
}

impl Matches {
    #[inline]
    pub fn new() -> Self {
        Self {
            matches: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            matches: Vec::with_capacity(capacity),
        }
    }

    /// Creates a new match and returns its id.
    pub(crate) fn push(
        &mut self,
        stage: Stage,
        round: usize,
        slots: [Slot; 2],
        is_bye: bool,
    ) -> MatchId {
        let id = MatchId(self.matches.len());
        self.matches.push(Match::new(id, stage, round, slots, is_bye));
        id
    }

    /// Returns the match with the given `id`.
    #[inline]
    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.0)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.get_mut(id.0)
    }

    /// Returns an iterator over all matches that are actually played.
    pub fn real(&self) -> impl Iterator<Item = &Match> + '_ {
        self.matches.iter().filter(|m| !m.is_bye)
    }

    /// Returns an iterator over all matches in the given `stage`.
    pub fn stage(&self, stage: Stage) -> impl Iterator<Item = &Match> + '_ {
        self.matches.iter().filter(move |m| m.stage == stage)
    }
}

impl Deref for Matches {
    type Target = [Match];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.matches
    }
}

impl Index<MatchId> for Matches {
    type Output = Match;

    #[inline]
    fn index(&self, id: MatchId) -> &Self::Output {
        &self.matches[id.0]
    }
}

impl IndexMut<MatchId> for Matches {
    #[inline]
    fn index_mut(&mut self, id: MatchId) -> &mut Self::Output {
        &mut self.matches[id.0]
    }
}

/// An `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input can never produce a bracket. The caller has to change the input.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    /// The generated bracket is inconsistent. This is a defect in the generator.
    #[error("construction invariant violated: {0}")]
    ConstructionInvariantViolated(#[from] InvariantViolation),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{kind} elimination requires at least {minimum} teams, found {found}")]
    NotEnoughTeams {
        kind: EliminationType,
        minimum: usize,
        found: usize,
    },
    #[error("team with seed {0} has an empty name")]
    EmptyName(usize),
    #[error("duplicate team name {0:?}")]
    DuplicateName(String),
    #[error("duplicate team id {0}")]
    DuplicateTeamId(TeamId),
    #[error("seed {0} is assigned more than once")]
    DuplicateSeed(usize),
    #[error("seeds are not dense: expected seed {expected}, found {found}")]
    SparseSeeds { expected: usize, found: usize },
    #[error("seed {seed} is out of range for {teams} teams")]
    SeedOutOfRange { seed: usize, teams: usize },
    #[error("unknown team id {0}")]
    UnknownTeam(TeamId),
    #[error("invalid options: {0}")]
    Options(#[from] options::Error),
    #[error("{0} elimination brackets have no grand finals")]
    NoGrandFinals(EliminationType),
    #[error("grand finals reset {0} is already playable")]
    ResetAlreadyPlayable(MatchId),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("bracket size {0} is not a power of two greater than 1")]
    BracketSize(usize),
    #[error("slots {} and {} are both byes", .position, .position + 1)]
    ByePairing { position: usize },
    #[error("match {referrer} refers to match {referenced} which is not an earlier match")]
    DanglingReference {
        referrer: MatchId,
        referenced: MatchId,
    },
    #[error("the winner of match {0} is routed more than once")]
    DuplicateWinnerRoute(MatchId),
    #[error("the loser of match {0} is routed more than once")]
    DuplicateLoserRoute(MatchId),
    #[error("match {0} has no winner target")]
    MissingWinnerTarget(MatchId),
    #[error("terminal match {0} has a winner target")]
    UnexpectedWinnerTarget(MatchId),
    #[error("match {0} has no loser target")]
    MissingLoserTarget(MatchId),
    #[error("match {0} must not route its loser")]
    UnexpectedLoserTarget(MatchId),
    #[error("losers round {0} has no matches")]
    EmptyLosersRound(usize),
    #[error("{remaining} entrants are left in the losers bracket after its final round")]
    UnresolvedLosersQueue { remaining: usize },
    #[error("invalid number of losers rounds: expected {expected}, found {found}")]
    LosersRounds { expected: usize, found: usize },
    #[error("invalid number of matches: expected {expected}, found {found}")]
    InvalidNumberOfMatches { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[macro_export]
    macro_rules! teams {
        ($($x:expr),*$(,)?) => {
            $crate::Teams::from_names([$($x),*]).unwrap()
        };
    }

    /// Creates `n` teams named `Team 1` to `Team n`.
    pub fn numbered_teams(n: usize) -> Teams {
        Teams::from_names((1..=n).map(|seed| format!("Team {}", seed))).unwrap()
    }

    #[test]
    fn test_teams_from_names() {
        let teams = teams!["Alpha", "Bravo", "Charlie"];

        assert_eq!(teams.len(), 3);
        assert_eq!(teams[0], Team::new(TeamId(1), 1, "Alpha"));
        assert_eq!(teams.get_seed(3).map(|t| t.name.as_str()), Some("Charlie"));
        assert_eq!(teams.get_seed(0), None);
        assert_eq!(teams.get_seed(4), None);
    }

    #[test]
    fn test_teams_explicit_seeds() {
        let teams = Teams::new(vec![
            Team::new(TeamId(10), 2, "Bravo"),
            Team::new(TeamId(20), 1, "Alpha"),
        ])
        .unwrap();

        assert_eq!(teams[0].name, "Alpha");
        assert_eq!(teams[1].name, "Bravo");
    }

    #[test]
    fn test_teams_invalid() {
        assert_eq!(
            Teams::from_names(["Alpha", " "]),
            Err(ConfigurationError::EmptyName(2).into())
        );

        assert_eq!(
            Teams::from_names(["Alpha", "Alpha"]),
            Err(ConfigurationError::DuplicateName(String::from("Alpha")).into())
        );

        assert_eq!(
            Teams::new(vec![
                Team::new(TeamId(1), 1, "Alpha"),
                Team::new(TeamId(2), 1, "Bravo"),
            ]),
            Err(ConfigurationError::DuplicateSeed(1).into())
        );

        assert_eq!(
            Teams::new(vec![
                Team::new(TeamId(1), 1, "Alpha"),
                Team::new(TeamId(2), 3, "Bravo"),
            ]),
            Err(ConfigurationError::SparseSeeds {
                expected: 2,
                found: 3
            }
            .into())
        );

        assert_eq!(
            Teams::new(vec![
                Team::new(TeamId(1), 1, "Alpha"),
                Team::new(TeamId(1), 2, "Bravo"),
            ]),
            Err(ConfigurationError::DuplicateTeamId(TeamId(1)).into())
        );
    }

    #[test]
    fn test_teams_apply_overrides() {
        let teams = teams!["Alpha", "Bravo", "Charlie", "Delta"];

        // Delta is moved to the top, everyone else moves down by one.
        let teams = teams.apply_overrides([(TeamId(4), 1)]).unwrap();
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Delta", "Alpha", "Bravo", "Charlie"]);

        let seeds: Vec<usize> = teams.iter().map(|t| t.seed).collect();
        assert_eq!(seeds, [1, 2, 3, 4]);

        // Swap the first and last team.
        let teams = teams
            .apply_overrides([(TeamId(4), 4), (TeamId(3), 1)])
            .unwrap();
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Charlie", "Alpha", "Bravo", "Delta"]);
    }

    #[test]
    fn test_teams_apply_overrides_invalid() {
        let teams = teams!["Alpha", "Bravo", "Charlie"];

        assert_eq!(
            teams.clone().apply_overrides([(TeamId(9), 1)]),
            Err(ConfigurationError::UnknownTeam(TeamId(9)).into())
        );

        assert_eq!(
            teams.clone().apply_overrides([(TeamId(1), 4)]),
            Err(ConfigurationError::SeedOutOfRange { seed: 4, teams: 3 }.into())
        );

        assert_eq!(
            teams.clone().apply_overrides([(TeamId(1), 2), (TeamId(3), 2)]),
            Err(ConfigurationError::DuplicateSeed(2).into())
        );

        assert_eq!(
            teams.apply_overrides([(TeamId(1), 2), (TeamId(1), 3)]),
            Err(ConfigurationError::DuplicateTeamId(TeamId(1)).into())
        );
    }

    #[test]
    fn test_elimination_type_parse() {
        assert_eq!("single".parse(), Ok(EliminationType::Single));
        assert_eq!("double".parse(), Ok(EliminationType::Double));
        assert_eq!(
            "swiss".parse::<EliminationType>(),
            Err(ParseEliminationTypeError(String::from("swiss")))
        );
        assert_eq!(EliminationType::Double.to_string(), "double");
    }

    #[test]
    fn test_slot() {
        assert_eq!(Slot::Seed(3).seed(), Some(3));
        assert_eq!(Slot::WinnerOf(MatchId(2)).source(), Some(MatchId(2)));
        assert_eq!(Slot::LoserOf(MatchId(5)).to_string(), "Loser of match 5");
        assert_eq!(Slot::Bye.source(), None);
    }
}
