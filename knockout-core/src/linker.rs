//! Resolves the progression edges of all matches.
//!
//! Matches only know where their teams come from ([`Slot::WinnerOf`] and [`Slot::LoserOf`]).
//! The linker walks the arena once and writes the inverse edges into the source matches, then
//! checks that every match routes its winner and loser as its stage requires.
use crate::{EliminationType, InvariantViolation, MatchId, Matches, Result, Slot, Stage};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Edge {
    Winner,
    Loser,
}

/// Links all matches. `terminals` are the matches that end the tournament (or a side of it, like
/// the match for the third place).
pub(crate) fn link(
    matches: &mut Matches,
    kind: EliminationType,
    terminals: &[MatchId],
) -> Result<()> {
    for index in 0..matches.len() {
        let id = MatchId(index);
        let slots = matches[id].slots;

        for slot in slots {
            match slot {
                Slot::WinnerOf(source) => route(matches, id, source, Edge::Winner)?,
                Slot::LoserOf(source) => route(matches, id, source, Edge::Loser)?,
                Slot::Seed(_) | Slot::Bye => (),
            }
        }
    }

    validate(matches, kind, terminals)?;

    log::debug!("Linked {} matches", matches.len());

    Ok(())
}

fn route(matches: &mut Matches, target: MatchId, source: MatchId, edge: Edge) -> Result<()> {
    // References always point to earlier matches. This also rejects cycles.
    let m = match matches.get_mut(source) {
        Some(m) if source < target => m,
        _ => {
            return Err(InvariantViolation::DanglingReference {
                referrer: target,
                referenced: source,
            }
            .into())
        }
    };

    let (spot, err) = match edge {
        Edge::Winner => (
            &mut m.winner_target,
            InvariantViolation::DuplicateWinnerRoute(source),
        ),
        Edge::Loser => (
            &mut m.loser_target,
            InvariantViolation::DuplicateLoserRoute(source),
        ),
    };

    if spot.is_some() {
        return Err(err.into());
    }

    *spot = Some(target);
    Ok(())
}

fn validate(matches: &Matches, kind: EliminationType, terminals: &[MatchId]) -> Result<()> {
    for m in matches.iter() {
        let terminal = terminals.contains(&m.id);

        match (terminal, m.winner_target) {
            (true, Some(_)) => {
                return Err(InvariantViolation::UnexpectedWinnerTarget(m.id).into());
            }
            (false, None) => {
                return Err(InvariantViolation::MissingWinnerTarget(m.id).into());
            }
            _ => (),
        }

        let routes_loser = match (m.stage, kind) {
            _ if m.is_bye && m.stage != Stage::GrandFinalsReset => false,
            (Stage::Winners, EliminationType::Double) => true,
            // Only the semi-finals route their losers, and only into the third place match.
            (Stage::Winners, EliminationType::Single) => m
                .loser_target
                .map_or(false, |target| matches[target].stage == Stage::ThirdPlace),
            (Stage::GrandFinals, _) => !terminal,
            (Stage::Losers | Stage::ThirdPlace | Stage::GrandFinalsReset, _) => false,
        };

        match (routes_loser, m.loser_target) {
            (true, None) => {
                return Err(InvariantViolation::MissingLoserTarget(m.id).into());
            }
            (false, Some(_)) => {
                return Err(InvariantViolation::UnexpectedLoserTarget(m.id).into());
            }
            _ => (),
        }
    }

    Ok(())
}
