use crate::{MatchId, Matches, Slot, Stage};

/// The grand finals of a double elimination bracket.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct GrandFinals {
    pub first: MatchId,
    /// The reset match. Only played if the losers bracket champion wins the first match.
    pub reset: Option<MatchId>,
}

impl GrandFinals {
    /// Returns the match that ends the tournament.
    #[inline]
    pub fn terminal(&self) -> MatchId {
        self.reset.unwrap_or(self.first)
    }
}

/// Creates the grand finals between the winners of both bracket finals in `round`. The reset
/// match is created as a bye and becomes playable once the losers side wins the first match.
pub(crate) fn build(
    matches: &mut Matches,
    winners_final: MatchId,
    losers_final: MatchId,
    round: usize,
    with_reset: bool,
) -> GrandFinals {
    let first = matches.push(
        Stage::GrandFinals,
        round,
        [Slot::WinnerOf(winners_final), Slot::WinnerOf(losers_final)],
        false,
    );

    let reset = with_reset.then(|| {
        matches.push(
            Stage::GrandFinalsReset,
            round + 1,
            [Slot::WinnerOf(first), Slot::LoserOf(first)],
            true,
        )
    });

    log::debug!("Created grand finals {} (reset: {:?})", first, reset);

    GrandFinals { first, reset }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grand_finals() {
        let mut matches = Matches::new();
        let winners_final = matches.push(Stage::Winners, 1, [Slot::Seed(1), Slot::Seed(2)], false);
        let losers_final = matches.push(Stage::Losers, 1, [Slot::Seed(3), Slot::Seed(4)], false);

        let finals = build(&mut matches, winners_final, losers_final, 2, true);

        let first = &matches[finals.first];
        assert_eq!(first.stage, Stage::GrandFinals);
        assert_eq!(first.round, 2);
        assert_eq!(
            first.slots,
            [Slot::WinnerOf(winners_final), Slot::WinnerOf(losers_final)]
        );
        assert!(!first.is_bye);

        let reset = &matches[finals.reset.unwrap()];
        assert_eq!(reset.stage, Stage::GrandFinalsReset);
        assert_eq!(reset.round, 3);
        assert_eq!(
            reset.slots,
            [Slot::WinnerOf(finals.first), Slot::LoserOf(finals.first)]
        );
        assert!(reset.is_bye);
        assert_eq!(finals.terminal(), reset.id);
    }

    #[test]
    fn test_grand_finals_without_reset() {
        let mut matches = Matches::new();
        let finals = build(&mut matches, MatchId(0), MatchId(1), 1, false);

        assert_eq!(finals.reset, None);
        assert_eq!(finals.terminal(), finals.first);
        assert_eq!(matches.len(), 1);
    }
}
