use crate::{InvariantViolation, Result, Slot};

/// Returns the seed order of a bracket with `bracket_size` spots.
///
/// Pairing consecutive entries of the returned order gives the first round of a standard
/// seeded bracket: seed 1 meets the weakest seed and the strongest seeds are kept apart for as
/// long as possible. The order is built by repeatedly replacing every seed `s` with
/// `[s, m + 1 - s]`, where `m` is the length of the refined order.
///
/// `bracket_size` is rounded up to the next power of two.
///
/// # Examples
///
/// ```
/// # use knockout_core::seed_order;
/// assert_eq!(seed_order(4), [1, 4, 2, 3]);
/// assert_eq!(seed_order(8), [1, 8, 4, 5, 2, 7, 3, 6]);
/// ```
pub fn seed_order(bracket_size: usize) -> Vec<usize> {
    let bracket_size = bracket_size.next_power_of_two();

    let mut order = Vec::with_capacity(bracket_size);
    order.push(1);

    while order.len() < bracket_size {
        let size = order.len() * 2;
        order = order
            .into_iter()
            .flat_map(|seed| [seed, size + 1 - seed])
            .collect();
    }

    order
}

/// Places `team_count` teams onto the spots of a bracket using the given seed `order`. Every
/// seed greater than `team_count` becomes a [`Slot::Bye`].
///
/// # Errors
///
/// Returns [`InvariantViolation::BracketSize`] if `order` does not have a power of two length of
/// at least 2, or [`InvariantViolation::ByePairing`] if two byes would meet in the first round.
pub fn assign_slots(order: &[usize], team_count: usize) -> Result<Vec<Slot>> {
    if order.len() < 2 || !order.len().is_power_of_two() {
        return Err(InvariantViolation::BracketSize(order.len()).into());
    }

    let slots: Vec<Slot> = order
        .iter()
        .map(|&seed| {
            if seed <= team_count {
                Slot::Seed(seed)
            } else {
                Slot::Bye
            }
        })
        .collect();

    if let Some(index) = slots
        .chunks_exact(2)
        .position(|pair| pair[0].is_bye() && pair[1].is_bye())
    {
        return Err(InvariantViolation::ByePairing {
            position: index * 2,
        }
        .into());
    }

    Ok(slots)
}
