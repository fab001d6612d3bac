use crate::payoff::debt::WorkingBalance;
use crate::types::Strategy;

/// Pick the open debt that should receive extra funds right now.
///
/// Recomputed on every call against the current balances. Ties keep the
/// earliest debt in input order (strict comparison, no tolerance).
/// Returns `None` once no balance remains open.
pub fn select_target(balances: &[WorkingBalance], strategy: Strategy) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (idx, candidate) in balances.iter().enumerate() {
        if !candidate.is_open() {
            continue;
        }
        best = match best {
            Some(current) if !outranks(candidate, &balances[current], strategy) => Some(current),
            _ => Some(idx),
        };
    }

    best
}

fn outranks(candidate: &WorkingBalance, incumbent: &WorkingBalance, strategy: Strategy) -> bool {
    match strategy {
        Strategy::Avalanche => candidate.apr > incumbent.apr,
        Strategy::Snowball => candidate.balance < incumbent.balance,
    }
}
