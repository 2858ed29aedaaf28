//! Win evaluation: compares stack selections against the solution vector.

use crate::stacks::StackRuntime;

/// True iff every stack's selected index equals the corresponding solution
/// entry, compared pairwise in stack order. False on length mismatch.
///
/// Pure: callable at any time. Callers gate on the round timer before
/// acting on the result, so a settle that completes after a loss cannot
/// turn into a win.
pub fn evaluate(stacks: &[StackRuntime], solution: &[usize]) -> bool {
    stacks.len() == solution.len()
        && stacks
            .iter()
            .zip(solution)
            .all(|(stack, &target)| stack.selected_index == target)
}
