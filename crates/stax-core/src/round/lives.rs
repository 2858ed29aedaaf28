use crate::round::session::ProgressSession;

/// What a timeout loss means for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossOutcome {
    /// A life was spent; the level can be retried.
    Retryable { lives_left: u32 },
    /// No lives remain. Terminal until the session is restarted.
    GameOver,
}

/// Spend one life for a timeout loss.
///
/// Callers must check win state first; a round that is already solved at
/// expiry never reaches this. The phase machine prevents further losses
/// once `GameOver` has been returned.
pub fn register_loss(session: &mut ProgressSession) -> LossOutcome {
    session.lives = session.lives.saturating_sub(1);
    if session.lives == 0 {
        LossOutcome::GameOver
    } else {
        LossOutcome::Retryable {
            lives_left: session.lives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_losses_reach_game_over() {
        let mut s = ProgressSession::new(3);
        assert_eq!(register_loss(&mut s), LossOutcome::Retryable { lives_left: 2 });
        assert_eq!(register_loss(&mut s), LossOutcome::Retryable { lives_left: 1 });
        assert_eq!(register_loss(&mut s), LossOutcome::GameOver);
        assert_eq!(s.lives, 0);
    }

    #[test]
    fn lives_never_underflow() {
        let mut s = ProgressSession::new(1);
        assert_eq!(register_loss(&mut s), LossOutcome::GameOver);
        assert_eq!(register_loss(&mut s), LossOutcome::GameOver);
        assert_eq!(s.lives, 0);
    }
}
