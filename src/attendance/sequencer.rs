use derive_more::Display;

use crate::model::attendance::{AttendanceAction, AttendanceEvent};

/// Why a requested punch violates the per-day alternation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SequenceError {
    #[display(fmt = "Employee already punched in for this day")]
    DuplicatePunchIn,
    #[display(fmt = "Employee already punched out for this day")]
    DuplicatePunchOut,
    #[display(fmt = "Cannot punch out without a punch-in record")]
    NoPriorPunchIn,
}

/// The day's reduced state: the action of its most recent event, if any.
/// `events` must already be scoped to one (employee, date) and ordered
/// chronologically with ties in arrival order.
pub fn last_action(events: &[AttendanceEvent]) -> Option<AttendanceAction> {
    events.last().map(|event| event.action)
}

/// The alternation table. A day starts empty, must begin with a punch-in,
/// and never accepts two consecutive events of the same kind. A punch-in
/// after a punch-out opens a new session on the same day.
pub fn validate_transition(
    last: Option<AttendanceAction>,
    requested: AttendanceAction,
) -> Result<(), SequenceError> {
    use crate::model::attendance::AttendanceAction::{PunchIn, PunchOut};

    match (last, requested) {
        (None, PunchIn) => Ok(()),
        (None, PunchOut) => Err(SequenceError::NoPriorPunchIn),
        (Some(PunchIn), PunchIn) => Err(SequenceError::DuplicatePunchIn),
        (Some(PunchIn), PunchOut) => Ok(()),
        (Some(PunchOut), PunchOut) => Err(SequenceError::DuplicatePunchOut),
        (Some(PunchOut), PunchIn) => Ok(()),
    }
}

/// The punch-in an accepted punch-out closes. Under strict alternation the
/// nearest unmatched punch-in is always the day's last event.
pub fn open_session_anchor(events: &[AttendanceEvent]) -> Option<&AttendanceEvent> {
    events
        .last()
        .filter(|event| event.action == AttendanceAction::PunchIn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceAction::{PunchIn, PunchOut};

    #[test]
    fn empty_day_accepts_punch_in_only() {
        assert!(validate_transition(None, PunchIn).is_ok());
        assert_eq!(
            validate_transition(None, PunchOut),
            Err(SequenceError::NoPriorPunchIn)
        );
    }

    #[test]
    fn open_session_accepts_punch_out_only() {
        assert!(validate_transition(Some(PunchIn), PunchOut).is_ok());
        assert_eq!(
            validate_transition(Some(PunchIn), PunchIn),
            Err(SequenceError::DuplicatePunchIn)
        );
    }

    #[test]
    fn closed_session_accepts_a_new_punch_in_only() {
        assert!(validate_transition(Some(PunchOut), PunchIn).is_ok());
        assert_eq!(
            validate_transition(Some(PunchOut), PunchOut),
            Err(SequenceError::DuplicatePunchOut)
        );
    }
}
