use crate::inspection::domain::InspectionStatus;

/// TransitionPolicy encodes the inspection state machine
///
/// Legal transitions:
/// 1. absent -> PENDING or FAILURE
/// 2. PENDING -> SUCCESS or FAILURE (or PENDING again)
/// 3. SUCCESS -> SUCCESS or FAILURE
/// 4. FAILURE -> SUCCESS or FAILURE
///
/// Nothing ever moves back to PENDING once it left it, and nothing returns to absent.
pub struct TransitionPolicy;

impl TransitionPolicy {
    pub fn is_allowed(from: Option<InspectionStatus>, to: InspectionStatus) -> bool {
        use InspectionStatus::*;
        match (from, to) {
            (None, Success) => false,
            (None, _) => true,
            (Some(Pending), _) => true,
            (Some(Success) | Some(Failure), Pending) => false,
            (Some(Success) | Some(Failure), Success | Failure) => true,
        }
    }
}
