mod transition_policy;

pub use transition_policy::TransitionPolicy;
