//! Provider selection sessions
//!
//! - `ProviderSelector`: One editing session with staged edits and a save state machine
//! - `validate`: Pre-save rules per provider
//! - `Environment`: Which providers a runtime can offer

mod environment;
mod validation;
mod session;

pub use environment::Environment;
pub use validation::{validate, ValidationError};
pub use session::{
    ProviderSelector, SessionState, SessionError, SessionResult, SaveOutcome, StagedEdit,
};
