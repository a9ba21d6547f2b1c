//! Ladder result reconciliation: division math, ranked map pool, pairwise
//! player locks and the submission pipeline that ties them together.

pub mod division;
pub mod error;
pub mod locks;
pub mod maps;
pub mod memory;
pub mod participant;
pub mod pipeline;
pub mod replay;
pub mod result;
pub mod session;
pub mod store;

pub use division::{Division, DivisionConfigError, DivisionTable};
pub use error::LadderError;
pub use maps::{Map, MapPool, MapVeto};
pub use pipeline::{Collaborators, Ladder};
pub use replay::{Region, Replay, ReplayPlayer};
pub use result::{MatchResult, MatchResultPlayer, MatchResultSource, Settlement};
pub use session::{LadderRules, PlayerSession};
