pub mod extractor;
pub mod invitation;
pub mod provisioner;
pub mod report;
pub mod settle;
pub mod setup;
pub mod teardown;

#[cfg(test)]
mod mock;

pub use crate::domain::model::{Participant, Request, RunStatus};
pub use crate::domain::ports::{Directory, TicketTracker};
pub use crate::utils::error::Result;
