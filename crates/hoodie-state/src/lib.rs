//! State container for the active model, its transform history and load status.

pub mod dispatch;
pub mod history;
pub mod state;

pub use dispatch::{dispatch, snapshot};
pub use history::{History, HistoryEntry};
pub use state::{LoadTicket, ModelState};
