pub mod state;

pub use state::{FetchTicket, ObjectView, FETCH_FAILURE_MESSAGE};
