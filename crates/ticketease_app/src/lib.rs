#![forbid(unsafe_code)]

pub mod auth;
pub mod clock;
pub mod tickets;

pub use auth::SessionManager;
pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use tickets::{sanitize_ticket, TicketCounts, TicketError, TicketRepository};
