pub mod ticket;
pub mod user;

pub use ticket::{
    NewTicket, Ticket, TicketField, TicketId, TicketPatch, STATUS_OPEN, STATUS_RESOLVED,
};
pub use user::{User, UserId, UserPatch};
