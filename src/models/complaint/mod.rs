pub mod filter;
pub mod types;

pub use filter::{Clause, ListFilter, Query};
pub use types::{
    Category, Comment, Complaint, ComplaintUpdate, NewComplaintPayload, Priority, Status,
    UpdatePayload, Urgency,
};
