mod complaint;
mod ids;
mod profile;

pub use complaint::{Category, Complaint, Priority, Status};
pub use ids::{ComplaintId, UserId};
pub use profile::Profile;
