//! Surgery inquiry handlers.

mod manage_inquiries;
mod submit_inquiry;

pub use manage_inquiries::ManageInquiriesHandler;
pub use submit_inquiry::SubmitInquiryHandler;
