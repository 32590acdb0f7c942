//! Response types shared by the handlers.

mod response;

pub use response::{Created, ImportSummary, NoContent, SuccessResponse};
