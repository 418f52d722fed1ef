pub mod services;
pub mod store;
pub mod utils;

pub use services::ReportService;
pub use store::RecordStore;
