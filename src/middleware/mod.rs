pub mod record_extract;

pub use record_extract::{RecordForm, RecordId};
