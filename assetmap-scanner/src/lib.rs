pub mod backend;
pub mod error;
pub mod frontend;
pub mod normalize;
pub mod record;

pub use backend::extract_endpoints;
pub use error::ScanError;
pub use frontend::{FrontendExtraction, extract_frontend};
pub use record::{
    CallSiteRecord, Confidence, EndpointRecord, Framework, HttpMethod, MenuRecord, RelationRecord,
};
