//! Record types shared by the profile store, the editing engine and the
//! connectivity tester.

mod client_params;
mod credentials;
mod profile_id;
mod region_defaults;
mod s3_config;

pub use client_params::{ClientParams, ConnectionTestOutcome};
pub use credentials::Credentials;
pub use profile_id::ProfileId;
pub use region_defaults::RegionDefaults;
pub use s3_config::{Bookmark, ProfileOrigin, S3Config, S3Profile};
