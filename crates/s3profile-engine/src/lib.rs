#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod form;
mod memo;
mod state;
mod views;
mod workflow;

#[doc(hidden)]
pub mod prelude;

pub use form::{FieldError, FieldKey, FormValueChange, FormValues, FormValuesErrors};
pub use views::{
    DEFAULT_WORKING_DIRECTORY_PATH, EXAMPLE_BUCKET_NAME, EXAMPLE_OBJECT_NAME_PREFIX, MainView,
    ReadyView, UrlStylesExamples,
};
pub use workflow::ProfileEditor;

/// Tracing target for session state transitions.
pub const TRACING_TARGET_STATE: &str = "s3profile_engine::state";

/// Tracing target for derived view recomputation.
pub const TRACING_TARGET_VIEWS: &str = "s3profile_engine::views";

/// Tracing target for workflow operations.
pub const TRACING_TARGET_WORKFLOW: &str = "s3profile_engine::workflow";
