//! Convenient re-exports for common use.

pub use crate::form::{FieldError, FieldKey, FormValueChange, FormValues, FormValuesErrors};
pub use crate::views::{MainView, ReadyView, UrlStylesExamples};
pub use crate::workflow::ProfileEditor;
