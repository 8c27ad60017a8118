//! Field validation rules and URL normalization.

use url::Url;

use crate::form::FieldError;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` if `url` starts with a scheme (`scheme://...`).
///
/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`.
pub(crate) fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Checks that `url` parses as is, or once prefixed with `https://` when it
/// has no scheme.
fn is_parseable_url(url: &str) -> bool {
    if Url::parse(url).is_ok() {
        return true;
    }

    !has_scheme(url) && Url::parse(&format!("https://{url}")).is_ok()
}

/// Trims `url` and prefixes it with `https://` when it has no scheme.
pub(crate) fn format_url(url: &str) -> String {
    let url = url.trim();
    if has_scheme(url) {
        url.to_owned()
    } else {
        format!("https://{url}")
    }
}

pub(crate) fn url_error(url: &str) -> Option<FieldError> {
    if is_blank(url) {
        return Some(FieldError::IsRequired);
    }

    (!is_parseable_url(url.trim())).then_some(FieldError::MustBeAnUrl)
}

pub(crate) fn profile_name_error(name: &str, existing_names: &[String]) -> Option<FieldError> {
    if is_blank(name) {
        return Some(FieldError::IsRequired);
    }

    let name = name.trim();
    existing_names
        .iter()
        .any(|existing| existing == name)
        .then_some(FieldError::ProfileNameAlreadyUsed)
}

/// Credentials are only required for non-anonymous profiles.
pub(crate) fn credential_error(is_anonymous: bool, value: Option<&str>) -> Option<FieldError> {
    if is_anonymous {
        return None;
    }

    value
        .is_none_or(is_blank)
        .then_some(FieldError::IsRequired)
}
