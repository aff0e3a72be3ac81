//! Field checks for inbound bookmark payloads.
//!
//! Payloads arrive as untyped JSON. A `null` value is treated the same as an
//! absent key, and keys other than the four bookmark fields are ignored.

use crate::bookmark::{BookmarkPatch, NewBookmark};
use crate::error::ValidationError;
use serde_json::{Map, Value};
use url::Url;

/// Highest rating a bookmark may carry. The lowest is zero.
pub const MAX_RATING: u8 = 5;

/// Checks a create payload and normalizes it into [`NewBookmark`].
///
/// Checks run in a fixed order and stop at the first failure: title
/// presence, url presence, rating presence, rating range, url syntax.
/// A missing description defaults to an empty string.
pub fn validate_create(payload: &Value) -> Result<NewBookmark, ValidationError> {
    let fields = as_object(payload)?;

    let title = match present(fields, "title") {
        None => return Err(ValidationError::MissingField("title")),
        Some(Value::String(title)) if title.is_empty() => {
            return Err(ValidationError::MissingField("title"))
        }
        Some(value) => parse_title(value)?,
    };

    let raw_url = match present(fields, "url") {
        None => return Err(ValidationError::MissingField("url")),
        Some(Value::String(url)) if url.is_empty() => {
            return Err(ValidationError::MissingField("url"))
        }
        Some(value) => value,
    };

    let raw_rating =
        present(fields, "rating").ok_or(ValidationError::MissingField("rating"))?;
    let rating = parse_rating(raw_rating)?;
    let url = parse_url(raw_url)?;

    let description = present(fields, "description")
        .map(parse_description)
        .transpose()?
        .unwrap_or_default();

    Ok(NewBookmark {
        title,
        url,
        rating,
        description,
    })
}

/// Checks an update payload and normalizes it into a [`BookmarkPatch`].
///
/// Only the fields present are checked. A payload touching none of the
/// bookmark fields is rejected with [`ValidationError::EmptyUpdate`].
pub fn validate_update(payload: &Value) -> Result<BookmarkPatch, ValidationError> {
    let fields = as_object(payload)?;
    let mut patch = BookmarkPatch::default();

    if let Some(value) = present(fields, "title") {
        patch.title = Some(parse_title(value)?);
    }
    if let Some(value) = present(fields, "url") {
        patch.url = Some(parse_url(value)?);
    }
    if let Some(value) = present(fields, "rating") {
        patch.rating = Some(parse_rating(value)?);
    }
    if let Some(value) = present(fields, "description") {
        patch.description = Some(parse_description(value)?);
    }

    if patch.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }

    Ok(patch)
}

/// Returns `true` for absolute `http`/`https` URLs with a host.
///
/// The raw text must already be well formed: `://` right after the scheme
/// and nothing outside the RFC 3986 character set. `Url::parse` alone would
/// repair inputs like `http:example.com`.
pub fn is_web_url(raw: &str) -> bool {
    if !raw.chars().all(is_uri_char) {
        return false;
    }

    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return false;
    }

    Url::parse(raw).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https")
            && url.host_str().is_some_and(|host| !host.is_empty())
    })
}

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ":/?#[]@!$&'()*+,;=._~%-".contains(c)
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or(ValidationError::NotAnObject)
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn parse_title(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(title) if title.is_empty() => Err(ValidationError::EmptyField("title")),
        Value::String(title) => Ok(title.clone()),
        _ => Err(ValidationError::InvalidType {
            field: "title",
            expected: "string",
        }),
    }
}

fn parse_description(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(description) => Ok(description.clone()),
        _ => Err(ValidationError::InvalidType {
            field: "description",
            expected: "string",
        }),
    }
}

fn parse_url(value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(raw) if is_web_url(raw) => Ok(raw.clone()),
        Value::String(raw) => Err(ValidationError::InvalidUrl(raw.clone())),
        other => Err(ValidationError::InvalidUrl(other.to_string())),
    }
}

/// Accepts JSON integers and integral floats (`4.0`) within `0..=5`.
fn parse_rating(value: &Value) -> Result<u8, ValidationError> {
    let invalid = || ValidationError::InvalidRating(value.to_string());

    let Value::Number(number) = value else {
        return Err(invalid());
    };

    let rating = match number.as_i64() {
        Some(rating) => rating,
        None => match number.as_f64() {
            Some(rating) if rating.fract() == 0.0 => rating as i64,
            _ => return Err(invalid()),
        },
    };

    u8::try_from(rating)
        .ok()
        .filter(|rating| *rating <= MAX_RATING)
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "title": "Test",
            "url": "http://example.com",
            "rating": 5,
        })
    }

    fn without(field: &str) -> Value {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove(field);
        payload
    }

    #[test]
    fn create_defaults_description() {
        let fields = validate_create(&valid_payload()).unwrap();
        assert_eq!(
            fields,
            NewBookmark {
                title: "Test".to_string(),
                url: "http://example.com".to_string(),
                rating: 5,
                description: String::new(),
            }
        );
    }

    #[test]
    fn create_keeps_supplied_description() {
        let mut payload = valid_payload();
        payload["description"] = json!("Listicle");
        let fields = validate_create(&payload).unwrap();
        assert_eq!(fields.description, "Listicle");
    }

    #[test]
    fn create_names_each_missing_field() {
        for field in ["title", "url", "rating"] {
            let err = validate_create(&without(field)).unwrap_err();
            assert_eq!(err, ValidationError::MissingField(field));
            assert_eq!(err.to_string(), format!("Missing '{field}' in request body"));
        }
    }

    #[test]
    fn create_treats_null_and_empty_as_missing() {
        let mut payload = valid_payload();
        payload["title"] = json!("");
        assert_eq!(
            validate_create(&payload).unwrap_err(),
            ValidationError::MissingField("title")
        );

        let mut payload = valid_payload();
        payload["url"] = Value::Null;
        assert_eq!(
            validate_create(&payload).unwrap_err(),
            ValidationError::MissingField("url")
        );
    }

    #[test]
    fn create_checks_presence_before_values() {
        let payload = json!({ "title": "Test", "url": "not a url" });
        assert_eq!(
            validate_create(&payload).unwrap_err(),
            ValidationError::MissingField("rating")
        );
    }

    #[test]
    fn create_checks_rating_before_url() {
        let payload = json!({ "title": "Test", "url": "not a url", "rating": 9 });
        assert!(matches!(
            validate_create(&payload).unwrap_err(),
            ValidationError::InvalidRating(_)
        ));
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        for rating in 0..=5 {
            let mut payload = valid_payload();
            payload["rating"] = json!(rating);
            assert_eq!(validate_create(&payload).unwrap().rating, rating);
        }
    }

    #[test]
    fn rejects_out_of_range_and_non_integer_ratings() {
        for rating in [json!(-1), json!(6), json!(2.5), json!("3"), json!(true), json!(300)] {
            let mut payload = valid_payload();
            payload["rating"] = rating;
            let err = validate_create(&payload).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidRating(_)), "{err:?}");
            assert_eq!(err.to_string(), "'rating' must be a number between 0 and 5");
        }
    }

    #[test]
    fn accepts_integral_float_rating() {
        let mut payload = valid_payload();
        payload["rating"] = json!(4.0);
        assert_eq!(validate_create(&payload).unwrap().rating, 4);
    }

    #[test]
    fn rejects_malformed_urls() {
        for url in [
            "http//: google.com",
            "example.com",
            "ftp://example.com",
            "mailto:someone@example.com",
            "http://",
            "http://exa mple.com",
            "http:example.com",
            "http:/example.com",
            "https:\\\\example.com",
            "http://example.com/\"><script>alert(1)</script>",
            "http://example.com/<b>",
            "http://example.com/{x}",
            "javascript://example.com",
        ] {
            let mut payload = valid_payload();
            payload["url"] = json!(url);
            assert_eq!(
                validate_create(&payload).unwrap_err(),
                ValidationError::InvalidUrl(url.to_string()),
                "{url}"
            );
        }
    }

    #[test]
    fn accepts_web_urls() {
        assert!(is_web_url("http://example.com"));
        assert!(is_web_url("https://www.thinkful.com/path?q=1#frag"));
        assert!(is_web_url("http://localhost:8000"));
        assert!(is_web_url("HTTPS://Example.com/a%20b;c=d"));
        assert!(is_web_url("http://user@example.com/p/(x)?a=1&b=[2]"));
    }

    #[test]
    fn rejects_non_string_title_and_description() {
        let mut payload = valid_payload();
        payload["title"] = json!(42);
        assert_eq!(
            validate_create(&payload).unwrap_err(),
            ValidationError::InvalidType {
                field: "title",
                expected: "string"
            }
        );

        let mut payload = valid_payload();
        payload["description"] = json!(["a"]);
        assert_eq!(
            validate_create(&payload).unwrap_err().field(),
            Some("description")
        );
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert_eq!(
            validate_create(&json!([1, 2])).unwrap_err(),
            ValidationError::NotAnObject
        );
        assert_eq!(
            validate_update(&json!("title")).unwrap_err(),
            ValidationError::NotAnObject
        );
    }

    #[test]
    fn update_requires_a_known_field() {
        assert_eq!(
            validate_update(&json!({})).unwrap_err(),
            ValidationError::EmptyUpdate
        );
        let err = validate_update(&json!({ "irrelevantField": "foo" })).unwrap_err();
        assert_eq!(err, ValidationError::EmptyUpdate);
        assert!(err.to_string().contains("must contain"));
    }

    #[test]
    fn update_only_sets_supplied_fields() {
        let patch = validate_update(&json!({ "title": "B", "fieldToIgnore": 1 })).unwrap();
        assert_eq!(
            patch,
            BookmarkPatch {
                title: Some("B".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn update_checks_supplied_values() {
        assert_eq!(
            validate_update(&json!({ "title": "" })).unwrap_err(),
            ValidationError::EmptyField("title")
        );
        assert!(matches!(
            validate_update(&json!({ "rating": 7 })).unwrap_err(),
            ValidationError::InvalidRating(_)
        ));
        assert!(matches!(
            validate_update(&json!({ "url": "nope" })).unwrap_err(),
            ValidationError::InvalidUrl(_)
        ));
    }

    #[test]
    fn update_allows_clearing_description() {
        let patch = validate_update(&json!({ "description": "" })).unwrap();
        assert_eq!(patch.description.as_deref(), Some(""));
    }
}
