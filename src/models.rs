//! Data models and structures
//!
//! Defines the photoshoot request accepted over HTTP and the result returned
//! to the caller.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder rendered in prompts for fields the caller left out.
pub const UNDEFINED: &str = "undefined";

/// Subject type value that selects the person branch. Anything else is a product.
pub const PERSON: &str = "person";

/// Incoming photoshoot request.
///
/// Every field is optional at the type level: required fields are checked by
/// [`PhotoshootRequest::validate`], and the rest render as [`UNDEFINED`] when
/// absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoshootRequest {
    #[serde(rename = "type", default, deserialize_with = "truthy_text")]
    pub subject_type: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time_of_day: Option<String>,
    /// Kept as raw JSON: it is both a prompt label and the fan-out count.
    #[serde(default, deserialize_with = "present_value")]
    pub number_of_items: Option<Value>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub additional_details: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub person_gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub person_age: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub person_hairstyle: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub person_clothing: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub product_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_material: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_brand: Option<String>,
}

/// Accept strings as-is and other scalars by their JSON text.
///
/// An explicit `null` is rendered as the text `null`, like any other scalar;
/// only a field that is absent altogether renders as [`UNDEFINED`].
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    }))
}

/// Like [`lenient_text`], but falsy values (`null`, `false`, `0`, `""`) are
/// treated as absent. Used for the required fields and `additionalDetails`,
/// where a falsy value means "not provided".
fn truthy_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if is_falsy(&value) {
        return Ok(None);
    }
    Ok(Some(match value {
        Value::String(s) => s,
        other => other.to_string(),
    }))
}

/// Keep an explicit `null` as `Some(Value::Null)` instead of collapsing it to `None`.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render an optional field, falling back to [`UNDEFINED`].
pub fn text_or_undefined(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(UNDEFINED)
}

impl PhotoshootRequest {
    pub fn is_person(&self) -> bool {
        self.subject_type.as_deref() == Some(PERSON)
    }

    /// Check that `type`, `location` and `style` are present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            ("type", &self.subject_type),
            ("location", &self.location),
            ("style", &self.style),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(missing))
        }
    }

    /// Text used for the "Number of People/Items" prompt line.
    pub fn item_count_label(&self) -> String {
        match &self.number_of_items {
            None => UNDEFINED.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Number of image generation calls to issue.
    ///
    /// An integral number yields that many calls. A missing or non-numeric
    /// value yields a single call. Negative, fractional and out-of-range
    /// numbers are rejected.
    pub fn fan_out(&self) -> Result<usize> {
        let number = match &self.number_of_items {
            Some(Value::Number(number)) => number,
            _ => return Ok(1),
        };

        if let Some(count) = number.as_u64() {
            if count <= u64::from(u32::MAX) {
                return Ok(count as usize);
            }
        } else if let Some(count) = number.as_f64() {
            if count >= 0.0 && count.fract() == 0.0 && count <= f64::from(u32::MAX) {
                return Ok(count as usize);
            }
        }

        Err(Error::InvalidItemCount(number.to_string()))
    }
}

/// Generated photoshoot returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoshootResult {
    pub images: Vec<String>,
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> PhotoshootRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_deserialization_camel_case() {
        let request = parse(json!({
            "type": "person",
            "location": "Paris rooftop",
            "style": "Editorial",
            "timeOfDay": "Golden hour",
            "numberOfItems": 2,
            "personGender": "Female",
            "personAge": "25-35",
            "personHairstyle": "Bob cut",
            "personClothing": "Trench coat"
        }));

        assert!(request.is_person());
        assert_eq!(request.time_of_day.as_deref(), Some("Golden hour"));
        assert_eq!(request.person_hairstyle.as_deref(), Some("Bob cut"));
        assert_eq!(request.fan_out().unwrap(), 2);
        assert_eq!(request.item_count_label(), "2");
        assert!(request.additional_details.is_none());
    }

    #[test]
    fn test_non_string_scalars_are_rendered() {
        let request = parse(json!({ "personAge": 30, "productBrand": true, "style": null }));
        assert_eq!(request.person_age.as_deref(), Some("30"));
        assert_eq!(request.product_brand.as_deref(), Some("true"));
        assert!(request.style.is_none());
    }

    #[test]
    fn test_explicit_null_renders_as_null() {
        let request = parse(json!({ "timeOfDay": null, "personGender": null, "numberOfItems": null }));
        assert_eq!(request.time_of_day.as_deref(), Some("null"));
        assert_eq!(request.person_gender.as_deref(), Some("null"));
        assert_eq!(request.item_count_label(), "null");
        assert_eq!(request.fan_out().unwrap(), 1);
        assert!(parse(json!({})).time_of_day.is_none());
    }

    #[test]
    fn test_falsy_required_fields_fail_validation() {
        for body in [
            json!({ "type": false, "location": "Studio", "style": "Portrait" }),
            json!({ "type": 0, "location": "Studio", "style": "Portrait" }),
            json!({ "type": "person", "location": false, "style": "Portrait" }),
            json!({ "type": "person", "location": "Studio", "style": 0.0 }),
            json!({ "type": null, "location": "Studio", "style": "Portrait" }),
        ] {
            assert!(matches!(parse(body).validate(), Err(Error::Validation(_))));
        }

        let request = parse(json!({ "type": true, "location": 1, "style": "Portrait" }));
        assert!(request.validate().is_ok());
        assert_eq!(request.location.as_deref(), Some("1"));
    }

    #[test]
    fn test_any_other_type_is_product() {
        assert!(!parse(json!({ "type": "product" })).is_person());
        assert!(!parse(json!({ "type": "Person" })).is_person());
        assert!(!parse(json!({ "type": "vehicle" })).is_person());
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let request = parse(json!({ "type": "person", "location": "" }));
        match request.validate() {
            Err(Error::Validation(fields)) => assert_eq!(fields, vec!["location", "style"]),
            other => panic!("expected validation error, got {:?}", other),
        }

        let request = parse(json!({ "type": "product", "location": "Studio", "style": "Flat lay" }));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_fan_out_edge_cases() {
        assert_eq!(parse(json!({})).fan_out().unwrap(), 1);
        assert_eq!(parse(json!({ "numberOfItems": "3" })).fan_out().unwrap(), 1);
        assert_eq!(parse(json!({ "numberOfItems": 0 })).fan_out().unwrap(), 0);
        assert_eq!(parse(json!({ "numberOfItems": 4.0 })).fan_out().unwrap(), 4);

        assert!(matches!(
            parse(json!({ "numberOfItems": -1 })).fan_out(),
            Err(Error::InvalidItemCount(_))
        ));
        assert!(matches!(
            parse(json!({ "numberOfItems": 2.5 })).fan_out(),
            Err(Error::InvalidItemCount(_))
        ));
        assert!(matches!(
            parse(json!({ "numberOfItems": 5_000_000_000u64 })).fan_out(),
            Err(Error::InvalidItemCount(_))
        ));
    }

    #[test]
    fn test_item_count_label() {
        assert_eq!(parse(json!({})).item_count_label(), UNDEFINED);
        assert_eq!(parse(json!({ "numberOfItems": "three" })).item_count_label(), "three");
        assert_eq!(parse(json!({ "numberOfItems": 3 })).item_count_label(), "3");
    }

    #[test]
    fn test_result_serialization() {
        let result = PhotoshootResult {
            images: vec!["https://img/1.png".to_string()],
            prompt: "a prompt".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({ "images": ["https://img/1.png"], "prompt": "a prompt" }));
    }
}
