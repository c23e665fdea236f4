use serde::{
    de::{self, value::StringDeserializer, DeserializeOwned},
    Deserialize, Deserializer,
};

/// HTML forms post `""` for untouched inputs and empty `<select>` options;
/// treat those as absent instead of failing to parse them.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let inner = StringDeserializer::<de::value::Error>::new(value.to_string());
            T::deserialize(inner).map(Some).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use uuid::Uuid;

    use crate::models::reviews::Severity;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::empty_string_as_none")]
        severity: Option<Severity>,
        #[serde(default, deserialize_with = "super::empty_string_as_none")]
        review_id: Option<Uuid>,
    }

    #[test]
    fn empty_values_become_none() {
        let fields: Fields = serde_json::from_value(serde_json::json!({
            "severity": "",
            "review_id": "  "
        }))
        .unwrap();

        assert_eq!(fields.severity, None);
        assert_eq!(fields.review_id, None);
    }

    #[test]
    fn present_values_are_parsed() {
        let id = Uuid::new_v4();
        let fields: Fields = serde_json::from_value(serde_json::json!({
            "severity": "critical",
            "review_id": id.to_string()
        }))
        .unwrap();

        assert_eq!(fields.severity, Some(Severity::Critical));
        assert_eq!(fields.review_id, Some(id));
    }

    #[test]
    fn missing_values_default_to_none() {
        let fields: Fields = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(fields.severity, None);
        assert_eq!(fields.review_id, None);
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let result = serde_json::from_value::<Fields>(serde_json::json!({ "severity": "huge" }));

        assert!(result.is_err());
    }
}
