//! Schema fetch: service call plus document checks

use super::traits::FormApiTrait;
use crate::state::FormSchema;
use thiserror::Error;

/// The one message shown whenever no usable form can be obtained
#[derive(Debug, Error)]
#[error("Failed to fetch form data. Please try again.")]
pub struct SchemaUnavailable;

/// Fetch and check the schema for `roll_number`.
///
/// Transport failures, refusals and malformed documents all collapse into
/// [`SchemaUnavailable`]; the cause is logged.
pub async fn fetch_schema(
    api: &mut dyn FormApiTrait,
    roll_number: &str,
) -> Result<FormSchema, SchemaUnavailable> {
    let document = match api.get_form(roll_number).await {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(roll_number, "form fetch failed: {err:#}");
            return Err(SchemaUnavailable);
        }
    };

    match FormSchema::from_document(document) {
        Ok(schema) => {
            tracing::info!(
                form_id = %schema.form_id,
                sections = schema.section_count(),
                "form schema loaded"
            );
            Ok(schema)
        }
        Err(err) => {
            tracing::warn!(roll_number, "form schema rejected: {err}");
            Err(SchemaUnavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFormApiTrait;
    use anyhow::anyhow;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document() -> serde_json::Value {
        json!({
            "form": {
                "formId": "f-1",
                "formTitle": "Onboarding",
                "version": "2",
                "sections": [{
                    "sectionId": 1,
                    "title": "About you",
                    "description": "",
                    "fields": [{
                        "fieldId": "name",
                        "type": "text",
                        "label": "Name",
                        "required": true,
                        "dataTestId": "name-input"
                    }]
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_returns_checked_schema() {
        let mut api = MockFormApiTrait::new();
        api.expect_get_form()
            .withf(|roll| roll == "42")
            .times(1)
            .returning(|_| Ok(document()));

        let schema = fetch_schema(&mut api, "42").await.unwrap();
        assert_eq!(schema.form_id, "f-1");
        assert_eq!(schema.section_titles(), vec!["About you"]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_unavailable() {
        let mut api = MockFormApiTrait::new();
        api.expect_get_form()
            .returning(|_| Err(anyhow!("connection refused")));

        let err = fetch_schema(&mut api, "42").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch form data. Please try again."
        );
    }

    #[test]
    fn test_missing_envelope_is_unavailable() {
        let mut api = MockFormApiTrait::new();
        api.expect_get_form()
            .returning(|_| Ok(json!({ "message": "no form for this roll number" })));

        let result = tokio_test::block_on(fetch_schema(&mut api, "7"));
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_without_sections_is_unavailable() {
        let mut api = MockFormApiTrait::new();
        api.expect_get_form().returning(|_| {
            Ok(json!({
                "form": { "formId": "f", "formTitle": "t", "version": "1", "sections": [] }
            }))
        });

        let result = tokio_test::block_on(fetch_schema(&mut api, "7"));
        assert!(result.is_err());
    }
}
