//! HTTP handlers. Each handler validates its payload, calls one service
//! action and serializes the result; error mapping lives on `ServiceError`.

use actix_web::HttpResponse;
use serde_json::json;
use validator::ValidationErrors;

pub mod auth;
pub mod leads;

/// Renders failed input validation in the shape clients expect: a summary
/// message plus per-field message lists.
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Ongeldige waarde voor {field}."))
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect();

    HttpResponse::UnprocessableEntity().json(json!({
        "message": "The given data was invalid.",
        "errors": fields,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 2, message = "Naam is te kort."))]
        name: String,
    }

    #[actix_web::test]
    async fn validation_response_lists_field_messages() {
        let errors = Probe {
            name: "x".to_string(),
        }
        .validate()
        .unwrap_err();

        let response = validation_error_response(&errors);
        assert_eq!(response.status(), actix_web::http::StatusCode::UNPROCESSABLE_ENTITY);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "The given data was invalid.");
        assert_eq!(json["errors"]["name"][0], "Naam is te kort.");
    }
}
