use anyhow::bail;
use folio_extern_contracts::contact::{ContactApiError, ContactApiResponse};
use folio_models::contact::ServerFieldErrors;
use serde::Deserialize;
use serde_json::Value;

/// `{status, data?, error?}` wrapper used by every contact backend endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    status: EnvelopeStatus,
    data: Option<T>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Option<Value>,
}

impl<T> Envelope<T> {
    pub fn into_response(self) -> anyhow::Result<ContactApiResponse<T>> {
        match (self.status, self.data, self.error) {
            (EnvelopeStatus::Success, Some(data), _) => Ok(ContactApiResponse::Success(data)),
            (EnvelopeStatus::Success, None, _) => bail!("Success envelope without data"),
            (EnvelopeStatus::Error, _, Some(error)) => Ok(ContactApiResponse::Error(error.into())),
            (EnvelopeStatus::Error, _, None) => bail!("Error envelope without error object"),
        }
    }
}

impl From<ErrorBody> for ContactApiError {
    fn from(value: ErrorBody) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details.map(field_errors).unwrap_or_default(),
        }
    }
}

/// Flattens `{field: [reason, ...] | reason}` into ordered field errors.
/// Anything that is not an object carries no field information.
fn field_errors(details: Value) -> ServerFieldErrors {
    let Value::Object(fields) = details else {
        return ServerFieldErrors::default();
    };

    let entries = fields
        .into_iter()
        .map(|(field, reasons)| {
            let reasons = match reasons {
                Value::Array(reasons) => reasons.into_iter().map(reason).collect(),
                Value::Null => Vec::new(),
                other => vec![reason(other)],
            };
            (field, reasons)
        })
        .collect();

    ServerFieldErrors::new(entries)
}

fn reason(value: Value) -> String {
    match value {
        Value::String(reason) => reason,
        other => other.to_string(),
    }
}
