use serde::{Deserialize, Serialize};

/// Static footer shown under every communication error.
pub const BUG_REPORT_FOOTER: &str =
    "Please report any dashboard errors as issues at https://github.com/BYU-PRISM/GEKKO";

const HEADER: &str = "Internal Communication Error";

/// Content of the communication-error modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpError {
    pub header: String,
    pub body: String,
    pub report: String,
}

impl Default for HttpError {
    fn default() -> Self {
        Self {
            header: String::new(),
            body: String::new(),
            report: BUG_REPORT_FOOTER.to_string(),
        }
    }
}

impl HttpError {
    /// The backend did not answer at all.
    pub fn no_response(detail: &str) -> Self {
        Self::with_body(format!(
            "Lost communication with the model backend, so no further updates can be \
             received. Did the model script stop or crash? If so, close this window \
             and restart it. ({detail})"
        ))
    }

    /// The backend answered with an error status.
    pub fn server_status(code: u16, reason: &str) -> Self {
        Self::with_body(format!(
            "The backend answered with an error. Please include these details in an \
             error report. Error Code: {code}, Error: {reason}"
        ))
    }

    /// The backend answered, but not with anything the dashboard understands.
    pub fn unexpected_payload(detail: &str) -> Self {
        Self::with_body(format!(
            "The backend sent a response the dashboard could not read. The backend \
             and dashboard versions may not match. Details: {detail}"
        ))
    }

    fn with_body(body: String) -> Self {
        Self {
            header: HEADER.to_string(),
            body,
            report: BUG_REPORT_FOOTER.to_string(),
        }
    }
}
