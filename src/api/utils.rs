use reqwest::Client;

use crate::error::{PipelineError, redact_query};

/// Returns the raw body; decoding is left to the caller so one bad row does
/// not reject the whole response.
pub async fn make_request(client: &Client, url: &str) -> Result<Vec<u8>, PipelineError> {
    let res = client.get(url).send().await?;

    if !res.status().is_success() {
        return Err(PipelineError::SourceUnavailable(format!(
            "Request to {} failed: {}",
            redact_query(url),
            res.status()
        )));
    }

    Ok(res.bytes().await?.to_vec())
}

pub fn is_google_sheet_without_csv(url: &str) -> bool {
    url.contains("docs.google.com/spreadsheets") && !url.contains("output=csv")
}
