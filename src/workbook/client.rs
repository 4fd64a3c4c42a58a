// src/workbook/client.rs
use reqwest::header;

use crate::utils::error::FetchError;

const HTTP_USER_AGENT: &str = concat!("sheet_extractor/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client configured for workbook downloads.
fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(HTTP_USER_AGENT) // Some hosts reject requests without one
        // Can add more config like timeouts here
        .build()
}

/// Downloads a workbook document and returns its raw bytes.
/// One GET, no retry: any transport failure or non-success status is fatal.
pub async fn download_workbook(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = build_http_client()?; // Propagate client build error if any

    tracing::info!("Fetching workbook from: {}", url);
    tracing::debug!("Using User-Agent: {}", HTTP_USER_AGENT);

    let response = client
        .get(url)
        // Workbooks come in several container formats; accept anything binary
        .header(header::ACCEPT, "application/octet-stream,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(FetchError::Http(status));
    }

    // Read the response body as raw bytes; the payload is a binary document
    let body = response.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_workbook_returns_body_bytes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/wordlist.xlsx")
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(&b"PK\x03\x04fake-workbook"[..])
            .create_async()
            .await;

        let url = format!("{}/wordlist.xlsx", server.url());
        let bytes = download_workbook(&url)
            .await
            .expect("download should succeed");
        assert_eq!(bytes, b"PK\x03\x04fake-workbook");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_download_workbook_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing.xlsx")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/missing.xlsx", server.url());
        let err = download_workbook(&url)
            .await
            .expect_err("404 must be an error");
        match err {
            FetchError::Http(status) => assert_eq!(status.as_u16(), 404),
            other => panic!("Expected FetchError::Http, got: {other:?}"),
        }
    }
}
