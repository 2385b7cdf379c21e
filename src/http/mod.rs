use std::time::Duration;
use anyhow::Result;
use log::debug;
use reqwest::{Client, StatusCode};
use tokio::runtime::Builder;


pub const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body:   String,
}

// a current-thread runtime keeps every socket on the calling thread,
// and so in its network namespace
pub fn get(url: &str, token: Option<&str>) -> Result<Response> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(fetch(url, token))
}

async fn fetch(url: &str, token: Option<&str>) -> Result<Response> {
    let client = Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(TIMEOUT)
        .build()?;

    let mut request = client.get(url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status   = response.status();
    let body     = response.text().await?;

    debug!("GET {} returned {}", url, status);

    Ok(Response {
        status: status,
        body:   body,
    })
}
