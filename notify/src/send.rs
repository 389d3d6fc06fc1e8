use std::time::Duration;

use reqwest::blocking::{Client, Request};

use crate::error::{NotifyError, Result};
use crate::payload::Notification;

pub const AUTH_HEADER: &str = "X-Auth";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts the notification once. Any transport failure or non-success status
/// is terminal; there is no retry.
pub fn post(url: &str, api_key: &str, notification: &Notification) -> Result<()> {
    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let request = build_request(&client, url, api_key, notification)?;
    let response = client.execute(request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(NotifyError::Rejected {
            status: status.as_u16(),
        });
    }

    Ok(())
}

fn build_request(
    client: &Client,
    url: &str,
    api_key: &str,
    notification: &Notification,
) -> Result<Request> {
    Ok(client
        .post(url)
        .header(AUTH_HEADER, api_key)
        .json(notification)
        .build()?)
}
