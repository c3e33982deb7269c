//! OTP delivery

use std::time::Duration;

use serde::Serialize;

use crate::error::BoxError;

#[derive(Serialize)]
struct SmsMessage<'a> {
    to: &'a str,
    message: String,
}

#[derive(Clone)]
pub enum OtpSender {
    /// Development: the code is written to the log
    Log,
    /// HTTP SMS gateway
    Gateway {
        client: reqwest::Client,
        url: String,
        api_key: Option<String>,
    },
}

impl OtpSender {
    pub fn gateway(url: impl Into<String>, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(OtpSender::Gateway {
            client,
            url: url.into(),
            api_key,
        })
    }

    pub async fn send(&self, phone: &str, code: &str) -> Result<(), BoxError> {
        match self {
            OtpSender::Log => {
                tracing::info!(phone = %phone, code = %code, "OTP (development, not sent)");
                Ok(())
            }
            OtpSender::Gateway {
                client,
                url,
                api_key,
            } => {
                let mut request = client.post(url).json(&SmsMessage {
                    to: phone,
                    message: otp_message(code),
                });
                if let Some(key) = api_key {
                    request = request.bearer_auth(key);
                }
                request.send().await?.error_for_status()?;
                Ok(())
            }
        }
    }
}

fn otp_message(code: &str) -> String {
    format!("{code} is your Nagar Rakshak verification code. It expires in 5 minutes.")
}
