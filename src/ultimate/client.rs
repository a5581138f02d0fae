use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::DeviceControl;
use super::protocol::{Endpoint, PASSWORD_HEADER, base_url, check_range};
use crate::error::TransportError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking client for an Ultimate 64 / Ultimate-II+ on the local network.
pub struct UltimateClient {
    base_url: String,
    password: Option<String>,
    http: Client,
}

impl UltimateClient {
    pub fn new(host: &str, password: Option<String>) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| TransportError::Http {
                operation: "client setup",
                source,
            })?;

        Ok(Self {
            base_url: base_url(host),
            password,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send(&self, endpoint: Endpoint, body: Option<Vec<u8>>) -> Result<Vec<u8>, TransportError> {
        let operation = endpoint.operation();
        let url = format!("{}{}", self.base_url, endpoint.path());
        log::debug!("{} {}", endpoint.method(), url);

        let mut request = self.http.request(endpoint.method(), url);
        if let Some(password) = &self.password {
            request = request.header(PASSWORD_HEADER, password);
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(body);
        }

        let response = request
            .send()
            .map_err(|source| TransportError::Http { operation, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .map_err(|source| TransportError::Http { operation, source })?;
        Ok(bytes.to_vec())
    }
}

impl DeviceControl for UltimateClient {
    fn freeze(&mut self) -> Result<(), TransportError> {
        self.send(Endpoint::Pause, None).map(|_| ())
    }

    fn resume(&mut self) -> Result<(), TransportError> {
        self.send(Endpoint::Resume, None).map(|_| ())
    }

    fn read_memory(&mut self, address: u16, length: usize) -> Result<Vec<u8>, TransportError> {
        check_range(address, length)?;
        let mut data = self.send(Endpoint::ReadMemory { address, length }, None)?;
        if data.len() < length {
            return Err(TransportError::ShortRead {
                address,
                expected: length,
                actual: data.len(),
            });
        }
        data.truncate(length);
        Ok(data)
    }

    fn write_memory(&mut self, address: u16, bytes: &[u8]) -> Result<(), TransportError> {
        check_range(address, bytes.len())?;
        self.send(Endpoint::WriteMemory { address }, Some(bytes.to_vec()))
            .map(|_| ())
    }
}
