use reqwest::Method;

use crate::error::TransportError;

/// Header carrying the optional network password.
pub const PASSWORD_HEADER: &str = "X-Password";

/// The subset of the Ultimate REST API used for a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Pause,
    Resume,
    ReadMemory { address: u16, length: usize },
    WriteMemory { address: u16 },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Self::Pause | Self::Resume => Method::PUT,
            Self::ReadMemory { .. } => Method::GET,
            Self::WriteMemory { .. } => Method::POST,
        }
    }

    /// Path and query, relative to the device root.
    pub fn path(&self) -> String {
        match self {
            Self::Pause => "/v1/machine:pause".to_string(),
            Self::Resume => "/v1/machine:resume".to_string(),
            Self::ReadMemory { address, length } => {
                format!("/v1/machine:readmem?address={:X}&length={}", address, length)
            }
            Self::WriteMemory { address } => format!("/v1/machine:writemem?address={:X}", address),
        }
    }

    /// Short name used in error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::ReadMemory { .. } => "readmem",
            Self::WriteMemory { .. } => "writemem",
        }
    }
}

/// DMA access cannot wrap from $FFFF back to $0000.
pub fn check_range(address: u16, length: usize) -> Result<(), TransportError> {
    if address as usize + length > 0x10000 {
        return Err(TransportError::OutOfRange { address, length });
    }
    Ok(())
}

/// Accept `192.168.1.64`, `c64u.local:8080` or a full `http://` URL.
pub fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}
