use num_derive::FromPrimitive;
use std::fmt;

/// Known numeric error codes the firmware reports in the top-level `err`
/// field of an otherwise well-formed response.
#[derive(Debug, Clone, Copy, FromPrimitive)]
pub enum ErrCode {
    /* {"err":401} - wrong password, insufficient rights or session limit reached */
    Unauthorized = 401,
}

#[derive(Debug, Clone)]
pub enum Error {
    /// Input rejected before any network access; never retried.
    Validation(String),
    /// Connection-level failure or a non-2xx status.
    Transport(String),
    /// Body not parseable as JSON, or an expected field absent.
    Protocol(String),
    /// Login reached the device but yielded no usable session.
    Auth(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Validation(s) => write!(f, "validation error: {}", s),
            Error::Transport(s) => write!(f, "transport error: {}", s),
            Error::Protocol(s) => write!(f, "protocol error: {}", s),
            Error::Auth(s) => write!(f, "authorization error: {}", s),
        }
    }
}

impl std::error::Error for Error {}

/// Map a firmware `err` code to the matching taxonomy variant.
pub fn from_err_code(code: u64) -> Error {
    match num::FromPrimitive::from_u64(code) {
        Some(ErrCode::Unauthorized) => {
            Error::Auth(format!("device refused the session (err {})", code))
        }
        None => Error::Protocol(format!("device reported error code {}", code)),
    }
}
