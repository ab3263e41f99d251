//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes. Capture failures are
//! not RPC errors; they travel inside the method result.

use fingerprint_core::error::AppError;
use jsonrpsee::types::ErrorObjectOwned;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SYSTEM_ERROR: i32 = 5002;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Io(e) => ErrorObjectOwned::owned(code::SYSTEM_ERROR, e.to_string(), None::<()>),
        AppError::Serialization(e) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, e.to_string(), None::<()>)
        }
        AppError::Config(msg) => ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_maps_to_4000() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = source.to_string();

        let err = to_rpc_error(AppError::from(source));
        assert_eq!(err.code(), code::VALIDATION_ERROR);
        assert_eq!(err.message(), expected);
    }

    #[test]
    fn test_io_maps_to_system_error() {
        let err = to_rpc_error(AppError::from(std::io::Error::other("pipe closed")));
        assert_eq!(err.code(), code::SYSTEM_ERROR);
    }

    #[test]
    fn test_config_maps_to_internal() {
        let err = to_rpc_error(AppError::Config("missing command".to_string()));
        assert_eq!(err.code(), code::INTERNAL_ERROR);
    }
}
