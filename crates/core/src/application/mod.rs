// Application Layer - Use Cases

pub mod capture;
pub mod constants;

// Re-exports
pub use capture::{CaptureConfig, CommandLine, FingerprintCapture};
