//! Conversion backend client
//!
//! Turns a [`ConversionRequest`] into one multipart POST and resolves to
//! either an [`Artifact`] or a [`ConvertError`] whose message is ready to
//! show. The adapter never interprets the bytes it receives.

mod artifact;
pub mod decode;
mod error;
mod file;
pub mod http;
mod request;
mod traits;

pub use artifact::Artifact;
pub use decode::{DecodeError, decode_error_body};
pub use error::{
    CONVERSION_FAILED, ConvertError, DOWNLOAD_FAILED, NETWORK_ERROR, Result, UNEXPECTED_ERROR,
};
pub use file::FileHandle;
pub use http::{HttpBackend, HttpConfig};
pub use request::{ConversionRequest, FormField, Payload};
pub use traits::ConversionBackend;
