//! Per-widget conversion session
//!
//! A [`ConversionSession`] owns one widget's selected input, chosen option
//! and request status. All transitions go through its methods so that
//! result and error never coexist.
//!
//! ```text
//! Idle ──begin──► Converting ──complete(Ok)──► Success
//!   ▲                 │                          │
//!   │            complete(Err)                 reset
//!   │                 ▼                          │
//!   └──input change── Error ◄────────────────────┘
//! ```

pub mod naming;
mod state;

pub use naming::{converted_filename, url_download_filename};
pub use state::{ConversionSession, SessionError, SessionStatus, initial_option};
