//! Typed Rust client for the message.net.tw bulk-SMS HTTP gateway.
//!
//! The crate is split the usual way: a domain layer of strong types, a transport layer for
//! the gateway's `key=value` reply format (including the Big5 caption/row table of the log
//! query), and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use messagenet::{Credential, MessageNetClient, MessageText, Recipient, SendOptions, SendSms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), messagenet::GatewayError> {
//!     let client = MessageNetClient::new(Credential::new("account", "password")?);
//!     let request = SendSms::new(
//!         vec![Recipient::new("0912345678")?],
//!         MessageText::new("hello")?,
//!         SendOptions::default(),
//!     );
//!     let result = client.send(request).await;
//!     for chunk in &result.chunks {
//!         match &chunk.result {
//!             Ok(outcome) => println!("{:?}: {:?}", chunk.recipients, outcome.error_code),
//!             Err(err) => eprintln!("{:?}: {err}", chunk.recipients),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credential, GatewayError, MessageNetClient, MessageNetClientBuilder};
pub use domain::{
    AccountId, ChunkReport, ErrorCode, GatewayDate, LogEntry, MessageId, MessageText, Password,
    PhoneNumber, QueryLog, QueryLogResult, Recipient, ReserveDelete, ReserveDeleteResult,
    SEND_MAX_RECIPIENTS_PER_REQUEST, SendOptions, SendOutcome, SendResult, SendSms,
    ValidationError,
};
