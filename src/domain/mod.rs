//! Domain layer: strong types with validation and invariants (no I/O).

mod batch;
mod request;
mod response;
mod validation;
mod value;

pub use batch::{Batch, SEND_BATCH_SIZE, SEND_MAX_RECIPIENTS_PER_REQUEST, batch};
pub use request::{QUERY_LOG_DEFAULT_MAX_COUNT, QueryLog, ReserveDelete, SendOptions, SendSms};
pub use response::{
    ChunkReport, LogEntry, QueryLogResult, ReserveDeleteResult, SendOutcome, SendResult,
};
pub use validation::ValidationError;
pub use value::{
    AccountId, ErrorCode, GatewayDate, MessageId, MessageText, Password, PhoneNumber, Recipient,
};
