use crate::domain::validation::ValidationError;
use crate::domain::value::{GatewayDate, MessageId, MessageText, Recipient};

/// Protocol default for `mcount`; the parameter is omitted when it would repeat this.
pub const QUERY_LOG_DEFAULT_MAX_COUNT: u32 = 1000;

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Long-SMS mode passed through as `longsms`; `0` leaves it out (plain SMS).
    pub long_sms: u32,
    /// Schedule the message instead of sending immediately. Scheduled messages are
    /// "reservations" and can be cancelled with [`ReserveDelete`].
    pub send_date: Option<GatewayDate>,
}

/// Send one text to any number of recipients.
///
/// The client splits the recipients into chunks that respect the gateway's per-request cap,
/// so there is no upper bound here. An empty recipient list is accepted and sends nothing.
#[derive(Debug, Clone)]
pub struct SendSms {
    recipients: Vec<Recipient>,
    msg: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn new(recipients: Vec<Recipient>, msg: MessageText, options: SendOptions) -> Self {
        Self {
            recipients,
            msg,
            options,
        }
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn msg(&self) -> &MessageText {
        &self.msg
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

/// Query the log of previously sent messages.
///
/// Every filter is optional; `QueryLog::default()` asks for the gateway's default page.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    long_sms: u32,
    columns: Vec<String>,
    start_date: Option<GatewayDate>,
    end_date: Option<GatewayDate>,
    start_index: u32,
    max_count: Option<u32>,
    message_ids: Vec<MessageId>,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Long-SMS mode of the log to query; `0` (the default) is not sent.
    pub fn long_sms(mut self, long_sms: u32) -> Self {
        self.long_sms = long_sms;
        self
    }

    /// Restrict the returned columns (the gateway echoes them in its `caption` line).
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn start_date(mut self, date: GatewayDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: GatewayDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Skip the first `index` log rows.
    pub fn start_index(mut self, index: u32) -> Self {
        self.start_index = index;
        self
    }

    /// Cap the number of returned rows. `0` and the protocol default are not sent.
    pub fn max_count(mut self, count: u32) -> Self {
        self.max_count = Some(count);
        self
    }

    /// Only return rows for these message ids.
    pub fn message_ids(mut self, ids: Vec<MessageId>) -> Self {
        self.message_ids = ids;
        self
    }

    pub fn long_sms_mode(&self) -> u32 {
        self.long_sms
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn start(&self) -> Option<&GatewayDate> {
        self.start_date.as_ref()
    }

    pub fn end(&self) -> Option<&GatewayDate> {
        self.end_date.as_ref()
    }

    pub fn index(&self) -> u32 {
        self.start_index
    }

    /// The `mcount` value to send, if any.
    pub fn effective_max_count(&self) -> Option<u32> {
        self.max_count
            .filter(|count| *count != 0 && *count != QUERY_LOG_DEFAULT_MAX_COUNT)
    }

    pub fn ids(&self) -> &[MessageId] {
        &self.message_ids
    }
}

/// Cancel scheduled (reserved) messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveDelete {
    /// Cancel the listed reservations.
    Ids(Vec<MessageId>),
    /// Cancel **every** pending reservation on the account.
    All,
}

impl ReserveDelete {
    /// Form field name used by the gateway (`msgid`).
    pub const FIELD: &'static str = "msgid";

    /// Wire value selecting every reservation.
    pub const ALL: &'static str = "all";

    /// Cancel specific reservations. An empty list is rejected; use [`ReserveDelete::all`]
    /// to cancel everything.
    pub fn ids(ids: Vec<MessageId>) -> Result<Self, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::Empty {
                field: ReserveDelete::FIELD,
            });
        }
        Ok(Self::Ids(ids))
    }

    /// Cancel every pending reservation on the account.
    pub fn all() -> Self {
        Self::All
    }
}
