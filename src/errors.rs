use fractic_server_error::{define_client_error, define_internal_error};

// IO-related.
define_internal_error!(ReadError, "Error reading key '{key}'.", { key: &str });
define_internal_error!(WriteError, "Error writing key '{key}'.", { key: &str });

// Parsing-related.
define_client_error!(
    InvalidBillHistory,
    "Invalid bill history: {details}.",
    { details: &str }
);
define_client_error!(
    UnsupportedSchemaVersion,
    "Unsupported bill history schema version {version} (newest supported: {supported}).",
    { version: u32, supported: u32 }
);
define_client_error!(InvalidIsoDateTime, "Invalid ISO date-time: {date}.", { date: &str });
define_client_error!(InvalidConfig, "Invalid bill store configuration (invalid RON format).");
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });

// Splitting-related.
define_client_error!(
    InvalidReceipt,
    "Receipt '{receipt_id}' cannot be split: {details}.",
    { receipt_id: &str, details: &str }
);
