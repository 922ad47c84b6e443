// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for identifiers and log filters)
pub const APP_NAME_LOWER: &str = "tracelift";

// =============================================================================
// Environment Variables - Credentials
// =============================================================================

/// Environment variable for the Langfuse public key
pub const ENV_PUBLIC_KEY: &str = "LANGFUSE_PUBLIC_KEY";

/// Environment variable for the Langfuse secret key
pub const ENV_SECRET_KEY: &str = "LANGFUSE_SECRET_KEY";

/// Environment variable for the Langfuse host
pub const ENV_HOST: &str = "LANGFUSE_HOST";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "TRACELIFT_LOG";

// =============================================================================
// Ingestion
// =============================================================================

/// Default Langfuse host
pub const DEFAULT_HOST: &str = "https://us.cloud.langfuse.com";

/// Ingestion endpoint path
pub const INGESTION_PATH: &str = "/api/public/ingestion";

/// Ingestion request timeout in seconds
pub const INGESTION_TIMEOUT_SECS: u64 = 30;

/// HTTP statuses the ingestion API returns on success (207 = partial success)
pub const INGESTION_SUCCESS_STATUSES: [u16; 3] = [200, 201, 207];

/// Response body preview length for logs and errors
pub const RESPONSE_PREVIEW_LEN: usize = 500;

// =============================================================================
// Batch Metadata
// =============================================================================

/// Integration tag reported in batch metadata
pub const SDK_INTEGRATION: &str = "trace_importer";

/// SDK name reported in batch metadata
pub const SDK_NAME: &str = "rust";

// =============================================================================
// Trace Assembly
// =============================================================================

/// Trace display name when the root observation has none
pub const DEFAULT_TRACE_NAME: &str = "Imported Trace";

/// Identifier prefix length used in defaulted observation names
pub const ID_PREFIX_LEN: usize = 8;
