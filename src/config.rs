use anyhow::Result;

// ============================================================================
// Configuration Constants
// ============================================================================

const DEFAULT_PORT: u16 = 8080;

// Per-call deadline for backend RPCs. Uploads hold a stream open for the
// whole transfer, so they get a wider window.
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

// Avatar uploads only; anything larger is rejected before the backend
// stream is opened.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024; // 5 MB

const DEFAULT_AVATAR_BASE_URL: &str = "https://storage.e-lection.app/avatars";
const DEFAULT_AVATAR_FALLBACK_URL: &str = "https://storage.e-lection.app/avatars/default.png";

// ============================================================================
// Configuration Structures
// ============================================================================

/// Host/port pair for one backend service.
#[derive(Clone, Debug)]
pub struct BackendEndpoint {
    pub host: String,
    pub port: u16,
}

impl BackendEndpoint {
    fn from_env(host_var: &str, port_var: &str, default_port: u16) -> Result<Self> {
        Ok(Self {
            host: std::env::var(host_var).unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var(port_var)
                .ok()
                .map(|p| p.parse())
                .transpose()?
                .unwrap_or(default_port),
        })
    }

    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Gateway configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Port the HTTP surface binds to
    pub port: u16,
    /// Backend gRPC endpoints
    pub auth: BackendEndpoint,
    pub user: BackendEndpoint,
    pub election: BackendEndpoint,
    pub storage: BackendEndpoint,
    /// Per-call deadline for unary backend RPCs (seconds)
    pub backend_timeout_secs: u64,
    /// Deadline for the whole upload stream (seconds)
    pub upload_timeout_secs: u64,
    /// Maximum accepted multipart body size (bytes)
    pub max_upload_bytes: usize,
    /// Public base under which stored avatars are served
    pub avatar_base_url: String,
    /// Avatar URL handed out when the account has none
    pub avatar_fallback_url: String,
    /// Origins allowed to send credentialed requests
    pub allowed_origins: Vec<String>,
    /// Log filter (RUST_LOG syntax)
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            port: std::env::var("PORT")
                .ok()
                .map(|p| p.parse())
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            auth: BackendEndpoint::from_env("AUTH_SERVICE_HOST", "AUTH_SERVICE_PORT", 50051)?,
            user: BackendEndpoint::from_env("USER_SERVICE_HOST", "USER_SERVICE_PORT", 50052)?,
            election: BackendEndpoint::from_env(
                "ELECTION_SERVICE_HOST",
                "ELECTION_SERVICE_PORT",
                50053,
            )?,
            storage: BackendEndpoint::from_env(
                "STORAGE_SERVICE_HOST",
                "STORAGE_SERVICE_PORT",
                50054,
            )?,
            backend_timeout_secs: std::env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS),
            upload_timeout_secs: std::env::var("UPLOAD_TIMEOUT_SECS")
                .ok()
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            avatar_base_url: std::env::var("AVATAR_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AVATAR_BASE_URL.to_string()),
            avatar_fallback_url: std::env::var("AVATAR_FALLBACK_URL")
                .unwrap_or_else(|_| DEFAULT_AVATAR_FALLBACK_URL.to_string()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
