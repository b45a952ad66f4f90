/// Dispatch-layer configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Host identifier recorded as a metric dimension value
    /// (default: `localhost`).
    pub host_name: String,
}

impl DispatchConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var    | Default     |
    /// |------------|-------------|
    /// | `HOSTNAME` | `localhost` |
    pub fn from_env() -> Self {
        let host_name = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".into());
        Self { host_name }
    }
}
