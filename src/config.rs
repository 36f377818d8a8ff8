use clap::Args;

/// Settings for the HTTP server, parsed from flags or environment.
#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    #[clap(short, long, env = "ORGRAPH_PORT", default_value = "8000")]
    pub port: u16,
    #[clap(short, long, env = "ORGRAPH_DATABASE", default_value = "orgraph.db")]
    pub database: String,
    #[clap(long, env = "ORGRAPH_CORS_ORIGIN")]
    pub cors_origin: Option<String>,
    #[clap(flatten)]
    pub auth: AuthConfig,
}

/// Bearer token and password hashing settings.
#[derive(Args, Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens
    #[clap(long = "secret", env = "SECRET", hide_env_values = true)]
    pub secret: String,
    #[clap(long, env = "ORGRAPH_TOKEN_TTL_MINUTES", default_value_t = 30)]
    pub token_ttl_minutes: i64,
    #[clap(long, default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_minutes: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }
}
