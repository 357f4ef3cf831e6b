use std::env;

use crate::env_or;

/// bcrypt's own default work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            metrics_port: env_or("METRICS_PORT", 9000),
            bcrypt_cost: env_or("BCRYPT_COST", DEFAULT_BCRYPT_COST),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            metrics_port: 9000,
            bcrypt_cost: 4,
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8081");
    }
}
