use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "9999".to_string())
                .parse()
                .unwrap_or(9999),
        }
    }
}
