use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub sms_gateway_url: String,
    pub sms_gateway_token: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            sms_gateway_url: env::var("SMS_GATEWAY_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/messages".to_string()),
            sms_gateway_token: env::var("SMS_GATEWAY_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
        }
    }
}
