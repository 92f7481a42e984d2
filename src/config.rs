use std::env::var;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

use crate::application::usecases::list_open_messages::DEFAULT_MAX_PAGE_SIZE;

pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub store_timeout: Duration,
    pub jwt_secret: String,
    pub jwt_expiration: Duration,
    pub max_page_size: u32,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();

        Ok(Config {
            port: var("PORT")
                .map_err(|_| "An error occured while getting PORT env param")?
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            scheme: var("SCHEME").map_err(|_| "An error occured while getting SCHEME env param")?,
            host: var("HOST").map_err(|_| "An error occured while getting HOST env param")?,
            database_url: var("DATABASE_URL")
                .map_err(|_| "An error occured while getting DATABASE_URL env param")?,
            database_max_connections: optional("DATABASE_MAX_CONNECTIONS", 5).map_err(|_| {
                "An error occured while parsing DATABASE_MAX_CONNECTIONS env param"
            })?,
            store_timeout: Duration::from_millis(
                optional("STORE_TIMEOUT_MS", 5_000)
                    .map_err(|_| "An error occured while parsing STORE_TIMEOUT_MS env param")?,
            ),
            jwt_secret: var("JWT_SECRET")
                .map_err(|_| "An error occured while getting JWT_SECRET env param")?,
            jwt_expiration: Duration::from_secs(
                optional("JWT_EXPIRATION_SECS", 3_600)
                    .map_err(|_| "An error occured while parsing JWT_EXPIRATION_SECS env param")?,
            ),
            max_page_size: optional("MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE)
                .map_err(|_| "An error occured while parsing MAX_PAGE_SIZE env param")?
                .max(1),
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

fn optional<T: FromStr>(name: &str, default: T) -> Result<T, T::Err> {
    match var(name) {
        Ok(value) => value.parse(),
        Err(_) => Ok(default),
    }
}
