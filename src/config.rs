use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub registration: RegistrationMode,
    pub token_ttl_minutes: i64,
    pub db_max_connections: u32,
    pub log_level: String,
    pub admin: Option<AdminSeed>,
}

/// Credentials for the admin account created on first start.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Whether patients may sign themselves up.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationMode {
    Open,
    Closed,
}

impl std::str::FromStr for RegistrationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(RegistrationMode::Open),
            "closed" => Ok(RegistrationMode::Closed),
            other => Err(format!("Invalid CLINIC_REGISTRATION: {other}")),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("CLINIC_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CLINIC_HOST: {e}"))?;

        let port: u16 = env_or("CLINIC_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid CLINIC_PORT: {e}"))?;

        let registration: RegistrationMode = env_or("CLINIC_REGISTRATION", "open").parse()?;

        let token_ttl_minutes: i64 = env_or("CLINIC_TOKEN_TTL_MINUTES", "15")
            .parse()
            .map_err(|e| format!("Invalid CLINIC_TOKEN_TTL_MINUTES: {e}"))?;

        let db_max_connections: u32 = env_or("CLINIC_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid CLINIC_DB_MAX_CONNECTIONS: {e}"))?;

        let log_level = env_or("CLINIC_LOG_LEVEL", "info");

        let admin = match (
            std::env::var("CLINIC_ADMIN_EMAIL").ok(),
            std::env::var("CLINIC_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email,
                password,
                first_name: env_or("CLINIC_ADMIN_FIRST_NAME", "Clinic"),
                last_name: env_or("CLINIC_ADMIN_LAST_NAME", "Administrator"),
            }),
            (None, None) => None,
            _ => {
                return Err(
                    "CLINIC_ADMIN_EMAIL and CLINIC_ADMIN_PASSWORD must be set together".to_string(),
                );
            }
        };

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            registration,
            token_ttl_minutes,
            db_max_connections,
            log_level,
            admin,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
