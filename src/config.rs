// src/config.rs
use std::net::IpAddr;

use http::HeaderValue;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

/// Physical table names for every collection the API touches.
#[derive(Debug, Clone)]
pub struct TableNames {
    pub contact: String,
    pub dealer: String,
    pub product: String,
    pub product_survey: String,
    pub media_queries: String,
    pub admin: String,
    pub business_orders: String,
    pub vendor_product: String,
}

#[derive(Debug, Clone)]
pub struct Buckets {
    pub products: String,
    pub vendor_products: String,
}

#[derive(Debug, Clone)]
pub struct SuperAdmin {
    pub username: String,
    pub password: String,
}

/// Process-wide configuration, read once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub jwt_secret: String,
    pub super_admin: Option<SuperAdmin>,
    pub aws_region: Option<String>,
    pub backend: StoreBackend,
    pub cors_origin: HeaderValue,
    pub max_image_bytes: usize,
    pub tables: TableNames,
    pub buckets: Buckets,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let host = match lookup("HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "HOST", value: raw })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: DEFAULT_HOST.to_string(),
            })?,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let max_image_bytes = match lookup("MAX_IMAGE_BYTES") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "MAX_IMAGE_BYTES", value: raw })?,
            None => DEFAULT_MAX_IMAGE_BYTES,
        };

        let backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("dynamodb") => StoreBackend::DynamoDb,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let cors_origin = match lookup("CORS_ORIGIN") {
            Some(raw) => HeaderValue::from_str(&raw)
                .map_err(|_| ConfigError::Invalid { name: "CORS_ORIGIN", value: raw })?,
            None => HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
        };

        // Both halves or neither
        let super_admin = match (lookup("SUPER_ADMIN_USERNAME"), lookup("SUPER_ADMIN_PASSWORD")) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(SuperAdmin { username, password })
            }
            _ => None,
        };

        Ok(Self {
            host,
            port,
            jwt_secret: required("JWT_SECRET")?,
            super_admin,
            aws_region: lookup("AWS_REGION"),
            backend,
            cors_origin,
            max_image_bytes,
            tables: TableNames {
                contact: required("DYNAMODB_CONTACT_TABLE")?,
                dealer: required("DYNAMODB_DEALER_TABLE")?,
                product: required("DYNAMODB_PRODUCT_TABLE")?,
                product_survey: required("DYNAMODB_PRODUCT_SURVEY_TABLE")?,
                media_queries: required("DYNAMODB_MEDIA_QUERIES_TABLE")?,
                admin: required("DYNAMODB_ADMIN_TABLE")?,
                business_orders: required("DYNAMODB_BUSINESS_ORDERS_TABLE")?,
                vendor_product: required("DYNAMODB_VENDOR_PRODUCT_TABLE")?,
            },
            buckets: Buckets {
                products: required("S3_BUCKET_NAME")?,
                vendor_products: required("S3_VENDOR_BUCKET_NAME")?,
            },
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        host: DEFAULT_HOST.parse().unwrap(),
        port: DEFAULT_PORT,
        jwt_secret: "test-secret".to_string(),
        super_admin: Some(SuperAdmin {
            username: "root".to_string(),
            password: "root-pass".to_string(),
        }),
        aws_region: Some("us-east-1".to_string()),
        backend: StoreBackend::Memory,
        cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
        max_image_bytes: 1024,
        tables: TableNames {
            contact: "contacts".to_string(),
            dealer: "dealers".to_string(),
            product: "products".to_string(),
            product_survey: "surveys".to_string(),
            media_queries: "media".to_string(),
            admin: "admins".to_string(),
            business_orders: "orders".to_string(),
            vendor_product: "vendor-products".to_string(),
        },
        buckets: Buckets {
            products: "product-images".to_string(),
            vendor_products: "vendor-images".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("JWT_SECRET", "s3cret"),
            ("DYNAMODB_CONTACT_TABLE", "contact"),
            ("DYNAMODB_DEALER_TABLE", "dealer"),
            ("DYNAMODB_PRODUCT_TABLE", "product"),
            ("DYNAMODB_PRODUCT_SURVEY_TABLE", "survey"),
            ("DYNAMODB_MEDIA_QUERIES_TABLE", "media"),
            ("DYNAMODB_ADMIN_TABLE", "admin"),
            ("DYNAMODB_BUSINESS_ORDERS_TABLE", "orders"),
            ("DYNAMODB_VENDOR_PRODUCT_TABLE", "vendor"),
            ("S3_BUCKET_NAME", "images"),
            ("S3_VENDOR_BUCKET_NAME", "vendor-images"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_apply_when_optional_vars_absent() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.port, 5001);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.backend, StoreBackend::DynamoDb);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
        assert!(config.super_admin.is_none());
        assert_eq!(config.tables.vendor_product, "vendor");
    }

    #[test]
    fn missing_table_is_reported_by_name() {
        let mut env = base_env();
        env.remove("DYNAMODB_VENDOR_PRODUCT_TABLE");
        let err = load(&env).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DYNAMODB_VENDOR_PRODUCT_TABLE"));
    }

    #[test]
    fn super_admin_needs_both_halves() {
        let mut env = base_env();
        env.insert("SUPER_ADMIN_USERNAME", "boss");
        assert!(load(&env).unwrap().super_admin.is_none());

        env.insert("SUPER_ADMIN_PASSWORD", "hunter2");
        let admin = load(&env).unwrap().super_admin.unwrap();
        assert_eq!(admin.username, "boss");
    }

    #[test]
    fn rejects_unknown_backend_and_bad_port() {
        let mut env = base_env();
        env.insert("STORE_BACKEND", "postgres");
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { name: "STORE_BACKEND", .. })
        ));

        let mut env = base_env();
        env.insert("PORT", "http");
        assert!(matches!(load(&env), Err(ConfigError::Invalid { name: "PORT", .. })));
    }
}
