//! Cookie-backed [`KeyValueStore`].
//!
//! Each key lives in its own long-lived cookie named `oak_kv_<key>`. Values
//! are percent-encoded so arbitrary strings (JSON included) survive the
//! cookie grammar. Writes are buffered and turned into `Set-Cookie` headers
//! on the response.

use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use oakline_core::{KeyValueStore, StorageError};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

/// Prefix of every storage cookie.
pub const COOKIE_PREFIX: &str = "oak_kv_";

/// Storage cookies outlive the session cookie.
const COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Browsers commonly cap a single cookie at 4096 bytes.
const MAX_COOKIE_VALUE_BYTES: usize = 3800;

/// A buffered change to send back to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingCookie {
    Set { key: String, encoded: String },
    Remove { key: String },
}

impl PendingCookie {
    fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => key,
        }
    }
}

/// Key-value storage over the request's cookies.
#[derive(Debug, Clone, Default)]
pub struct CookieStorage {
    /// Raw (still encoded) values keyed without the prefix.
    values: HashMap<String, String>,
    pending: Vec<PendingCookie>,
    secure: bool,
}

impl CookieStorage {
    /// Read storage cookies from request headers.
    ///
    /// Malformed cookie pairs are skipped.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        let mut values = HashMap::new();

        for header in headers.get_all(COOKIE) {
            let Ok(header) = header.to_str() else {
                continue;
            };
            for cookie in Cookie::split_parse(header).flatten() {
                if let Some(key) = cookie.name().strip_prefix(COOKIE_PREFIX) {
                    values.insert(key.to_string(), cookie.value().to_string());
                }
            }
        }

        Self {
            values,
            pending: Vec::new(),
            secure,
        }
    }

    /// `Set-Cookie` header values for every buffered write, in write order.
    ///
    /// Only the last write per key is emitted.
    #[must_use]
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        let mut last_per_key: Vec<&PendingCookie> = Vec::new();
        for change in self.pending.iter().rev() {
            if !last_per_key.iter().any(|c| c.key() == change.key()) {
                last_per_key.push(change);
            }
        }
        last_per_key.reverse();

        last_per_key
            .into_iter()
            .filter_map(|change| {
                let cookie = match change {
                    PendingCookie::Set { key, encoded } => {
                        self.build_cookie(key, encoded.clone(), Duration::days(COOKIE_MAX_AGE_DAYS))
                    }
                    PendingCookie::Remove { key } => {
                        self.build_cookie(key, String::new(), Duration::ZERO)
                    }
                };
                HeaderValue::from_str(&cookie.to_string())
                    .map_err(|e| tracing::warn!(error = %e, "Dropping unencodable storage cookie"))
                    .ok()
            })
            .collect()
    }

    fn build_cookie(&self, key: &str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build((format!("{COOKIE_PREFIX}{key}"), value))
            .path("/")
            .max_age(max_age)
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(self.secure)
            .build()
    }
}

impl KeyValueStore for CookieStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(raw) = self.values.get(key) else {
            return Ok(None);
        };

        urlencoding::decode(raw)
            .map(|value| Some(value.into_owned()))
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let encoded = urlencoding::encode(&value).into_owned();
        if encoded.len() > MAX_COOKIE_VALUE_BYTES {
            return Err(StorageError::Unavailable(format!(
                "value for {key} is {} bytes, cookie limit is {MAX_COOKIE_VALUE_BYTES}",
                encoded.len()
            )));
        }

        self.values.insert(key.to_string(), encoded.clone());
        self.pending.push(PendingCookie::Set {
            key: key.to_string(),
            encoded,
        });
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        self.pending.push(PendingCookie::Remove {
            key: key.to_string(),
        });
        Ok(())
    }
}
