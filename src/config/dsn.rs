//! MySQL data source name parsing.
//!
//! Format: `[user[:password]@][net[(addr)]]/dbname[?param1=value1&paramN=valueN]`

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Errors raised while parsing a data source name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DsnError {
    /// No `/` separates the database name.
    #[error("invalid DSN: missing the slash separating the database name")]
    MissingSlash,

    /// Network address opened with `(` but never closed.
    #[error("invalid DSN: network address not terminated (missing closing brace)")]
    UnbalancedAddress,

    /// Query parameter without `=`.
    #[error("invalid DSN: parameter '{0}' is not of the form key=value")]
    InvalidParam(String),
}

/// Parsed data source name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dsn {
    pub user: String,
    pub password: Option<String>,
    pub net: String,
    pub addr: String,
    pub dbname: String,
    pub params: BTreeMap<String, String>,
}

impl Dsn {
    /// Parse a DSN. An empty string means no datastore is configured.
    pub fn parse(raw: &str) -> Result<Option<Self>, DsnError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let slash = raw.rfind('/').ok_or(DsnError::MissingSlash)?;
        let (head, tail) = (&raw[..slash], &raw[slash + 1..]);

        let mut dsn = Dsn::default();

        let location = match head.rfind('@') {
            Some(at) => {
                let credentials = &head[..at];
                match credentials.split_once(':') {
                    Some((user, password)) => {
                        dsn.user = user.to_string();
                        dsn.password = Some(password.to_string());
                    }
                    None => dsn.user = credentials.to_string(),
                }
                &head[at + 1..]
            }
            None => head,
        };

        match location.find('(') {
            Some(open) => {
                if !location.ends_with(')') {
                    return Err(DsnError::UnbalancedAddress);
                }
                dsn.net = location[..open].to_string();
                dsn.addr = location[open + 1..location.len() - 1].to_string();
            }
            None => dsn.net = location.to_string(),
        }

        let (dbname, query) = match tail.split_once('?') {
            Some((dbname, query)) => (dbname, Some(query)),
            None => (tail, None),
        };
        dsn.dbname = dbname.to_string();

        if let Some(query) = query {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| DsnError::InvalidParam(pair.to_string()))?;
                dsn.params.insert(key.to_string(), value.to_string());
            }
        }

        Ok(Some(dsn))
    }
}

/// Renders the DSN with the password masked.
impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.user.is_empty() || self.password.is_some() {
            write!(f, "{}", self.user)?;
            if self.password.is_some() {
                write!(f, ":***")?;
            }
            write!(f, "@")?;
        }
        write!(f, "{}", self.net)?;
        if !self.addr.is_empty() {
            write!(f, "({})", self.addr)?;
        }
        write!(f, "/{}", self.dbname)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}
