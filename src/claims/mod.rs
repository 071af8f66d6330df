//! Decoded token claims
//!
//! `Claims` keeps the full payload object and a typed copy of the registered
//! claims from [RFC 7519 Section 4.1](https://datatracker.ietf.org/doc/html/rfc7519#section-4.1).
//! Application-defined claims stay in the object and can be read with
//! [`Claims::get`] or projected onto a custom struct with [`Claims::deserialize`].

mod validator;

pub use validator::check_time;

use crate::error::{Error, Result};
use miniserde::json::{self, Number, Object, Value};

/// The `StandardClaims` trait defines the registered JWT claims.
pub trait StandardClaims {
    /// Issuer (iss) - identifies the principal that issued the JWT
    fn issuer(&self) -> Option<&str>;
    /// Subject (sub) - identifies the principal that is the subject of the JWT
    fn subject(&self) -> Option<&str>;
    /// Audience (aud) - identifies the recipients that the JWT is intended for
    fn audience(&self) -> Option<&Audience>;
    /// Expiration Time (exp) - identifies the expiration time (seconds since Unix epoch)
    fn expiration(&self) -> Option<i64>;
    /// Not Before (nbf) - identifies the time before which the JWT MUST NOT be accepted
    fn not_before(&self) -> Option<i64>;
    /// Issued At (iat) - identifies the time at which the JWT was issued
    fn issued_at(&self) -> Option<i64>;
    /// JWT ID (jti) - provides a unique identifier for the JWT
    fn jwt_id(&self) -> Option<&str>;
}

/// The `aud` claim: a single recipient or an ordered list of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Iterate over every recipient in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Audience::Single(aud) => std::slice::from_ref(aud),
            Audience::Multiple(auds) => auds,
        };
        items.iter().map(String::as_str)
    }

    /// Whether `audience` is one of the recipients
    pub fn contains(&self, audience: &str) -> bool {
        self.iter().any(|aud| aud == audience)
    }
}

/// Claims decoded from a token payload
#[derive(Debug, Clone)]
pub struct Claims {
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<Audience>,
    expiration: Option<i64>,
    not_before: Option<i64>,
    issued_at: Option<i64>,
    jwt_id: Option<String>,
    object: Object,
}

impl Claims {
    /// Build claims from a decoded payload object
    ///
    /// Registered claims must carry their RFC 7519 types; `null` counts as
    /// absent. Fractional numeric dates round up to the next whole second and
    /// dates beyond the `i64` range saturate.
    pub fn from_object(object: Object) -> Result<Self> {
        Ok(Self {
            issuer: string_claim(&object, "iss")?,
            subject: string_claim(&object, "sub")?,
            audience: audience_claim(&object)?,
            expiration: numeric_date(&object, "exp")?,
            not_before: numeric_date(&object, "nbf")?,
            issued_at: numeric_date(&object, "iat")?,
            jwt_id: string_claim(&object, "jti")?,
            object,
        })
    }

    /// Look up any claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.object.get(name)
    }

    /// The full payload object
    pub fn as_object(&self) -> &Object {
        &self.object
    }

    pub fn into_object(self) -> Object {
        self.object
    }

    /// Serialize the payload back to JSON
    pub fn to_json(&self) -> String {
        json::to_string(&self.object)
    }

    /// Project the payload onto an application-defined claim type
    ///
    /// # Example
    /// ```ignore
    /// #[derive(miniserde::Deserialize)]
    /// struct Roles {
    ///     roles: Vec<String>,
    /// }
    ///
    /// let roles: Roles = claims.deserialize()?;
    /// ```
    pub fn deserialize<T>(&self) -> Result<T>
    where
        T: miniserde::Deserialize,
    {
        json::from_str(&self.to_json()).map_err(|e| Error::InvalidJson {
            part: 2,
            reason: e.to_string(),
        })
    }
}

impl StandardClaims for Claims {
    fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    fn audience(&self) -> Option<&Audience> {
        self.audience.as_ref()
    }

    fn expiration(&self) -> Option<i64> {
        self.expiration
    }

    fn not_before(&self) -> Option<i64> {
        self.not_before
    }

    fn issued_at(&self) -> Option<i64> {
        self.issued_at
    }

    fn jwt_id(&self) -> Option<&str> {
        self.jwt_id.as_deref()
    }
}

fn string_claim(object: &Object, claim: &'static str) -> Result<Option<String>> {
    match object.get(claim) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(Error::InvalidClaim {
            claim,
            expected: "string",
        }),
    }
}

fn audience_claim(object: &Object) -> Result<Option<Audience>> {
    const EXPECTED: Error = Error::InvalidClaim {
        claim: "aud",
        expected: "string or array of strings",
    };

    match object.get("aud") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(aud)) => Ok(Some(Audience::Single(aud.clone()))),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(aud) => Ok(aud.clone()),
                _ => Err(EXPECTED),
            })
            .collect::<Result<Vec<_>>>()
            .map(|auds| Some(Audience::Multiple(auds))),
        Some(_) => Err(EXPECTED),
    }
}

fn numeric_date(object: &Object, claim: &'static str) -> Result<Option<i64>> {
    let invalid = Error::InvalidClaim {
        claim,
        expected: "numeric date",
    };

    match object.get(claim) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => seconds(number).map(Some).ok_or(invalid),
        Some(_) => Err(invalid),
    }
}

fn seconds(number: &Number) -> Option<i64> {
    match number {
        Number::U64(n) => Some(i64::try_from(*n).unwrap_or(i64::MAX)),
        Number::I64(n) => Some(*n),
        Number::F64(n) if n.is_finite() => Some(n.ceil() as i64),
        Number::F64(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(payload: &str) -> Result<Claims> {
        Claims::from_object(json::from_str(payload).unwrap())
    }

    #[test]
    fn test_registered_claims() {
        let claims = claims(
            r#"{"iss":"https://issuer","sub":"123","aud":"app","exp":20,"nbf":5,"iat":4,"jti":"id-1"}"#,
        )
        .unwrap();

        assert_eq!(claims.issuer(), Some("https://issuer"));
        assert_eq!(claims.subject(), Some("123"));
        assert_eq!(claims.audience(), Some(&Audience::Single("app".into())));
        assert_eq!(claims.expiration(), Some(20));
        assert_eq!(claims.not_before(), Some(5));
        assert_eq!(claims.issued_at(), Some(4));
        assert_eq!(claims.jwt_id(), Some("id-1"));
    }

    #[test]
    fn test_absent_and_null_claims() {
        let claims = claims(r#"{"exp":null}"#).unwrap();

        assert_eq!(claims.issuer(), None);
        assert_eq!(claims.audience(), None);
        assert_eq!(claims.expiration(), None);
    }

    #[test]
    fn test_audience_array() {
        let claims = claims(r#"{"aud":["a","b"]}"#).unwrap();
        let aud = claims.audience().unwrap();

        assert_eq!(aud, &Audience::Multiple(vec!["a".into(), "b".into()]));
        assert_eq!(aud.iter().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(aud.contains("b"));
        assert!(!aud.contains("c"));
    }

    #[test]
    fn test_audience_with_non_string_member() {
        assert!(matches!(
            claims(r#"{"aud":["a",1]}"#),
            Err(Error::InvalidClaim { claim: "aud", .. })
        ));
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        assert!(matches!(
            claims(r#"{"exp":"tomorrow"}"#),
            Err(Error::InvalidClaim { claim: "exp", .. })
        ));
        assert!(matches!(
            claims(r#"{"sub":123}"#),
            Err(Error::InvalidClaim { claim: "sub", .. })
        ));
    }

    #[test]
    fn test_fractional_dates_round_up() {
        let claims = claims(r#"{"exp":10.2,"nbf":-1.5}"#).unwrap();

        assert_eq!(claims.expiration(), Some(11));
        assert_eq!(claims.not_before(), Some(-1));
    }

    #[test]
    fn test_out_of_range_dates_saturate() {
        let integer = claims(r#"{"exp":18446744073709551615}"#).unwrap();
        let float = claims(r#"{"exp":1.8e19}"#).unwrap();

        assert_eq!(integer.expiration(), Some(i64::MAX));
        assert_eq!(float.expiration(), Some(i64::MAX));
    }

    #[test]
    fn test_custom_claims() {
        #[derive(miniserde::Deserialize)]
        struct AppClaims {
            role: String,
            level: u8,
        }

        let claims = claims(r#"{"sub":"123","role":"admin","level":3}"#).unwrap();
        assert!(matches!(claims.get("role"), Some(Value::String(r)) if r == "admin"));

        let app: AppClaims = claims.deserialize().unwrap();
        assert_eq!(app.role, "admin");
        assert_eq!(app.level, 3);
    }

    #[test]
    fn test_custom_claims_type_mismatch() {
        #[derive(miniserde::Deserialize)]
        #[allow(dead_code)]
        struct AppClaims {
            level: u8,
        }

        let claims = claims(r#"{"level":"high"}"#).unwrap();
        assert!(matches!(
            claims.deserialize::<AppClaims>(),
            Err(Error::InvalidJson { part: 2, .. })
        ));
    }
}
