use crate::claims::StandardClaims;
use crate::error::{Error, Result};

/// Check the temporal claims against `now` (seconds since Unix epoch)
///
/// Not-before is checked first, then expiration. A token is already invalid
/// at its exact expiration second. Without `exp` the token never expires.
pub fn check_time(claims: &impl StandardClaims, now: i64) -> Result<()> {
    if let Some(nbf) = claims.not_before() {
        if now < nbf {
            return Err(Error::NotYetValid {
                not_before: nbf,
                now,
            });
        }
    }

    if let Some(exp) = claims.expiration() {
        if now >= exp {
            return Err(Error::Expired {
                expired_at: exp,
                now,
            });
        }
    }

    Ok(())
}
