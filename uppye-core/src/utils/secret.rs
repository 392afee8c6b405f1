//! Secure secret handling using the secrecy crate with partial masking
//!
//! `MaskedSecret` wraps the JWT signing secrets and stored password
//! hashes so that:
//! - secrets are zeroized on drop
//! - Debug/Display output shows a masked value (e.g., "****1234")
//! - access to the full value requires an explicit `.expose_secret()`

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A secret string that provides memory protection via the secrecy crate
/// while showing partial masking in Debug output for usability.
///
/// # Example
/// ```
/// use uppye_core::utils::secret::MaskedSecret;
///
/// let secret = MaskedSecret::new("super-secret-password-123".to_string());
///
/// // Debug shows masked value (preserves dashes)
/// assert_eq!(format!("{:?}", secret), "\"*****-******-********-123\"");
///
/// // Explicit access required
/// assert_eq!(secret.expose_secret(), "super-secret-password-123");
/// ```
#[derive(Clone)]
pub struct MaskedSecret(SecretString);

impl MaskedSecret {
    /// Create a new masked secret from a String
    pub fn new(value: String) -> Self {
        Self(SecretString::new(value.into_boxed_str()))
    }

    /// Create a new masked secret from a string slice
    pub fn from_str(s: &str) -> Self {
        Self::new(s.to_string())
    }

    /// Expose the secret value - this should only be called where absolutely
    /// necessary (e.g., signing a token, verifying a password hash)
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Mask a secret, keeping a short visible suffix and any dashes.
fn mask_value(value: &str) -> String {
    let value_len = value.len();
    let visible_suffix_len = if value_len >= 12 { 4 } else { 2.min(value_len) };

    let mut masked = String::with_capacity(value_len);
    let prefix_len = value_len.saturating_sub(visible_suffix_len);

    for (i, c) in value.chars().enumerate() {
        if i < prefix_len {
            masked.push(if c == '-' { '-' } else { '*' });
        } else {
            masked.push(c);
        }
    }

    masked
}

impl std::fmt::Debug for MaskedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked = mask_value(self.0.expose_secret());
        write!(f, "\"{}\"", masked)
    }
}

impl std::fmt::Display for MaskedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked = mask_value(self.0.expose_secret());
        write!(f, "{}", masked)
    }
}

impl Serialize for MaskedSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.expose_secret().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MaskedSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(MaskedSecret::new(value))
    }
}

impl PartialEq for MaskedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for MaskedSecret {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_secret_debug_shows_partial() {
        let secret = MaskedSecret::new("refresh-signing-secret-123".to_string());
        let debug_output = format!("{:?}", secret);

        // Should contain asterisks
        assert!(debug_output.contains("***"));

        // Should show last 4 chars (value is >= 12 chars)
        assert!(debug_output.ends_with("123\""));

        // Should NOT show full value
        assert!(!debug_output.contains("refresh-signing-secret"));
    }

    #[test]
    fn test_masked_secret_display_shows_partial() {
        let secret = MaskedSecret::new("api-key-12345".to_string());
        let display_output = format!("{}", secret);

        assert!(display_output.contains("***"));
        assert!(display_output.ends_with("345"));
    }

    #[test]
    fn test_masked_secret_expose_gives_full_value() {
        let secret = MaskedSecret::new("my-secret".to_string());
        assert_eq!(secret.expose_secret(), "my-secret");
    }

    #[test]
    fn test_masked_secret_short_value() {
        let secret = MaskedSecret::new("pass".to_string());
        let debug_output = format!("{:?}", secret);

        // Short values (< 12 chars) show last 2 chars
        assert!(debug_output.contains("**ss"));
    }

    #[test]
    fn test_masked_secret_serialization() {
        let secret = MaskedSecret::new("password123".to_string());
        let yaml = serde_norway::to_string(&secret).unwrap();

        // Serializes the full value
        assert_eq!(yaml.trim(), "password123");
    }

    #[test]
    fn test_masked_secret_deserialization() {
        let yaml = "my-password";
        let secret: MaskedSecret = serde_norway::from_str(yaml).unwrap();
        assert_eq!(secret.expose_secret(), "my-password");
    }

    #[test]
    fn test_masked_secret_equality() {
        let a = MaskedSecret::from_str("same-value");
        let b = MaskedSecret::from_str("same-value");
        let c = MaskedSecret::from_str("other-value");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
