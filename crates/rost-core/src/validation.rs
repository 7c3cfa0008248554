//! # Validation Module
//!
//! Input validation utilities for the storefront API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum extractors)                                       │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Missing/garbled bodies rejected before handlers run               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_SPECIFIC_IDS, MIN_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Search Query
// =============================================================================

/// Validates and normalizes a catalog search query.
///
/// ## Rules
/// - Trimmed before anything else
/// - Queries shorter than [`MIN_SEARCH_QUERY_LEN`] characters are rejected;
///   the search route turns that rejection into an empty result list rather
///   than an error, matching the storefront contract
///
/// ## Example
/// ```rust
/// use rost_core::validation::validate_search_query;
///
/// assert_eq!(validate_search_query("  bosch ").unwrap(), "bosch");
/// assert!(validate_search_query("a").is_err());
/// assert!(validate_search_query("").is_err());
/// ```
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() < MIN_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooShort {
            field: "q".to_string(),
            min: MIN_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Product Code
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use rost_core::validation::validate_product_code;
///
/// assert!(validate_product_code("ROST-1001").is_ok());
/// assert!(validate_product_code("").is_err());
/// assert!(validate_product_code("bad code!").is_err());
/// ```
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Ids
// =============================================================================

/// Validates an entity id.
///
/// Every database id in the system is a UUID v4, so anything that does not
/// parse as a UUID can be rejected before a query runs.
///
/// ## Example
/// ```rust
/// use rost_core::validation::validate_id;
///
/// assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_id("not-a-uuid").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates the id list accepted by `POST /api/products/specific`.
///
/// ## Rules
/// - Must not be empty
/// - Must have at most [`MAX_SPECIFIC_IDS`] entries
/// - Every entry must pass [`validate_id`]
pub fn validate_id_list(ids: &[String]) -> ValidationResult<()> {
    if ids.is_empty() {
        return Err(ValidationError::Required {
            field: "ids".to_string(),
        });
    }

    if ids.len() > MAX_SPECIFIC_IDS {
        return Err(ValidationError::TooMany {
            field: "ids".to_string(),
            max: MAX_SPECIFIC_IDS,
        });
    }

    for id in ids {
        validate_id(id)?;
    }

    Ok(())
}

// =============================================================================
// Email
// =============================================================================

/// Validates a customer email address.
///
/// Deliberately shallow: one `@` with something on both sides. Full RFC
/// validation belongs to the mail system, not the storefront.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected local@domain.tld".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_minimum_length() {
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("a").is_err());
        assert!(validate_search_query(" a ").is_err());
        assert_eq!(validate_search_query("ab").unwrap(), "ab");
        assert_eq!(validate_search_query("  bormasina  ").unwrap(), "bormasina");
    }

    #[test]
    fn test_product_code() {
        assert!(validate_product_code("ROST-1001").is_ok());
        assert!(validate_product_code("abc_123").is_ok());
        assert!(validate_product_code("").is_err());
        assert!(validate_product_code("   ").is_err());
        assert!(validate_product_code(&"X".repeat(51)).is_err());
        assert!(validate_product_code("no spaces").is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_id(&uuid::Uuid::new_v4().to_string()).is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("   ").is_err());
        assert!(validate_id("not-a-uuid").is_err());
        assert!(validate_id("550e8400-e29b-41d4-a716").is_err());
    }

    #[test]
    fn test_id_list() {
        let id = || uuid::Uuid::new_v4().to_string();

        assert!(validate_id_list(&[id()]).is_ok());
        assert!(validate_id_list(&[]).is_err());
        assert!(validate_id_list(&[id(), " ".to_string()]).is_err());
        assert!(validate_id_list(&[id(), "missing-id".to_string()]).is_err());

        let too_many: Vec<String> = (0..101).map(|_| id()).collect();
        assert!(validate_id_list(&too_many).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("client@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }
}
