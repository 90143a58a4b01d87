//! # Validation Module
//!
//! Input validation utilities for Bingo POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web frontend                                                 │
//! │  └── Immediate user feedback on the forms                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use url::Url;

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest price accepted for a product or cart line, in pesos.
pub const MAX_PRICE: i64 = 1_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a login username.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::required("username"));
    }

    if username.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a login password. Only presence is checked here.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - At least 3 characters after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use bingo_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Empanada").is_ok());
/// assert!(validate_product_name("Té").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    let len = name.chars().count();

    if len < 3 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 3,
        });
    }

    if len > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an optional product image URL.
///
/// ## Rules
/// - Missing or blank means "no image" and yields `None`
/// - Otherwise must be an absolute `http` or `https` URL
///
/// ## Example
/// ```rust
/// use bingo_core::validation::validate_image_url;
///
/// assert_eq!(validate_image_url(Some("")).unwrap(), None);
/// assert!(validate_image_url(Some("https://example.com/a.png")).unwrap().is_some());
/// assert!(validate_image_url(Some("not a url")).is_err());
/// ```
pub fn validate_image_url(image_url: Option<&str>) -> ValidationResult<Option<String>> {
    let raw = match image_url.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let parsed = Url::parse(raw).map_err(|e| ValidationError::InvalidFormat {
        field: "image_url".to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidFormat {
            field: "image_url".to_string(),
            reason: "must be an http or https URL".to_string(),
        });
    }

    Ok(Some(raw.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in pesos.
///
/// ## Rules
/// - 0 ..= MAX_PRICE (zero is allowed for giveaways)
///
/// ## Example
/// ```rust
/// use bingo_core::validation::validate_price;
///
/// assert!(validate_price(2500).is_ok());
/// assert!(validate_price(0).is_ok());
/// assert!(validate_price(-100).is_err());
/// ```
pub fn validate_price(pesos: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE).contains(&pesos) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}
