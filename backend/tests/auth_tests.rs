//! Authentication and authorization tests
//!
//! Property-based and unit tests for:
//! - Role gating (admin writes, employee reads)
//! - Credential validation
//! - Bilingual (English/Vietnamese) error messages

use proptest::prelude::*;

use shared::models::Role;
use shared::validation::{validate_email, validate_password};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate valid email addresses
fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z]{5,10}@[a-z]{3,8}\\.(com|org|net|vn)"
}

/// Generate valid passwords (8+ chars)
fn password_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!@#$%]{8,20}"
}

/// Generate roles
fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Admin), Just(Role::Employee)]
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Generated emails always pass validation
    #[test]
    fn test_email_format(email in email_strategy()) {
        prop_assert!(validate_email(&email).is_ok());
        prop_assert!(email.contains('@'));
    }

    /// Generated passwords always meet the minimum length
    #[test]
    fn test_password_strength(password in password_strategy()) {
        prop_assert!(validate_password(&password).is_ok());
        prop_assert!(password.len() >= 8);
    }

    /// Only the admin role may write
    #[test]
    fn test_write_access_matches_role(role in role_strategy()) {
        match role {
            Role::Admin => prop_assert!(role.can_write()),
            Role::Employee => prop_assert!(!role.can_write()),
        }
    }

    /// Role round-trips through its wire string
    #[test]
    fn test_role_string_round_trip(role in role_strategy()) {
        let parsed = role.as_str().parse::<Role>();
        prop_assert_eq!(parsed, Ok(role));
    }
}

// ============================================================================
// Unit Tests: Credential Validation
// ============================================================================

#[cfg(test)]
mod credential_tests {
    use super::*;

    #[test]
    fn test_invalid_emails_rejected() {
        let invalid = ["", "no-at-sign", "@nodomain", "user@"];
        for email in invalid {
            assert!(validate_email(email).is_err(), "{email:?} should be invalid");
        }
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(validate_password("short1").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_default_account_emails() {
        // Seeded accounts from the initial migration
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("employee@example.com").is_ok());
    }
}

// ============================================================================
// Unit Tests: Role Gating
// ============================================================================

#[cfg(test)]
mod role_gating_tests {
    use super::*;

    #[test]
    fn test_admin_can_write() {
        assert!(Role::Admin.can_write());
    }

    #[test]
    fn test_employee_is_read_only() {
        assert!(!Role::Employee.can_write());
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_wire_strings() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Employee.as_str(), "employee");
    }
}

// ============================================================================
// Unit Tests: Authentication Flow
// ============================================================================

#[cfg(test)]
mod auth_flow_tests {
    use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        sub: String,
        role: String,
        exp: i64,
        iat: i64,
    }

    /// Issuing and validating must share one configured secret: a token
    /// signed with the configured secret fails against any other key, so
    /// the validating side may not fall back to a different source.
    #[test]
    fn test_token_validates_only_with_issuing_secret() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            role: "admin".to_string(),
            exp: now + 3600,
            iat: now,
        };

        let configured_secret = "secret-from-config-file";
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(configured_secret.as_bytes()),
        )
        .unwrap();

        let same_key = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(configured_secret.as_bytes()),
            &Validation::default(),
        );
        assert!(same_key.is_ok());

        let other_key = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"development-secret-key"),
            &Validation::default(),
        );
        assert!(other_key.is_err());
    }

    #[test]
    fn test_jwt_claims_structure() {
        // JWT claims carry subject, role, and the two timestamps
        let required_fields = ["sub", "role", "exp", "iat"];
        assert_eq!(required_fields.len(), 4);
    }

    #[test]
    fn test_token_types() {
        let token_type = "Bearer";
        assert_eq!(token_type, "Bearer");
    }

    #[test]
    fn test_password_hash_not_stored_plain() {
        let password = "password123";
        // bcrypt hash always starts with $2
        let mock_hash = "$2b$12$...";
        assert!(mock_hash.starts_with("$2"), "Password should be bcrypt hashed");
        assert_ne!(password, mock_hash, "Password should not be stored in plain text");
    }

    #[test]
    fn test_refresh_token_format() {
        // Refresh tokens are issued as UUIDs and stored hashed
        let uuid_pattern = "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx";
        assert_eq!(uuid_pattern.len(), 36);
    }
}

// ============================================================================
// Unit Tests: Error Messages (English/Vietnamese)
// ============================================================================

#[cfg(test)]
mod error_message_tests {
    #[test]
    fn test_auth_errors_have_vietnamese_messages() {
        let error_types = [
            ("Invalid email or password", "Sai tài khoản hoặc mật khẩu"),
            ("Account is disabled", "Tài khoản đã bị vô hiệu hóa"),
            (
                "Invalid or expired refresh token",
                "Phiên làm việc không hợp lệ hoặc đã hết hạn",
            ),
            (
                "You do not have permission to perform this action",
                "Bạn không có quyền thực hiện thao tác này",
            ),
        ];

        for (en, vi) in error_types {
            assert!(!en.is_empty(), "English message should not be empty");
            assert!(!vi.is_empty(), "Vietnamese message should not be empty");
            assert!(en.is_ascii(), "English message should be plain ASCII");
        }
    }
}
