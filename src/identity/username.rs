//! Username derivation and normalization rules.

// self
use crate::{api::UserProfile, error::IdentityError};

/// Derives the username from a profile payload using the configured field key.
///
/// The value is lowercased and, when `strip_email_domain` is configured, the matching
/// `@domain` suffix is removed: `user@example.edu` becomes `user` while `user@gmail.com`
/// keeps its full address form.
pub fn derive_username(
	profile: &UserProfile,
	username_key: &str,
	strip_email_domain: Option<&str>,
) -> Result<String, IdentityError> {
	let raw = profile
		.field_str(username_key)
		.ok_or_else(|| IdentityError::MissingUsernameField { key: username_key.into() })?;

	if raw.is_empty() {
		return Err(IdentityError::EmptyUsername { key: username_key.into() });
	}

	Ok(normalize_username(&raw, strip_email_domain))
}

/// Lowercases a username and strips exactly the configured email domain suffix.
pub fn normalize_username(raw: &str, strip_email_domain: Option<&str>) -> String {
	let username = raw.to_lowercase();
	let Some(domain) = strip_email_domain else { return username };
	let suffix = format!("@{}", domain.to_lowercase());

	match username.strip_suffix(&suffix) {
		Some(local) if !local.is_empty() => local.to_owned(),
		_ => username,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn normalization_lowercases_and_strips_the_configured_domain() {
		assert_eq!(normalize_username("Yuvi@Berkeley.EDU", Some("berkeley.edu")), "yuvi");
		assert_eq!(normalize_username("yuvi@berkeley.edu", None), "yuvi@berkeley.edu");
	}

	#[test]
	fn stripping_is_a_no_op_for_other_domains() {
		assert_eq!(normalize_username("yuvi@gmail.com", Some("berkeley.edu")), "yuvi@gmail.com");
		assert_eq!(
			normalize_username("yuvi@sub.berkeley.edu", Some("berkeley.edu")),
			"yuvi@sub.berkeley.edu",
		);
	}

	#[test]
	fn stripping_never_produces_an_empty_username() {
		assert_eq!(normalize_username("@berkeley.edu", Some("berkeley.edu")), "@berkeley.edu");
	}

	#[test]
	fn derivation_requires_the_configured_field() {
		let profile = UserProfile::default();
		let err = derive_username(&profile, "primary_email", None)
			.expect_err("Missing username field should fail derivation.");

		assert_eq!(err, IdentityError::MissingUsernameField { key: "primary_email".into() });
	}

	#[test]
	fn derivation_rejects_empty_values() {
		let profile: UserProfile = serde_json::from_str("{\"primary_email\":\"\"}")
			.expect("Profile fixture should deserialize successfully.");
		let err = derive_username(&profile, "primary_email", None)
			.expect_err("Empty username field should fail derivation.");

		assert_eq!(err, IdentityError::EmptyUsername { key: "primary_email".into() });
	}
}
