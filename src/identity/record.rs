//! Framework-facing identity record assembled after a successful login.

// self
use crate::{_prelude::*, api::model};

/// Identity record handed to the host framework after authentication.
///
/// Assembled once per successful login and never persisted by this crate; the host owns
/// user and group storage, and group membership refreshes only on the next login.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
	/// Normalized username.
	pub username: String,
	/// Raw profile attributes, preserved for the host's auth state.
	pub attributes: JsonMap<String, JsonValue>,
	/// Derived group names, sorted and deduplicated.
	pub groups: BTreeSet<String>,
}
impl IdentityRecord {
	/// Returns the string form of a profile attribute, when it renders as one.
	pub fn attribute_str(&self, key: &str) -> Option<String> {
		self.attributes.get(key).and_then(model::display_value)
	}

	/// Returns true when the record carries the provided group name.
	pub fn has_group(&self, name: &str) -> bool {
		self.groups.contains(name)
	}
}
