//! Serde models for the Canvas payloads the adapter consumes.
//!
//! Canvas deployments differ in which profile and course fields they expose, and the
//! adapter's lookup keys are configurable, so every model keeps its raw fields alongside
//! the typed ones via `#[serde(flatten)]`.

// self
use crate::_prelude::*;

/// Raw user profile returned by the profile endpoint.
///
/// Kept as an opaque field mapping so `username_key` can address any field the deployment
/// exposes (`primary_email`, `login_id`, `sis_user_id`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile {
	/// Raw profile fields.
	pub fields: JsonMap<String, JsonValue>,
}
impl UserProfile {
	/// Returns a raw profile field.
	pub fn field(&self, key: &str) -> Option<&JsonValue> {
		self.fields.get(key)
	}

	/// Returns the string form of a profile field, when it renders as one.
	pub fn field_str(&self, key: &str) -> Option<String> {
		self.field(key).and_then(display_value)
	}

	/// Consumes the profile, yielding the raw field mapping.
	pub fn into_fields(self) -> JsonMap<String, JsonValue> {
		self.fields
	}
}

/// Course enrollment entry nested in a course listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
	/// Enrollment type (`student`, `teacher`, `ta`, ...), when reported.
	#[serde(default, rename = "type")]
	pub kind: Option<String>,
	/// Remaining enrollment fields.
	#[serde(flatten)]
	pub fields: JsonMap<String, JsonValue>,
}

/// Course entry returned by the courses listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Course {
	/// Enrollments the current user holds in the course.
	#[serde(default)]
	pub enrollments: Vec<Enrollment>,
	/// Remaining course fields, addressed through the configurable course key.
	#[serde(flatten)]
	pub fields: JsonMap<String, JsonValue>,
}
impl Course {
	/// Returns the string form of a course field, when it renders as one.
	pub fn field_str(&self, key: &str) -> Option<String> {
		self.fields.get(key).and_then(display_value)
	}

	/// Distinct enrollment types the user holds in this course.
	///
	/// There may be multiple (or even duplicate) enrollments per course; typeless entries
	/// contribute nothing.
	pub fn enrollment_types(&self) -> BTreeSet<String> {
		self.enrollments.iter().filter_map(|enrollment| enrollment.kind.clone()).collect()
	}
}

/// Group entry returned by the self-groups listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasGroup {
	/// Group display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Owning context (`Course` or `Account`).
	#[serde(default)]
	pub context_type: Option<String>,
	/// Remaining group fields, including the context id.
	#[serde(flatten)]
	pub fields: JsonMap<String, JsonValue>,
}
impl CanvasGroup {
	/// Lowercased owning context, when reported.
	pub fn context(&self) -> Option<String> {
		self.context_type.as_deref().map(str::to_lowercase)
	}

	/// Identifier of the owning context (`course_id`/`account_id`), defaulting to `0`.
	pub fn context_id(&self, context: &str) -> String {
		self.fields
			.get(&format!("{context}_id"))
			.and_then(display_value)
			.unwrap_or_else(|| "0".into())
	}
}

/// Renders scalar JSON values the way group and username terms expect.
pub(crate) fn display_value(value: &JsonValue) -> Option<String> {
	match value {
		JsonValue::String(text) => Some(text.clone()),
		JsonValue::Number(number) => Some(number.to_string()),
		JsonValue::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}
