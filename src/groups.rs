//! Pure group-name derivation from Canvas course and group listings.
//!
//! Names follow the `::`-joined scheme the host's group management expects:
//!
//! ```text
//! course::{course_id}
//! course::{course_id}::enrollment_type::{enrollment_type}
//! {context_type}::{context_id}::group::{name}
//! ```
//!
//! Derivation is stateless: the same listings always yield the same names, and distinct
//! (course, enrollment-type) pairs never collide because every term is separated.

// self
use crate::{
	_prelude::*,
	api::{CanvasGroup, Course},
};

/// Separator joining the terms of a derived group name.
pub const GROUP_SEPARATOR: &str = "::";

/// Returns a group name assembled from the provided terms.
pub fn format_group<I, S>(terms: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut buf = String::new();

	for (idx, term) in terms.into_iter().enumerate() {
		if idx > 0 {
			buf.push_str(GROUP_SEPARATOR);
		}

		buf.push_str(term.as_ref());
	}

	buf
}

/// Derives group names for each course the user is enrolled in.
///
/// Courses missing the configured key are skipped. Output order follows the course
/// listing, with enrollment-type names sorted within each course.
pub fn groups_from_courses(courses: &[Course], course_key: &str) -> Vec<String> {
	let mut groups = Vec::new();

	for course in courses {
		let Some(course_id) = course.field_str(course_key) else { continue };

		groups.push(format_group(["course", course_id.as_str()]));

		for enrollment_type in course.enrollment_types() {
			groups.push(format_group([
				"course",
				course_id.as_str(),
				"enrollment_type",
				enrollment_type.as_str(),
			]));
		}
	}

	groups
}

/// Derives group names for each Canvas group the user is a member of.
///
/// The same group name may appear in multiple group sets; the set collapses duplicates.
/// Groups without a name or an owning context are skipped.
pub fn groups_from_canvas_groups(canvas_groups: &[CanvasGroup]) -> BTreeSet<String> {
	let mut groups = BTreeSet::new();

	for group in canvas_groups {
		let Some(name) = group.name.as_deref() else { continue };
		let Some(context) = group.context() else { continue };
		let context_id = group.context_id(&context);

		groups.insert(format_group([context.as_str(), context_id.as_str(), "group", name]));
	}

	groups
}
