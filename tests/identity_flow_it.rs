// crates.io
use httpmock::prelude::*;
// self
use canvas_identity::{_preludet::*, identity::AccessToken};

const TOKEN: &str = "canvas-bearer-token";

const PROFILE_BODY: &str = r#"{
	"id": 12345,
	"name": "Yuvi Panda",
	"sortable_name": "Panda, Yuvi",
	"login_id": "yuvip",
	"primary_email": "Yuvi@Berkeley.EDU",
	"avatar_url": "https://canvas.example.edu/images/avatar.png"
}"#;
const COURSES_BODY: &str = r#"[
	{"id": 101, "course_code": "Math 98", "enrollments": [
		{"type": "student", "enrollment_state": "active"},
		{"type": "student"},
		{"type": "ta"}
	]},
	{"id": 202, "course_code": "Chem 1A", "enrollments": []}
]"#;
const GROUPS_BODY: &str = r#"[
	{"name": "mygroup1", "context_type": "Course", "course_id": 101},
	{"name": "staff", "context_type": "Account", "account_id": 7},
	{"context_type": "Course", "course_id": 9}
]"#;

fn bearer() -> String {
	format!("Bearer {TOKEN}")
}

async fn mock_endpoint<'a>(server: &'a MockServer, path: &str, body: &str) -> httpmock::Mock<'a> {
	let path = path.to_owned();
	let body = body.to_owned();

	server
		.mock_async(move |when, then| {
			when.method(GET).path(path).header("authorization", bearer());
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

#[tokio::test]
async fn authenticate_assembles_the_identity_record() {
	let server = MockServer::start_async().await;
	let profile = mock_endpoint(&server, "/api/v1/users/self/profile", PROFILE_BODY).await;
	let courses = mock_endpoint(&server, "/api/v1/courses", COURSES_BODY).await;
	let groups = mock_endpoint(&server, "/api/v1/users/self/groups", GROUPS_BODY).await;
	let config = test_config(&server.base_url())
		.strip_email_domain("berkeley.edu")
		.build()
		.expect("Test config should be considered valid.");
	let adapter = build_reqwest_test_adapter(config);
	let record = adapter
		.authenticate(&AccessToken::new(TOKEN))
		.await
		.expect("Authentication against healthy mocks should succeed.");

	assert_eq!(record.username, "yuvi");
	assert_eq!(record.attribute_str("login_id").as_deref(), Some("yuvip"));
	assert_eq!(record.attribute_str("primary_email").as_deref(), Some("Yuvi@Berkeley.EDU"));

	let expected_groups = [
		"account::7::group::staff",
		"course::101",
		"course::101::enrollment_type::student",
		"course::101::enrollment_type::ta",
		"course::101::group::mygroup1",
		"course::202",
	];

	assert_eq!(record.groups.iter().map(String::as_str).collect::<Vec<_>>(), expected_groups);

	profile.assert_calls_async(1).await;
	courses.assert_calls_async(1).await;
	groups.assert_calls_async(1).await;
}

#[tokio::test]
async fn domain_stripping_is_a_no_op_for_other_domains() {
	let server = MockServer::start_async().await;
	let _profile = mock_endpoint(
		&server,
		"/api/v1/users/self/profile",
		r#"{"primary_email": "someone@gmail.com"}"#,
	)
	.await;
	let config = test_config(&server.base_url())
		.strip_email_domain("berkeley.edu")
		.manage_groups(false)
		.build()
		.expect("Test config should be considered valid.");
	let adapter = build_reqwest_test_adapter(config);
	let record = adapter
		.authenticate(&AccessToken::new(TOKEN))
		.await
		.expect("Authentication should succeed for other email domains.");

	assert_eq!(record.username, "someone@gmail.com");
}

#[tokio::test]
async fn profile_failure_surfaces_the_upstream_status() {
	let server = MockServer::start_async().await;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/users/self/profile");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"errors": [{"message": "Invalid access token."}]}"#);
		})
		.await;
	let courses = mock_endpoint(&server, "/api/v1/courses", COURSES_BODY).await;
	let config =
		test_config(&server.base_url()).build().expect("Test config should be considered valid.");
	let adapter = build_reqwest_test_adapter(config);
	let err = adapter
		.authenticate(&AccessToken::new(TOKEN))
		.await
		.expect_err("A rejected profile fetch should fail authentication.");

	assert_eq!(err.upstream_status(), Some(401));

	profile.assert_calls_async(1).await;
	courses.assert_calls_async(0).await;
}

#[tokio::test]
async fn course_failure_aborts_before_the_group_fetch() {
	let server = MockServer::start_async().await;
	let _profile = mock_endpoint(&server, "/api/v1/users/self/profile", PROFILE_BODY).await;
	let _courses = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v1/courses");
			then.status(500).body("Internal Server Error");
		})
		.await;
	let groups = mock_endpoint(&server, "/api/v1/users/self/groups", GROUPS_BODY).await;
	let config =
		test_config(&server.base_url()).build().expect("Test config should be considered valid.");
	let adapter = build_reqwest_test_adapter(config);
	let err = adapter
		.authenticate(&AccessToken::new(TOKEN))
		.await
		.expect_err("A failing course fetch should fail authentication.");

	assert_eq!(err.upstream_status(), Some(500));

	groups.assert_calls_async(0).await;
}

#[tokio::test]
async fn disabling_manage_groups_skips_membership_fetches() {
	let server = MockServer::start_async().await;
	let _profile = mock_endpoint(&server, "/api/v1/users/self/profile", PROFILE_BODY).await;
	let courses = mock_endpoint(&server, "/api/v1/courses", COURSES_BODY).await;
	let groups = mock_endpoint(&server, "/api/v1/users/self/groups", GROUPS_BODY).await;
	let config = test_config(&server.base_url())
		.manage_groups(false)
		.build()
		.expect("Test config should be considered valid.");
	let adapter = build_reqwest_test_adapter(config);
	let record = adapter
		.authenticate(&AccessToken::new(TOKEN))
		.await
		.expect("Authentication without group management should succeed.");

	assert!(record.groups.is_empty());

	courses.assert_calls_async(0).await;
	groups.assert_calls_async(0).await;
}

#[tokio::test]
async fn missing_username_field_fails_authentication() {
	let server = MockServer::start_async().await;
	let _profile = mock_endpoint(&server, "/api/v1/users/self/profile", PROFILE_BODY).await;
	let config = test_config(&server.base_url())
		.username_key("sis_user_id")
		.manage_groups(false)
		.build()
		.expect("Test config should be considered valid.");
	let adapter = build_reqwest_test_adapter(config);
	let err = adapter
		.authenticate(&AccessToken::new(TOKEN))
		.await
		.expect_err("A profile without the configured username field should fail.");

	assert!(matches!(err, Error::Identity(_)));
	assert_eq!(err.upstream_status(), None);
}

#[tokio::test]
async fn spawn_environment_exports_oauth_state() {
	let server = MockServer::start_async().await;
	let _profile = mock_endpoint(&server, "/api/v1/users/self/profile", PROFILE_BODY).await;
	let config = test_config(&server.base_url())
		.manage_groups(false)
		.build()
		.expect("Test config should be considered valid.");
	let adapter = build_reqwest_test_adapter(config);
	let token = AccessToken::new(TOKEN);
	let record = adapter
		.authenticate(&token)
		.await
		.expect("Authentication against a healthy profile mock should succeed.");
	let environment = adapter.spawn_environment(&token, &record);

	assert_eq!(environment.get("OAUTH2_ACCESS_TOKEN").map(String::as_str), Some(TOKEN));
	assert_eq!(environment.get("OAUTH2_LOGIN_ID").map(String::as_str), Some("yuvip"));
	assert_eq!(
		environment.get("OAUTH2_SORTABLE_NAME").map(String::as_str),
		Some("Panda, Yuvi"),
	);
	assert_eq!(
		environment.get("OAUTH2_PRIMARY_EMAIL").map(String::as_str),
		Some("Yuvi@Berkeley.EDU"),
	);
}
