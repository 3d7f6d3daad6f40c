use once_cell::sync::Lazy;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

// Shared test context
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

impl TestContext {
    fn new() -> Self {
        Self {
            client: CLIENT.clone(),
            base_url: std::env::var("ROSTERD_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string()),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    // These tests need a running server and database:
    //   DATABASE_URL=... JWT_SECRET=... cargo run
    //   cargo test -- --ignored

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_register_login_and_employee_lifecycle() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let email = format!("testuser_{}@example.com", timestamp);

        // Step 1: Registration
        let reg_response = context
            .client
            .post(format!("{}/register", context.base_url))
            .json(&json!({
                "email": email,
                "password": "secret1"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(reg_response.status().as_u16(), 201, "Registration failed");
        let reg_body: Value = reg_response.json().await.unwrap();
        assert_eq!(reg_body["message"], "Registration successful");

        // Step 2: Registering the same email again conflicts
        let dup_response = context
            .client
            .post(format!("{}/register", context.base_url))
            .json(&json!({
                "email": email,
                "password": "secret1"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(dup_response.status().as_u16(), 409, "Duplicate registration must conflict");

        // Step 3: Login
        let login_response = context
            .client
            .post(format!("{}/login", context.base_url))
            .json(&json!({
                "email": email,
                "password": "secret1"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(login_response.status().as_u16(), 200, "Login failed");
        let login_body: Value = login_response.json().await.unwrap();
        let token = login_body["token"].as_str().expect("token missing").to_string();

        // Step 4: Create an employee with the token
        let create_response = context
            .client
            .post(format!("{}/employees", context.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "name": "Jo",
                "position": "Eng"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(create_response.status().as_u16(), 201, "Employee creation failed");
        let created: Value = create_response.json().await.unwrap();
        let id = created["id"].as_i64().expect("id missing");
        assert_eq!(created["name"], "Jo");
        assert_eq!(created["position"], "Eng");

        // Step 5: The record is readable without auth
        let get_response = context
            .client
            .get(format!("{}/employees/{}", context.base_url, id))
            .send()
            .await
            .unwrap();

        assert_eq!(get_response.status().as_u16(), 200);
        let fetched: Value = get_response.json().await.unwrap();
        assert_eq!(fetched["id"].as_i64(), Some(id));
        assert_eq!(fetched["name"], "Jo");

        // Step 6: An invalid PUT is rejected with per-field details and
        // leaves the record unchanged
        let bad_put = context
            .client
            .put(format!("{}/employees/{}", context.base_url, id))
            .bearer_auth(&token)
            .json(&json!({
                "name": "A",
                "position": "Eng"
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(bad_put.status().as_u16(), 400);
        let bad_body: Value = bad_put.json().await.unwrap();
        assert!(bad_body["error"].is_string());
        let details = bad_body["details"].as_array().expect("details missing");
        assert!(details.iter().any(|d| d["field"] == "name"));

        let unchanged: Value = context
            .client
            .get(format!("{}/employees/{}", context.base_url, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(unchanged["name"], "Jo");

        // Step 7: Delete with the token, then the record is gone
        let delete_response = context
            .client
            .delete(format!("{}/employees/{}", context.base_url, id))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();

        assert_eq!(delete_response.status().as_u16(), 200);
        let delete_body: Value = delete_response.json().await.unwrap();
        assert_eq!(delete_body["message"], "Employee deleted successfully");

        let gone = context
            .client
            .get(format!("{}/employees/{}", context.base_url, id))
            .send()
            .await
            .unwrap();
        assert_eq!(gone.status().as_u16(), 404);
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_concurrent_registration_yields_one_success_and_one_conflict() {
        let context = TestContext::new();
        let timestamp = TestContext::get_timestamp();
        let email = format!("raceuser_{}@example.com", timestamp);
        let payload = json!({
            "email": email,
            "password": "secret1"
        });

        // Fire both registrations at once; the unique constraint settles
        // the race.
        let first = context
            .client
            .post(format!("{}/register", context.base_url))
            .json(&payload)
            .send();
        let second = context
            .client
            .post(format!("{}/register", context.base_url))
            .json(&payload)
            .send();

        let (first, second) = tokio::join!(first, second);
        let mut statuses = vec![
            first.unwrap().status().as_u16(),
            second.unwrap().status().as_u16(),
        ];
        statuses.sort_unstable();

        assert_eq!(statuses, vec![201, 409], "expected exactly one success and one conflict");
    }

    #[tokio::test]
    #[ignore = "requires a running server and database"]
    async fn test_protected_routes_reject_missing_and_bad_tokens() {
        let context = TestContext::new();

        // No Authorization header at all
        let missing = context
            .client
            .post(format!("{}/employees", context.base_url))
            .json(&json!({ "name": "Jo", "position": "Eng" }))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 401);
        let missing_body: Value = missing.json().await.unwrap();
        assert!(missing_body["error"].is_string());

        // A garbage token is rejected with a distinct status
        let invalid = context
            .client
            .post(format!("{}/employees", context.base_url))
            .bearer_auth("not.a.token")
            .json(&json!({ "name": "Jo", "position": "Eng" }))
            .send()
            .await
            .unwrap();
        assert_eq!(invalid.status().as_u16(), 403);
    }
}
