//! Literal scenario data
//!
//! Values mirror the fixed data the public API serves. Each provider returns
//! a fresh iterator over static rows, so a run can enumerate them as often as
//! it likes and always sees the same order.

/// List page holding users 7 to 12
pub const LIST_PAGE: u32 = 2;

/// Server-side delay requested by the delayed-list case, in seconds
pub const DELAY_SECS: u64 = 3;

/// User the partial update targets; exists on the remote API
pub const PATCH_TARGET_ID: u64 = 2;

/// User ID the remote API does not know
pub const MISSING_USER_ID: u64 = 999;

/// Name and job sent in a user payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserPayload {
    pub name: &'static str,
    pub job: &'static str,
}

/// Attributes of the fixture user created in setup
pub const FIXTURE_USER: UserPayload = UserPayload {
    name: "Ivan",
    job: "Tester",
};

/// Full replacement sent by the PUT case
pub const UPDATED_USER: UserPayload = UserPayload {
    name: "SuperIvan",
    job: "AutoTester",
};

/// Job sent by the PATCH case
pub const PATCHED_JOB: &str = "QA Engineer";

/// A listed user and the first name the API reports for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserNameScenario {
    pub user_id: u64,
    pub first_name: &'static str,
}

const USER_NAMES: [UserNameScenario; 6] = [
    UserNameScenario { user_id: 7, first_name: "Michael" },
    UserNameScenario { user_id: 8, first_name: "Lindsay" },
    UserNameScenario { user_id: 9, first_name: "Tobias" },
    UserNameScenario { user_id: 10, first_name: "Byron" },
    UserNameScenario { user_id: 11, first_name: "George" },
    UserNameScenario { user_id: 12, first_name: "Rachel" },
];

/// Users 7 to 12 with their first names
pub fn user_names() -> impl Iterator<Item = UserNameScenario> + Clone {
    USER_NAMES.into_iter()
}

/// A registration attempt and its expected answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationScenario {
    pub email: &'static str,
    pub password: Option<&'static str>,
    pub expected_status: u16,
    /// Top-level field that must be present in the answer
    pub expected_field: &'static str,
    /// Exact rejection message, when the API's wording is stable
    pub expected_error: Option<&'static str>,
}

impl RegistrationScenario {
    pub fn expects_success(&self) -> bool {
        self.expected_status == 200
    }
}

const REGISTRATIONS: [RegistrationScenario; 3] = [
    RegistrationScenario {
        email: "eve.holt@reqres.in",
        password: Some("pistol"),
        expected_status: 200,
        expected_field: "token",
        expected_error: None,
    },
    RegistrationScenario {
        email: "invalid@email",
        password: Some("123"),
        expected_status: 400,
        expected_field: "error",
        expected_error: None,
    },
    RegistrationScenario {
        email: "sydney@fife",
        password: None,
        expected_status: 400,
        expected_field: "error",
        expected_error: Some("Missing password"),
    },
];

/// Successful, unknown-user and password-less registrations
pub fn registrations() -> impl Iterator<Item = RegistrationScenario> + Clone {
    REGISTRATIONS.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_names_are_restartable() {
        let first: Vec<_> = user_names().collect();
        let second: Vec<_> = user_names().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        assert_eq!(first[0], UserNameScenario { user_id: 7, first_name: "Michael" });
        assert_eq!(first[5].user_id, 12);
    }

    #[test]
    fn test_registrations_cover_success_and_failure() {
        let rows: Vec<_> = registrations().collect();
        assert_eq!(rows.iter().filter(|r| r.expects_success()).count(), 1);
        assert!(rows.iter().any(|r| r.password.is_none() && r.expected_status == 400));
        assert!(rows
            .iter()
            .filter(|r| !r.expects_success())
            .all(|r| r.expected_field == "error"));
    }
}
