//! Known user data served by the public API
//!
//! The remote API ships twelve fixed users across two pages; the suite's
//! scenarios assert against these literal values.

use serde_json::{json, Value};

/// Page size of `GET /users`
pub const USERS_PER_PAGE: usize = 6;

/// Fixed timestamp stamped on mutation responses
pub const FIXED_TIMESTAMP: &str = "2025-01-01T12:00:00.000Z";

/// Test fixture for a listed user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqresUserFixture {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl ReqresUserFixture {
    /// Create a fixture with the API's email and avatar conventions
    pub fn new(id: u64, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            email: format!(
                "{}.{}@reqres.in",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            ),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            avatar: format!("https://reqres.in/img/faces/{}-image.jpg", id),
        }
    }

    /// Users 1 to 6
    pub fn page_one() -> Vec<Self> {
        vec![
            Self::new(1, "George", "Bluth"),
            Self::new(2, "Janet", "Weaver"),
            Self::new(3, "Emma", "Wong"),
            Self::new(4, "Eve", "Holt"),
            Self::new(5, "Charles", "Morris"),
            Self::new(6, "Tracey", "Ramos"),
        ]
    }

    /// Users 7 to 12
    pub fn page_two() -> Vec<Self> {
        vec![
            Self::new(7, "Michael", "Lawson"),
            Self::new(8, "Lindsay", "Ferguson"),
            Self::new(9, "Tobias", "Funke"),
            Self::new(10, "Byron", "Fields"),
            Self::new(11, "George", "Edwards"),
            Self::new(12, "Rachel", "Howell"),
        ]
    }

    /// All twelve users in ID order
    pub fn all() -> Vec<Self> {
        let mut users = Self::page_one();
        users.extend(Self::page_two());
        users
    }

    /// Wire representation with snake_case field names
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.email,
            "first_name": self.first_name,
            "last_name": self.last_name,
            "avatar": self.avatar
        })
    }
}

/// Wire body of one list page
pub fn users_page_json(page: u32, users: &[ReqresUserFixture]) -> Value {
    let total = ReqresUserFixture::all().len();
    json!({
        "page": page,
        "per_page": USERS_PER_PAGE,
        "total": total,
        "total_pages": total.div_ceil(USERS_PER_PAGE),
        "data": users.iter().map(ReqresUserFixture::to_json).collect::<Vec<_>>()
    })
}
