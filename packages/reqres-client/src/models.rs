//! reqres API request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ReqresError, ReqresResult};

/// A user as listed by `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Numeric user ID
    pub id: u64,
    /// Contact email
    pub email: String,
    /// Avatar image URL
    pub avatar: String,
    /// Given name, sent as `first_name` on the wire
    pub first_name: String,
    /// Family name, sent as `last_name` on the wire
    pub last_name: String,
}

/// One page of `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersPage {
    /// Page number echoed by the server
    pub page: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Users on this page
    pub data: Vec<UserRecord>,
}

impl UsersPage {
    /// Find a user on this page by ID
    pub fn find(&self, id: u64) -> Option<&UserRecord> {
        self.data.iter().find(|user| user.id == id)
    }
}

/// Envelope of `GET /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleUser {
    pub data: UserRecord,
}

/// Outbound payload for create, update and partial update
///
/// Unset fields are left out of the JSON entirely so a job-only payload
/// really is a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
}

impl UserRequest {
    /// Payload carrying both name and job
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            job: Some(job.into()),
        }
    }

    /// Payload carrying only a job, for partial updates
    pub fn job_only(job: impl Into<String>) -> Self {
        Self {
            name: None,
            job: Some(job.into()),
        }
    }
}

/// Response of create, update and partial update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Server-assigned ID, only present on create
    #[serde(default, deserialize_with = "id_as_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    /// Parse the server-assigned ID as a number
    ///
    /// # Errors
    /// - `ReqresError::MissingField` if the response carried no ID
    /// - `ReqresError::InvalidId` if the ID is not an unsigned integer
    pub fn numeric_id(&self) -> ReqresResult<u64> {
        let id = self.id.as_deref().ok_or_else(|| ReqresError::MissingField {
            field: "id".to_string(),
            context: "user response".to_string(),
        })?;
        id.trim()
            .parse()
            .map_err(|_| ReqresError::InvalidId(id.to_string()))
    }
}

/// Outbound payload of `POST /register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl RegistrationRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Some(password.into()),
        }
    }

    /// Payload without a password, which the API must reject
    pub fn without_password(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
        }
    }
}

/// Raw body of `POST /register`, success and failure fields together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(default, deserialize_with = "id_as_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered { id: String, token: String },
    Rejected { error: String },
}

impl RegistrationOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}

impl TryFrom<RegistrationResponse> for RegistrationOutcome {
    type Error = ReqresError;

    fn try_from(raw: RegistrationResponse) -> Result<Self, Self::Error> {
        if let Some(error) = raw.error {
            return Ok(Self::Rejected { error });
        }

        let missing = |field: &str| ReqresError::MissingField {
            field: field.to_string(),
            context: "registration response".to_string(),
        };
        let id = raw.id.ok_or_else(|| missing("id"))?;
        let token = raw.token.ok_or_else(|| missing("token"))?;
        Ok(Self::Registered { id, token })
    }
}

/// Accept an ID sent either as a JSON string or a JSON number
fn id_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
        Text(String),
        Number(u64),
    }

    Ok(Option::<WireId>::deserialize(deserializer)?.map(|id| match id {
        WireId::Text(text) => text,
        WireId::Number(number) => number.to_string(),
    }))
}
