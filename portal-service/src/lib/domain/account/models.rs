use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::EmailError;

/// Registered account.
///
/// `email` is the identity key; `role` never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check that the user holds `required`.
    ///
    /// # Errors
    /// * `Forbidden` - Identity is known but the role does not match
    pub fn require_role(&self, required: Role) -> Result<(), AccountError> {
        if self.role == required {
            Ok(())
        } else {
            Err(AccountError::Forbidden {
                required,
                actual: self.role,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Coarse permission class gating which operations a user may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    /// Role assigned by self-service registration.
    ///
    /// Any email containing "admin" (case-insensitive) becomes an admin. This
    /// is demo behaviour kept for compatibility; real admin accounts should be
    /// created through `AccountServicePort::provision`.
    pub fn for_self_registration(email: &EmailAddress) -> Self {
        if email.as_str().to_lowercase().contains("admin") {
            Role::Admin
        } else {
            Role::Client
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            other => Err(AccountError::UnknownRole(other.to_string())),
        }
    }
}

/// Email address type
///
/// Validated against RFC 5322 on construction. Stored exactly as given, so
/// uniqueness is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client-specific business data, owned 1:1 by a client-role user.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientProfile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub company_name: String,
    pub project_name: String,
    pub budget: String,
    pub status: ProjectStatus,
}

impl ClientProfile {
    pub const DEFAULT_COMPANY_NAME: &'static str = "New Company";
    pub const DEFAULT_PROJECT_NAME: &'static str = "New Project";
    pub const DEFAULT_BUDGET: &'static str = "$0";

    /// Placeholder profile created alongside a self-registered client.
    pub fn placeholder(
        user_id: UserId,
        company_name: Option<String>,
        project_name: Option<String>,
    ) -> Self {
        Self {
            id: ProfileId::new(),
            user_id,
            company_name: company_name.unwrap_or_else(|| Self::DEFAULT_COMPANY_NAME.to_string()),
            project_name: project_name.unwrap_or_else(|| Self::DEFAULT_PROJECT_NAME.to_string()),
            budget: Self::DEFAULT_BUDGET.to_string(),
            status: ProjectStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Pending,
    Delayed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Pending => "Pending",
            ProjectStatus::Delayed => "Delayed",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(ProjectStatus::Active),
            "Pending" => Ok(ProjectStatus::Pending),
            "Delayed" => Ok(ProjectStatus::Delayed),
            other => Err(AccountError::DatabaseError(format!(
                "Unknown project status: {}",
                other
            ))),
        }
    }
}

/// Billing record owned by a client profile.
///
/// Persisted in the `invoices` table; no read path aggregates it yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub client_id: ProfileId,
    pub amount: f64,
    pub issued_at: DateTime<Utc>,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Overdue => "Overdue",
        }
    }
}

/// Self-service registration input.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub project_name: Option<String>,
}

/// Explicit account creation with an assigned role.
#[derive(Debug)]
pub struct ProvisionCommand {
    pub email: EmailAddress,
    pub password: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub profile: Option<ProfileDetails>,
}

/// Profile fields supplied when provisioning a client.
#[derive(Debug, Clone)]
pub struct ProfileDetails {
    pub company_name: String,
    pub project_name: String,
    pub budget: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionOutcome {
    Created(User),
    AlreadyExists(EmailAddress),
}

/// User together with its optional profile, inserted as one unit.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user: User,
    pub profile: Option<ClientProfile>,
}

/// Signed bearer token handed out at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
