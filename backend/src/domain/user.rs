//! User directory data model.
//!
//! Raw request fields arrive as [`UserDraft`] or [`UserPatchDraft`] and are
//! validated into [`NewUser`] or [`UserPatch`]. Validation reports every
//! offending field at once through [`UserValidationErrors`].

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Date format accepted for dates of birth.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Attribute of a user record, named as clients spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Name,
    Email,
    Phone,
    Dob,
    ImageUrl,
}

impl UserField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Dob => "dob",
            Self::ImageUrl => "imageUrl",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    Missing(UserField),
    Blank(UserField),
    MalformedEmail,
    MalformedDob,
}

impl UserValidationError {
    /// Field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> UserField {
        match self {
            Self::InvalidId => UserField::Id,
            Self::Missing(field) | Self::Blank(field) => *field,
            Self::MalformedEmail => UserField::Email,
            Self::MalformedDob => UserField::Dob,
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::Missing(_) => "missing_field",
            Self::Blank(_) => "blank_field",
            Self::MalformedEmail => "invalid_email",
            Self::MalformedDob => "invalid_date",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a positive integer"),
            Self::Missing(field) => write!(f, "{field} is required"),
            Self::Blank(field) => write!(f, "{field} must not be blank"),
            Self::MalformedEmail => write!(f, "email must look like local@domain"),
            Self::MalformedDob => write!(f, "dob must be a calendar date formatted YYYY-MM-DD"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Every validation failure found in one request, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserValidationErrors(Vec<UserValidationError>);

impl UserValidationErrors {
    /// Iterate over the individual failures.
    pub fn iter(&self) -> impl Iterator<Item = &UserValidationError> {
        self.0.iter()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no failure was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.0.is_empty() {
            return Err(self);
        }
        value().ok_or(self)
    }
}

impl fmt::Display for UserValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for UserValidationErrors {}

impl From<UserValidationError> for UserValidationErrors {
    fn from(value: UserValidationError) -> Self {
        Self(vec![value])
    }
}

/// Database-assigned user identity. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i32);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use roster::domain::UserId;
    ///
    /// assert!(UserId::new(1).is_ok());
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Parse a path segment such as `"42"`.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let id = raw
            .trim()
            .parse::<i32>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(id)
    }

    /// Parse an identifier supplied as a JSON number.
    pub fn from_i64(raw: i64) -> Result<Self, UserValidationError> {
        let id = i32::try_from(raw).map_err(|_| UserValidationError::InvalidId)?;
        Self::new(id)
    }

    /// Underlying integer.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank human name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::Blank(UserField::Name));
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address in `local@domain` shape.
///
/// Stored as supplied; uniqueness is decided on [`EmailAddress::normalized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::Blank(UserField::Email));
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::MalformedEmail);
        }
        Ok(Self(email))
    }

    /// Lower-cased form used for case-insensitive comparisons.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-blank phone number. No format is imposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(phone: impl Into<String>) -> Result<Self, UserValidationError> {
        let phone = phone.into();
        if phone.trim().is_empty() {
            return Err(UserValidationError::Blank(UserField::Phone));
        }
        Ok(Self(phone))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Parse a `YYYY-MM-DD` date of birth.
pub fn parse_dob(raw: &str) -> Result<NaiveDate, UserValidationError> {
    if raw.trim().is_empty() {
        return Err(UserValidationError::Blank(UserField::Dob));
    }
    NaiveDate::parse_from_str(raw.trim(), DOB_FORMAT).map_err(|_| UserValidationError::MalformedDob)
}

/// Avatar reference. Opaque; only blankness is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Result<Self, UserValidationError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(UserValidationError::Blank(UserField::ImageUrl));
        }
        Ok(Self(url))
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: EmailAddress,
    phone: PhoneNumber,
    dob: NaiveDate,
    image_url: Option<ImageUrl>,
}

impl User {
    /// Assemble a user from an identity and validated attributes.
    #[must_use]
    pub fn new(id: UserId, fields: NewUser) -> Self {
        let NewUser {
            name,
            email,
            phone,
            dob,
            image_url,
        } = fields;
        Self {
            id,
            name,
            email,
            phone,
            dob,
            image_url,
        }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    #[must_use]
    pub fn dob(&self) -> NaiveDate {
        self.dob
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&ImageUrl> {
        self.image_url.as_ref()
    }

    /// Return a copy with `patch` merged over the current attributes.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn patched(&self, patch: &UserPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            phone: patch.phone.clone().unwrap_or_else(|| self.phone.clone()),
            dob: patch.dob.unwrap_or(self.dob),
            image_url: match &patch.image_url {
                Some(change) => change.clone(),
                None => self.image_url.clone(),
            },
        }
    }
}

/// Unvalidated registration fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub image_url: Option<String>,
}

/// Validated registration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub dob: NaiveDate,
    pub image_url: Option<ImageUrl>,
}

fn check<T>(
    errors: &mut Vec<UserValidationError>,
    result: Result<T, UserValidationError>,
) -> Option<T> {
    result.map_err(|error| errors.push(error)).ok()
}

fn require<T>(
    errors: &mut Vec<UserValidationError>,
    field: UserField,
    raw: Option<String>,
    parse: impl FnOnce(String) -> Result<T, UserValidationError>,
) -> Option<T> {
    match raw {
        Some(value) => check(errors, parse(value)),
        None => {
            errors.push(UserValidationError::Missing(field));
            None
        }
    }
}

/// Blank avatar strings mean "no avatar" rather than a validation failure.
fn optional_image(raw: Option<String>) -> Option<ImageUrl> {
    raw.and_then(|url| ImageUrl::new(url).ok())
}

impl TryFrom<UserDraft> for NewUser {
    type Error = UserValidationErrors;

    /// Validate every field, collecting all failures.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::{NewUser, UserDraft};
    ///
    /// let draft = UserDraft {
    ///     name: Some("Alice".into()),
    ///     email: Some("alice@example.com".into()),
    ///     phone: Some("555-0100".into()),
    ///     dob: Some("1990-04-01".into()),
    ///     image_url: None,
    /// };
    /// assert!(NewUser::try_from(draft).is_ok());
    /// assert_eq!(NewUser::try_from(UserDraft::default()).unwrap_err().len(), 4);
    /// ```
    fn try_from(draft: UserDraft) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let name = require(&mut errors, UserField::Name, draft.name, DisplayName::new);
        let email = require(&mut errors, UserField::Email, draft.email, EmailAddress::new);
        let phone = require(&mut errors, UserField::Phone, draft.phone, PhoneNumber::new);
        let dob = require(&mut errors, UserField::Dob, draft.dob, |raw| parse_dob(&raw));
        let image_url = optional_image(draft.image_url);

        UserValidationErrors(errors).into_result(|| {
            Some(Self {
                name: name?,
                email: email?,
                phone: phone?,
                dob: dob?,
                image_url,
            })
        })
    }
}

/// Unvalidated partial update.
///
/// `image_url` distinguishes "leave as is" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatchDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub image_url: Option<Option<String>>,
}

/// Validated partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<DisplayName>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub dob: Option<NaiveDate>,
    pub image_url: Option<Option<ImageUrl>>,
}

impl UserPatch {
    /// True when applying the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.dob.is_none()
            && self.image_url.is_none()
    }
}

impl TryFrom<UserPatchDraft> for UserPatch {
    type Error = UserValidationErrors;

    fn try_from(draft: UserPatchDraft) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let name = draft
            .name
            .and_then(|raw| check(&mut errors, DisplayName::new(raw)));
        let email = draft
            .email
            .and_then(|raw| check(&mut errors, EmailAddress::new(raw)));
        let phone = draft
            .phone
            .and_then(|raw| check(&mut errors, PhoneNumber::new(raw)));
        let dob = draft.dob.and_then(|raw| check(&mut errors, parse_dob(&raw)));
        let image_url = draft.image_url.map(optional_image);

        UserValidationErrors(errors).into_result(|| {
            Some(Self {
                name,
                email,
                phone,
                dob,
                image_url,
            })
        })
    }
}
