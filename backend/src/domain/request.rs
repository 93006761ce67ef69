//! Tracked requests: records a user files against a location.
//!
//! A request belongs to the user who created it. Only that user may read,
//! change, or delete it; [`RequestLookup`] tells callers which of "missing",
//! "someone else's", or "yours" applies to a given id.

use std::fmt;

use super::UserId;
use super::text::non_empty_text;

/// Validation failures for request fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("location must not be empty")]
    EmptyLocation,
    #[error("request_type must not be empty")]
    EmptyRequestType,
}

impl RequestValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyLocation => "location",
            Self::EmptyRequestType => "request_type",
        }
    }
}

/// Process-unique request identifier, assigned by the request store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

non_empty_text!(
    /// Short summary of what is needed.
    RequestTitle,
    RequestValidationError::EmptyTitle
);
non_empty_text!(
    /// Where the work is needed.
    RequestLocation,
    RequestValidationError::EmptyLocation
);
non_empty_text!(
    /// Caller-chosen category such as `maintenance` or `repair`.
    RequestType,
    RequestValidationError::EmptyRequestType
);

/// Validated fields for a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    pub title: RequestTitle,
    pub location: RequestLocation,
    pub request_type: RequestType,
    pub description: Option<String>,
}

impl RequestDraft {
    /// Validate the required fields of a new request.
    ///
    /// # Examples
    /// ```
    /// use request_tracker::domain::{RequestDraft, RequestValidationError};
    ///
    /// let draft = RequestDraft::try_from_parts("Fix light", "Block A", "maintenance", None)
    ///     .expect("valid draft");
    /// assert_eq!(draft.title.as_ref(), "Fix light");
    ///
    /// let err = RequestDraft::try_from_parts("Fix light", " ", "maintenance", None)
    ///     .expect_err("blank location");
    /// assert_eq!(err, RequestValidationError::EmptyLocation);
    /// ```
    pub fn try_from_parts(
        title: &str,
        location: &str,
        request_type: &str,
        description: Option<String>,
    ) -> Result<Self, RequestValidationError> {
        Ok(Self {
            title: RequestTitle::new(title)?,
            location: RequestLocation::new(location)?,
            request_type: RequestType::new(request_type)?,
            description,
        })
    }
}

/// Partial update: absent fields keep their current value.
///
/// `description` distinguishes "absent" (`None`) from "cleared"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPatch {
    pub title: Option<RequestTitle>,
    pub location: Option<RequestLocation>,
    pub request_type: Option<RequestType>,
    pub description: Option<Option<String>>,
}

impl RequestPatch {
    /// Validate the fields that are present.
    pub fn try_from_parts(
        title: Option<&str>,
        location: Option<&str>,
        request_type: Option<&str>,
        description: Option<Option<String>>,
    ) -> Result<Self, RequestValidationError> {
        Ok(Self {
            title: title.map(RequestTitle::new).transpose()?,
            location: location.map(RequestLocation::new).transpose()?,
            request_type: request_type.map(RequestType::new).transpose()?,
            description,
        })
    }
}

/// A tracked request.
///
/// ## Invariants
/// - `owner` never changes after creation.
/// - `title`, `location`, and `request_type` are never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    id: RequestId,
    owner: UserId,
    title: RequestTitle,
    location: RequestLocation,
    request_type: RequestType,
    description: Option<String>,
}

impl Request {
    /// Materialise a draft under the id the store assigned.
    pub fn from_draft(id: RequestId, owner: UserId, draft: RequestDraft) -> Self {
        let RequestDraft {
            title,
            location,
            request_type,
            description,
        } = draft;
        Self {
            id,
            owner,
            title,
            location,
            request_type,
            description,
        }
    }

    /// Apply the present fields of `patch`.
    ///
    /// # Examples
    /// ```
    /// use request_tracker::domain::{
    ///     Request, RequestDraft, RequestId, RequestLocation, RequestPatch, UserId,
    /// };
    ///
    /// let draft = RequestDraft::try_from_parts("Fix light", "Block A", "maintenance", None)
    ///     .expect("valid draft");
    /// let mut request = Request::from_draft(RequestId::new(1), UserId::random(), draft);
    /// request.apply(RequestPatch {
    ///     location: Some(RequestLocation::new("Block B").expect("valid")),
    ///     ..RequestPatch::default()
    /// });
    /// assert_eq!(request.location().as_ref(), "Block B");
    /// assert_eq!(request.title().as_ref(), "Fix light");
    /// ```
    pub fn apply(&mut self, patch: RequestPatch) {
        let RequestPatch {
            title,
            location,
            request_type,
            description,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(request_type) = request_type {
            self.request_type = request_type;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    pub fn title(&self) -> &RequestTitle {
        &self.title
    }

    pub fn location(&self) -> &RequestLocation {
        &self.location
    }

    pub fn request_type(&self) -> &RequestType {
        &self.request_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Outcome of looking a request up on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLookup {
    /// No request has this id.
    NotFound,
    /// The request exists but belongs to another user.
    NotOwned,
    /// The request exists and belongs to the caller.
    Found(Request),
}

impl RequestLookup {
    /// Classify a stored record (if any) against the caller.
    pub fn classify(record: Option<Request>, caller: &UserId) -> Self {
        match record {
            None => Self::NotFound,
            Some(request) if request.is_owned_by(caller) => Self::Found(request),
            Some(_) => Self::NotOwned,
        }
    }
}
