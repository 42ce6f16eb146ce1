//! Review form domain: rating categories, validation, and assembly of the
//! final submission payload.
//!
//! Validation failures never mutate resolved-address state; they are typed
//! errors returned to the caller before any upload or submit happens.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::address::ResolvedAddress;

/// One fixed rating category shown on the review form.
#[derive(Debug, Clone, Copy)]
pub struct RatingCategory {
    /// Column key in the submission payload (e.g. `"rating_payment"`).
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// The five rating categories, in form display order.
pub const RATING_CATEGORIES: [RatingCategory; 5] = [
    RatingCategory {
        key: "rating_payment",
        label: "Payment Timeliness",
    },
    RatingCategory {
        key: "rating_communication",
        label: "Communication",
    },
    RatingCategory {
        key: "rating_scope",
        label: "Scope Clarity",
    },
    RatingCategory {
        key: "rating_change_orders",
        label: "Change Order Fairness",
    },
    RatingCategory {
        key: "rating_overall",
        label: "Overall Experience",
    },
];

/// Star ratings for each category, 1–5. `0` means not yet rated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub payment: u8,
    pub communication: u8,
    pub scope: u8,
    pub change_orders: u8,
    pub overall: u8,
}

impl Ratings {
    /// Rating values in [`RATING_CATEGORIES`] order.
    #[must_use]
    pub fn values(self) -> [u8; 5] {
        [
            self.payment,
            self.communication,
            self.scope,
            self.change_orders,
            self.overall,
        ]
    }

    /// Whether every category has been rated.
    #[must_use]
    pub fn all_rated(self) -> bool {
        self.values().iter().all(|&v| v != 0)
    }

    /// Whether any rating is low enough (≤ 2) to auto-flag the review for
    /// moderation.
    #[must_use]
    pub fn auto_flag(self) -> bool {
        self.values().iter().any(|&v| v <= 2)
    }
}

/// The in-progress review form, excluding address state (owned by the
/// resolution session) and file attachments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub homeowner_name: String,
    pub project_type: String,
    #[serde(default)]
    pub project_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub ratings: Ratings,
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("category not rated: {0}")]
    UnratedCategory(&'static str),
}

/// Validates a draft against the current resolved address.
///
/// Required fields match the form: homeowner name, address line, zip and
/// project type must be non-empty, and every rating category must be set.
///
/// # Errors
///
/// Returns the first [`ReviewError`] encountered, in form order.
pub fn validate(draft: &ReviewDraft, address: &ResolvedAddress) -> Result<(), ReviewError> {
    if draft.homeowner_name.trim().is_empty() {
        return Err(ReviewError::MissingField("homeowner_name"));
    }
    if address.display_address.trim().is_empty() {
        return Err(ReviewError::MissingField("address"));
    }
    if address.zip.trim().is_empty() {
        return Err(ReviewError::MissingField("zip"));
    }
    if draft.project_type.trim().is_empty() {
        return Err(ReviewError::MissingField("project_type"));
    }

    let values = draft.ratings.values();
    for (category, value) in RATING_CATEGORIES.iter().zip(values) {
        if value == 0 {
            return Err(ReviewError::UnratedCategory(category.key));
        }
    }
    Ok(())
}

/// The flattened payload accepted by the hosted backend's `reviews` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub contractor_id: Uuid,
    pub homeowner_name: String,
    pub address: String,
    pub zip: String,
    pub city: String,
    pub state: String,
    pub project_type: String,
    pub project_date: Option<NaiveDate>,
    pub comments: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating_payment: u8,
    pub rating_communication: u8,
    pub rating_scope: u8,
    pub rating_change_orders: u8,
    pub rating_overall: u8,
    pub auto_flag: bool,
    /// Public URLs of uploaded photos.
    pub files: Vec<String>,
}

impl ReviewSubmission {
    /// Validates the draft and packages it with the resolved address and
    /// uploaded file URLs into the submission payload.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] when validation fails; nothing is assembled
    /// in that case.
    pub fn assemble(
        contractor_id: Uuid,
        draft: &ReviewDraft,
        address: &ResolvedAddress,
        files: Vec<String>,
    ) -> Result<Self, ReviewError> {
        validate(draft, address)?;

        let (lat, lng) = match address.location {
            Some(loc) => (Some(loc.lat), Some(loc.lng)),
            None => (None, None),
        };

        Ok(Self {
            contractor_id,
            homeowner_name: draft.homeowner_name.clone(),
            address: address.display_address.clone(),
            zip: address.zip.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            project_type: draft.project_type.clone(),
            project_date: draft.project_date,
            comments: draft.comments.clone(),
            lat,
            lng,
            rating_payment: draft.ratings.payment,
            rating_communication: draft.ratings.communication,
            rating_scope: draft.ratings.scope,
            rating_change_orders: draft.ratings.change_orders,
            rating_overall: draft.ratings.overall,
            auto_flag: draft.ratings.auto_flag(),
            files,
        })
    }
}

/// Builds the object-storage path for a review photo:
/// `reviews/{contractor_id}_{unix_millis}.{ext}`.
///
/// The extension is taken from the last dot-separated segment of the
/// original file name; a name with no dot uses the whole name, matching the
/// permissive behavior of the form it replaces.
#[must_use]
pub fn upload_path(contractor_id: Uuid, file_name: &str, uploaded_at: DateTime<Utc>) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    format!(
        "reviews/{contractor_id}_{}.{ext}",
        uploaded_at.timestamp_millis()
    )
}
