//! Subscription plan catalogue entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, PlanId, Timestamp, ValidationError};

use super::PlanDuration;

/// A purchasable subscription plan.
///
/// Plans are never hard-deleted. A deactivated plan stays resolvable for
/// members and payments that reference it, but cannot be newly assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub duration: PlanDuration,
    pub price: Money,
    pub description: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of a plan. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PlanChanges {
    pub name: Option<String>,
    pub duration: Option<PlanDuration>,
    pub price: Option<Money>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl Plan {
    /// Creates a new active plan.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name or description is blank.
    pub fn new(
        id: PlanId,
        name: impl Into<String>,
        duration: PlanDuration,
        price: Money,
        description: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let name = required("name", name.into())?;
        let description = required("description", description.into())?;
        Ok(Self {
            id,
            name,
            duration,
            price,
            description,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, changes: PlanChanges, now: Timestamp) -> Result<(), ValidationError> {
        if let Some(name) = changes.name {
            self.name = required("name", name)?;
        }
        if let Some(description) = changes.description {
            self.description = required("description", description)?;
        }
        if let Some(duration) = changes.duration {
            self.duration = duration;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Soft-deletes the plan.
    pub fn deactivate(&mut self, now: Timestamp) {
        self.is_active = false;
        self.updated_at = now;
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}
