//! Request bodies for plan endpoints.

use serde::Deserialize;

use crate::application::handlers::plan::CreatePlanCommand;
use crate::domain::foundation::{Money, ValidationError};
use crate::domain::membership::{PlanChanges, PlanDuration};

/// POST /api/plans
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanRequest {
    pub name: String,
    pub duration: PlanDuration,
    /// Price in cents.
    pub price: i64,
    pub description: String,
}

impl TryFrom<CreatePlanRequest> for CreatePlanCommand {
    type Error = ValidationError;

    fn try_from(req: CreatePlanRequest) -> Result<Self, Self::Error> {
        Ok(CreatePlanCommand {
            name: req.name,
            duration: req.duration,
            price: Money::from_cents(req.price)?,
            description: req.description,
        })
    }
}

/// PATCH /api/plans/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub duration: Option<PlanDuration>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<UpdatePlanRequest> for PlanChanges {
    type Error = ValidationError;

    fn try_from(req: UpdatePlanRequest) -> Result<Self, Self::Error> {
        Ok(PlanChanges {
            name: req.name,
            duration: req.duration,
            price: req.price.map(Money::from_cents).transpose()?,
            description: req.description,
            is_active: req.is_active,
        })
    }
}
