//! Vehicle entity type - trucks available for manifest trips

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::validate::ValidationError;

/// Ownership class of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// Owned by the operator
    #[default]
    Personal,
    /// Hired from the open market
    Market,
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleType::Personal => write!(f, "personal"),
            VehicleType::Market => write!(f, "market"),
        }
    }
}

impl std::str::FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(VehicleType::Personal),
            "market" => Ok(VehicleType::Market),
            other => Err(format!("unknown vehicle type: {other}")),
        }
    }
}

/// A Vehicle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier
    pub id: EntityId,

    /// Registration number (e.g., "MH12AB1234")
    pub vehicle_number: String,

    /// Driver name
    pub driver_name: String,

    /// Usual route description
    pub route: String,

    /// Standard price for the route; non-negative
    pub route_price: f64,

    /// Ownership class
    #[serde(default)]
    pub vehicle_type: VehicleType,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Entity for Vehicle {
    const PREFIX: &'static str = "VEH";
    const STORE_KEY: &'static str = "vehicles";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.vehicle_number
    }

    fn status(&self) -> &str {
        match self.vehicle_type {
            VehicleType::Personal => "personal",
            VehicleType::Market => "market",
        }
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Vehicle {
    /// Register a new vehicle
    pub fn new(
        vehicle_number: impl Into<String>,
        driver_name: impl Into<String>,
        route: impl Into<String>,
        route_price: f64,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Veh),
            vehicle_number: vehicle_number.into(),
            driver_name: driver_name.into(),
            route: route.into(),
            route_price,
            vehicle_type,
            created: Utc::now(),
        }
    }

    /// Check schema constraints
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::require_min("vehicle_number", &self.vehicle_number, 4)?;
        ValidationError::require_min("driver_name", &self.driver_name, 2)?;
        ValidationError::require_min("route", &self.route, 2)?;
        ValidationError::require_non_negative("route_price", self.route_price)?;
        Ok(())
    }
}
