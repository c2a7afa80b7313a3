use crate::domain::model::Plan;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct, validate_non_empty_string, validate_range};

/// Read-only plan lookup, shared by everything that prices a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    plans: Vec<Plan>,
}

impl Catalog {
    pub fn new(plans: Vec<Plan>) -> Result<Self> {
        for plan in &plans {
            validate_non_empty_string("plans.id", &plan.id)?;
            validate_non_empty_string("plans.name", &plan.name)?;
            validate_range("plans.seats", plan.seats, 1, u32::MAX)?;
        }
        validate_distinct("plans.id", plans.iter().map(|p| p.id.as_str()))?;
        Ok(Self { plans })
    }

    pub fn find(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.id == plan_id)
    }

    pub fn price_of(&self, plan_id: &str) -> Option<u64> {
        self.find(plan_id).map(|p| p.price_monthly)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            plans: default_plans(),
        }
    }
}

pub fn default_plans() -> Vec<Plan> {
    vec![
        Plan {
            id: "basic".to_string(),
            name: "Basic".to_string(),
            price_monthly: 249,
            seats: 5,
            desc: "For small ski areas and trial operation.".to_string(),
        },
        Plan {
            id: "pro".to_string(),
            name: "Pro".to_string(),
            price_monthly: 549,
            seats: 25,
            desc: "For growing resorts that need reporting.".to_string(),
        },
        Plan {
            id: "enterprise".to_string(),
            name: "Enterprise".to_string(),
            price_monthly: 1190,
            seats: 100,
            desc: "For large resorts with integrations.".to_string(),
        },
    ]
}
