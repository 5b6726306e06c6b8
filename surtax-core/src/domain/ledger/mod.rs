// surtax-core/src/domain/ledger/mod.rs

pub mod project;
pub mod status;

pub use project::{DerivedFlags, Project};
pub use status::ProjectStatus;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Project, ProjectStatus};

    /// A categorized, active project with no flags raised.
    pub fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: Some(format!("Project {}", id)),
            school_name: Some("Belleview Elementary".to_string()),
            category: Some("Renovation".to_string()),
            original_amount: 100_000.0,
            current_amount: 100_000.0,
            status: ProjectStatus::Active,
            ..Default::default()
        }
    }

    pub fn delayed(id: &str, days: i64) -> Project {
        Project {
            is_delayed: true,
            delay_days: days,
            ..project(id)
        }
    }

    pub fn over_budget(id: &str, pct: f64) -> Project {
        let base = project(id);
        let amount = base.original_amount * pct / 100.0;
        Project {
            current_amount: base.original_amount + amount,
            is_over_budget: true,
            budget_variance_amount: amount,
            budget_variance_pct: pct,
            ..base
        }
    }

    pub fn with_vendor(id: &str, vendor: &str, change_orders: u32) -> Project {
        Project {
            vendor_id: Some(vendor.to_lowercase().replace(' ', "-")),
            vendor_name: Some(vendor.to_string()),
            change_order_count: change_orders,
            total_change_order_amount: f64::from(change_orders) * 10_000.0,
            ..project(id)
        }
    }
}
