//! Shared builders for unit tests.

use std::collections::BTreeSet;

use crate::catalog::{ServiceCatalog, ServiceCatalogEntry};
use crate::model::{Category, Requirement};

pub(crate) fn service(
    id: &str,
    name: &str,
    category: Category,
    description: &str,
    capabilities: &[&str],
    tags: &[&str],
) -> ServiceCatalogEntry {
    ServiceCatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        capabilities: capabilities.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        success_rate: 0.9,
        past_project_count: 5,
    }
}

pub(crate) fn requirement(id: &str, description: &str, category: Category) -> Requirement {
    Requirement::new(id, description, category, 0.9)
}

/// Three-service catalog spanning technical, compliance and budget work.
pub(crate) fn small_catalog() -> ServiceCatalog {
    ServiceCatalog::from_entries(vec![
        service(
            "svc-cloud",
            "Cloud Migration",
            Category::Technical,
            "AWS cloud migration and Kubernetes orchestration",
            &["AWS migration", "Kubernetes orchestration"],
            &["aws", "cloud", "kubernetes"],
        ),
        service(
            "svc-audit",
            "Security Audit",
            Category::Compliance,
            "SOC 2 readiness and penetration testing",
            &["penetration testing", "SOC 2 readiness"],
            &["security", "soc2", "pentest"],
        ),
        service(
            "svc-billing",
            "Fixed Price Delivery",
            Category::Budget,
            "Fixed price engagements with milestone billing",
            &["milestone billing", "cost estimation"],
            &["fixed-price", "billing"],
        ),
    ])
    .expect("fixture catalog is valid")
    .catalog
}
