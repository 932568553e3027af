//! Test fixtures for integration tests.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tempfile::TempDir;
use tender::{Category, Requirement, ServiceCatalog, ServiceCatalogEntry};

pub const DEFAULT_SUCCESS_RATE: f32 = 0.9;
pub const DEFAULT_PAST_PROJECTS: u32 = 12;

#[derive(Default)]
pub struct ServiceBuilder {
    id: String,
    name: Option<String>,
    category: Option<Category>,
    description: Option<String>,
    capabilities: Vec<String>,
    tags: Vec<String>,
    success_rate: Option<f32>,
    past_project_count: Option<u32>,
}

impl ServiceBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn capabilities(mut self, capabilities: &[&str]) -> Self {
        self.capabilities = capabilities.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn success_rate(mut self, rate: f32) -> Self {
        self.success_rate = Some(rate);
        self
    }

    pub fn build(self) -> ServiceCatalogEntry {
        ServiceCatalogEntry {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            category: self.category.unwrap_or(Category::Technical),
            description: self.description.unwrap_or_default(),
            capabilities: self.capabilities,
            tags: self.tags.into_iter().collect::<BTreeSet<_>>(),
            success_rate: self.success_rate.unwrap_or(DEFAULT_SUCCESS_RATE),
            past_project_count: self.past_project_count.unwrap_or(DEFAULT_PAST_PROJECTS),
        }
    }
}

pub fn requirement(id: &str, description: &str, category: Category) -> Requirement {
    Requirement::new(id, description, category, 0.9)
}

pub fn cloud_migration_service(id: &str) -> ServiceCatalogEntry {
    ServiceBuilder::new(id)
        .name("Cloud Migration")
        .category(Category::Technical)
        .description("AWS cloud migration and Kubernetes orchestration")
        .capabilities(&["AWS migration", "Kubernetes orchestration"])
        .tags(&["aws", "cloud", "kubernetes"])
        .build()
}

/// Single-service catalog offering AWS and Kubernetes migration.
pub fn cloud_catalog() -> ServiceCatalog {
    ServiceCatalog::from_entries(vec![cloud_migration_service("svc1")])
        .expect("cloud catalog is valid")
        .catalog
}

fn service(
    id: &str,
    name: &str,
    category: Category,
    description: &str,
    capabilities: &[&str],
    tags: &[&str],
) -> ServiceCatalogEntry {
    ServiceBuilder::new(id)
        .name(name)
        .category(category)
        .description(description)
        .capabilities(capabilities)
        .tags(tags)
        .build()
}

/// Ten services across every category. Only `svc-01` and `svc-09` relate to
/// AWS and Kubernetes work.
pub fn ten_services() -> Vec<ServiceCatalogEntry> {
    vec![
        cloud_migration_service("svc-01"),
        service(
            "svc-02",
            "Data Warehouse",
            Category::Technical,
            "Snowflake data warehouse design and ETL pipelines",
            &["ETL pipelines", "warehouse modelling"],
            &["snowflake", "etl", "data"],
        ),
        service(
            "svc-03",
            "Security Audit",
            Category::Compliance,
            "SOC 2 readiness and penetration testing",
            &["penetration testing", "SOC 2 readiness"],
            &["security", "soc2", "pentest"],
        ),
        service(
            "svc-04",
            "GDPR Advisory",
            Category::Compliance,
            "GDPR privacy impact assessments and data mapping",
            &["privacy assessments", "data mapping"],
            &["gdpr", "privacy"],
        ),
        service(
            "svc-05",
            "Agile Delivery",
            Category::Timeline,
            "Scrum delivery management with fortnightly sprints",
            &["sprint planning", "release management"],
            &["agile", "scrum"],
        ),
        service(
            "svc-06",
            "Fixed Price Delivery",
            Category::Budget,
            "Fixed price engagements with milestone billing",
            &["milestone billing", "cost estimation"],
            &["fixed-price", "billing"],
        ),
        service(
            "svc-07",
            "UX Research",
            Category::Functional,
            "User research interviews and usability testing",
            &["usability testing", "journey mapping"],
            &["ux", "research"],
        ),
        service(
            "svc-08",
            "Mobile Apps",
            Category::Functional,
            "Native iOS and Android application development",
            &["iOS development", "Android development"],
            &["mobile", "ios", "android"],
        ),
        service(
            "svc-09",
            "Kubernetes Platform",
            Category::Technical,
            "Managed Kubernetes platform operations on AWS",
            &["cluster operations", "AWS cloud support"],
            &["kubernetes", "aws", "platform"],
        ),
        service(
            "svc-10",
            "Helpdesk",
            Category::Functional,
            "Tier one helpdesk and ticket triage",
            &["ticket triage", "on-call rota"],
            &["support", "helpdesk"],
        ),
    ]
}

pub fn ten_service_catalog() -> ServiceCatalog {
    ServiceCatalog::from_entries(ten_services())
        .expect("ten-service catalog is valid")
        .catalog
}

/// JSON catalog source in the on-disk format.
pub fn catalog_json(entries: &[ServiceCatalogEntry]) -> String {
    serde_json::to_string_pretty(entries).expect("entries serialize")
}

/// Writes `source` to `catalog.json` inside a fresh temp dir.
pub fn write_catalog(source: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, source).expect("write catalog");
    (dir, path)
}
