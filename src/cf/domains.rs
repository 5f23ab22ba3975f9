//! Entity domain catalog
//!
//! Each domain is a configuration value for the generic resource manager.

use clap::ValueEnum;

/// Immutable per-domain configuration
#[derive(Debug, PartialEq, Eq)]
pub struct DomainConfig {
    /// Singular domain name used in messages (e.g. "service_plan")
    pub name: &'static str,
    /// Collection endpoint path
    pub endpoint: &'static str,
    /// Filter fields accepted by `list`
    pub list_filters: &'static [&'static str],
    /// Entity field holding the human-readable name
    pub name_field: Option<&'static str>,
    pub allow_retrieve_by_name: bool,
    pub allow_creation: bool,
    pub allow_deletion: bool,
}

impl DomainConfig {
    /// Whether `field` may be used as a list filter; the name field is
    /// accepted whenever retrieval by name is allowed
    pub fn accepts_filter(&self, field: &str) -> bool {
        self.list_filters.contains(&field)
            || (self.allow_retrieve_by_name && self.name_field == Some(field))
    }

    /// Path of a single entity
    pub fn entity_path(&self, guid: &str) -> String {
        format!("{}/{}", self.endpoint, guid)
    }
}

pub const ORGANIZATION: DomainConfig = DomainConfig {
    name: "organization",
    endpoint: "/v2/organizations",
    list_filters: &[],
    name_field: Some("name"),
    allow_retrieve_by_name: true,
    allow_creation: true,
    allow_deletion: true,
};

pub const SPACE: DomainConfig = DomainConfig {
    name: "space",
    endpoint: "/v2/spaces",
    list_filters: &["organization_guid"],
    name_field: Some("name"),
    allow_retrieve_by_name: true,
    allow_creation: true,
    allow_deletion: true,
};

pub const APPLICATION: DomainConfig = DomainConfig {
    name: "application",
    endpoint: "/v2/apps",
    list_filters: &["organization_guid", "space_guid"],
    name_field: Some("name"),
    allow_retrieve_by_name: true,
    allow_creation: true,
    allow_deletion: true,
};

pub const SERVICE: DomainConfig = DomainConfig {
    name: "service",
    endpoint: "/v2/services",
    list_filters: &["service_broker_guid"],
    name_field: Some("label"),
    allow_retrieve_by_name: true,
    allow_creation: true,
    allow_deletion: true,
};

pub const SERVICE_PLAN: DomainConfig = DomainConfig {
    name: "service_plan",
    endpoint: "/v2/service_plans",
    list_filters: &["service_guid", "service_instance_guid", "service_broker_guid"],
    name_field: Some("name"),
    allow_retrieve_by_name: false,
    allow_creation: false,
    allow_deletion: false,
};

pub const SERVICE_INSTANCE: DomainConfig = DomainConfig {
    name: "service_instance",
    endpoint: "/v2/service_instances",
    list_filters: &["organization_guid", "space_guid", "service_plan_guid"],
    name_field: Some("name"),
    allow_retrieve_by_name: false,
    allow_creation: true,
    allow_deletion: true,
};

pub const SERVICE_BINDING: DomainConfig = DomainConfig {
    name: "service_binding",
    endpoint: "/v2/service_bindings",
    list_filters: &["app_guid", "service_instance_guid"],
    name_field: None,
    allow_retrieve_by_name: false,
    allow_creation: true,
    allow_deletion: true,
};

pub const SERVICE_BROKER: DomainConfig = DomainConfig {
    name: "service_broker",
    endpoint: "/v2/service_brokers",
    list_filters: &["name", "space_guid"],
    name_field: Some("name"),
    allow_retrieve_by_name: true,
    allow_creation: true,
    allow_deletion: true,
};

/// Entity domains exposed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Domain {
    #[value(alias = "org", alias = "organizations", alias = "orgs")]
    Organization,
    #[value(alias = "spaces")]
    Space,
    #[value(alias = "app", alias = "apps", alias = "applications")]
    Application,
    #[value(alias = "services")]
    Service,
    #[value(alias = "service-plans", alias = "plan", alias = "plans")]
    ServicePlan,
    #[value(alias = "service-instances", alias = "instance", alias = "si")]
    ServiceInstance,
    #[value(alias = "service-bindings", alias = "binding", alias = "bindings")]
    ServiceBinding,
    #[value(alias = "service-brokers", alias = "broker", alias = "brokers")]
    ServiceBroker,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Domain::Organization,
        Domain::Space,
        Domain::Application,
        Domain::Service,
        Domain::ServicePlan,
        Domain::ServiceInstance,
        Domain::ServiceBinding,
        Domain::ServiceBroker,
    ];

    pub fn config(self) -> &'static DomainConfig {
        match self {
            Domain::Organization => &ORGANIZATION,
            Domain::Space => &SPACE,
            Domain::Application => &APPLICATION,
            Domain::Service => &SERVICE,
            Domain::ServicePlan => &SERVICE_PLAN,
            Domain::ServiceInstance => &SERVICE_INSTANCE,
            Domain::ServiceBinding => &SERVICE_BINDING,
            Domain::ServiceBroker => &SERVICE_BROKER,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.config().name)
    }
}
