use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CONTEXT_NAME: &str = "default";

/// Labels this crate does not recognize fall back to the default framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Framework {
    #[default]
    Grpc,
    Rest,
    Wcf,
    Custom,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::Grpc,
        Framework::Rest,
        Framework::Wcf,
        Framework::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Framework::Grpc => "gRPC",
            Framework::Rest => "REST",
            Framework::Wcf => "WCF",
            Framework::Custom => "Custom",
        }
    }
}

impl From<String> for Framework {
    fn from(value: String) -> Self {
        Framework::ALL
            .into_iter()
            .find(|framework| framework.label() == value)
            .unwrap_or_default()
    }
}

impl From<Framework> for String {
    fn from(value: Framework) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of relationship an association draws.
///
/// Kinds this crate does not know are kept verbatim in `Other` so that a
/// persisted document survives a load/save cycle; they render as nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssociationType {
    Directed,
    Contains,
    Aggregation,
    Implements,
    Extends,
    Other(String),
}

impl AssociationType {
    pub const KNOWN: [AssociationType; 5] = [
        AssociationType::Directed,
        AssociationType::Contains,
        AssociationType::Aggregation,
        AssociationType::Implements,
        AssociationType::Extends,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AssociationType::Directed => "directed",
            AssociationType::Contains => "contains",
            AssociationType::Aggregation => "aggregation",
            AssociationType::Implements => "implements",
            AssociationType::Extends => "extends",
            AssociationType::Other(kind) => kind,
        }
    }

    pub fn uses_text(&self) -> bool {
        matches!(self, AssociationType::Directed | AssociationType::Aggregation)
    }

    pub fn uses_multiplicity(&self) -> bool {
        matches!(self, AssociationType::Aggregation)
    }
}

impl From<String> for AssociationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "directed" => AssociationType::Directed,
            "contains" => AssociationType::Contains,
            "aggregation" => AssociationType::Aggregation,
            "implements" => AssociationType::Implements,
            "extends" => AssociationType::Extends,
            _ => AssociationType::Other(value),
        }
    }
}

impl From<AssociationType> for String {
    fn from(value: AssociationType) -> Self {
        match value {
            AssociationType::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AssociationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Association {
    #[serde(default = "missing_association_type")]
    pub association_type: AssociationType,
    #[serde(rename = "type", default)]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_multiplicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_multiplicity: Option<String>,
}

fn missing_association_type() -> AssociationType {
    AssociationType::Other(String::new())
}

impl Association {
    pub fn new(association_type: AssociationType, target: impl Into<String>) -> Self {
        Self {
            association_type,
            target: target.into(),
            text: None,
            local_multiplicity: None,
            remote_multiplicity: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_multiplicity(mut self, local: impl Into<String>, remote: impl Into<String>) -> Self {
        self.local_multiplicity = Some(local.into());
        self.remote_multiplicity = Some(remote.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stereotype: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<Association>,
}

impl Service {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            kind: None,
            stereotype: None,
            associations: Vec::new(),
        }
    }

    pub fn with_association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    /// Associations of the given kind, in insertion order.
    pub fn associations_of<'a>(
        &'a self,
        kind: &'a AssociationType,
    ) -> impl Iterator<Item = &'a Association> + 'a {
        self.associations
            .iter()
            .filter(move |assoc| &assoc.association_type == kind)
    }
}

/// Root of the model. Owns its services; service names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContext {
    #[serde(rename = "serviceContextName", default = "default_context_name")]
    pub name: String,
    #[serde(rename = "serviceContextFramework", default)]
    pub framework: Framework,
    #[serde(default)]
    pub services: Vec<Service>,
}

fn default_context_name() -> String {
    DEFAULT_CONTEXT_NAME.to_string()
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_NAME, Framework::default())
    }
}

impl ServiceContext {
    /// An empty name falls back to `"default"`.
    pub fn new(name: impl Into<String>, framework: Framework) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            default_context_name()
        } else {
            name
        };

        Self {
            name,
            framework,
            services: Vec::new(),
        }
    }

    pub fn find_service(&self, service_name: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|service| service.service_name == service_name)
    }

    pub fn find_service_mut(&mut self, service_name: &str) -> Option<&mut Service> {
        self.services
            .iter_mut()
            .find(|service| service.service_name == service_name)
    }

    /// Appends `service` unless one with the same name exists.
    /// Returns whether the context changed.
    pub fn add_service(&mut self, service: Service) -> bool {
        if self.find_service(&service.service_name).is_some() {
            return false;
        }
        self.services.push(service);
        true
    }

    /// Consuming form of [`ServiceContext::add_service`].
    pub fn with_service(mut self, service: Service) -> Self {
        self.add_service(service);
        self
    }

    pub fn service_names(&self) -> Vec<&str> {
        self.services
            .iter()
            .map(|service| service.service_name.as_str())
            .collect()
    }
}

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListServices,
    AddService,
    ManageService,
    Exit,
    Help,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::ListServices,
        MenuChoice::AddService,
        MenuChoice::ManageService,
        MenuChoice::Exit,
        MenuChoice::Help,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::ListServices => "List Services",
            MenuChoice::AddService => "Add Service",
            MenuChoice::ManageService => "Manage Service",
            MenuChoice::Exit => "Exit",
            MenuChoice::Help => "Help",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_service_is_idempotent() {
        let mut context = ServiceContext::new("Orders", Framework::Rest)
            .with_service(Service::new("Order"))
            .with_service(Service::new("Customer"));
        let before = context.clone();

        assert!(!context.add_service(Service::new("Order")));
        assert_eq!(context, before);

        assert!(context.add_service(Service::new("Invoice")));
        assert_eq!(context.service_names(), vec!["Order", "Customer", "Invoice"]);
    }

    #[test]
    fn test_duplicate_add_keeps_existing_entry() {
        let mut original = Service::new("Order");
        original.stereotype = Some("Entity".to_string());
        let mut context = ServiceContext::default().with_service(original.clone());

        context.add_service(Service::new("Order"));

        assert_eq!(context.services.len(), 1);
        assert_eq!(context.services[0], original);
    }

    #[test]
    fn test_empty_name_falls_back_to_default() {
        let context = ServiceContext::new("  ", Framework::Wcf);
        assert_eq!(context.name, "default");
        assert_eq!(context.framework, Framework::Wcf);
    }

    #[test]
    fn test_document_keys() {
        let context = ServiceContext::new("Orders", Framework::Rest).with_service(
            Service::new("Order").with_association(
                Association::new(AssociationType::Aggregation, "Customer")
                    .with_text("places")
                    .with_multiplicity("1", "0..*"),
            ),
        );

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["serviceContextName"], "Orders");
        assert_eq!(json["serviceContextFramework"], "REST");
        let assoc = &json["services"][0]["associations"][0];
        assert_eq!(json["services"][0]["serviceName"], "Order");
        assert_eq!(assoc["associationType"], "aggregation");
        assert_eq!(assoc["type"], "Customer");
        assert_eq!(assoc["localMultiplicity"], "1");
        assert_eq!(assoc["remoteMultiplicity"], "0..*");
        assert!(json["services"][0].get("stereotype").is_none());
    }

    #[test]
    fn test_unknown_association_kind_is_preserved() {
        let json = r#"{"associationType":"depends","type":"Clock"}"#;
        let assoc: Association = serde_json::from_str(json).unwrap();
        assert_eq!(
            assoc.association_type,
            AssociationType::Other("depends".to_string())
        );

        let back = serde_json::to_value(&assoc).unwrap();
        assert_eq!(back["associationType"], "depends");
    }

    #[test]
    fn test_missing_fields_fall_back_instead_of_failing() {
        let json = r#"{"serviceContextName":"Billing","serviceContextFramework":"SOAP","services":[{"serviceName":"Invoice","associations":[{"type":"IPayable"}]}]}"#;
        let context: ServiceContext = serde_json::from_str(json).unwrap();

        assert_eq!(context.framework, Framework::Grpc);
        assert_eq!(
            context.services[0].associations[0].association_type,
            AssociationType::Other(String::new())
        );
    }

    #[test]
    fn test_minimal_document_is_accepted() {
        let json = r#"{"serviceContextName":"Orders","serviceContextFramework":"gRPC","services":[{"serviceName":"Order"}]}"#;
        let context: ServiceContext = serde_json::from_str(json).unwrap();
        assert_eq!(context.framework, Framework::Grpc);
        assert!(context.services[0].associations.is_empty());
    }
}
