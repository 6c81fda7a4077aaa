//! Service model → PlantUML class diagram source.
//!
//! Each helper is a pure function of one service. [`render`] stitches them
//! together per service, in context order.

use crate::domain::model::{Association, AssociationType, Service, ServiceContext};

/// Upper-cased `type` tag of a service; blank when the service has none.
pub fn to_upper_case(service: &Service) -> String {
    service
        .kind
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_default()
}

pub fn stereotype(service: &Service) -> Option<String> {
    service
        .stereotype
        .as_deref()
        .map(|stereotype| format!("class {} << {} >>", service.service_name, stereotype))
}

/// `class <name> extends A, B` over the `extends` associations, in order.
pub fn inherits(service: &Service) -> Option<String> {
    let parents: Vec<&str> = service
        .associations_of(&AssociationType::Extends)
        .map(|assoc| assoc.target.as_str())
        .collect();

    if parents.is_empty() {
        return None;
    }

    Some(format!(
        "class {} extends {}",
        service.service_name,
        parents.join(", ")
    ))
}

/// One line for a single association, or `None` for kinds that draw nothing.
pub fn association_line(name: &str, assoc: &Association) -> Option<String> {
    let text = assoc.text.as_deref().unwrap_or_default();

    match &assoc.association_type {
        AssociationType::Directed => Some(format!("{} -r-> {} : {}", name, assoc.target, text)),
        AssociationType::Contains => Some(format!("{} -r-* {}", name, assoc.target)),
        AssociationType::Aggregation => Some(format!(
            "{} \"{}\" -r-o \"{}\" {} : {}",
            name,
            assoc.local_multiplicity.as_deref().unwrap_or_default(),
            assoc.remote_multiplicity.as_deref().unwrap_or_default(),
            assoc.target,
            text
        )),
        AssociationType::Implements => Some(format!("{} --() {}", name, assoc.target)),
        AssociationType::Extends => Some(format!("{} -[hidden]r> {}", name, assoc.target)),
        AssociationType::Other(kind) => {
            tracing::debug!(
                "Skipping association '{}' on {}: unknown kind",
                kind,
                name
            );
            None
        }
    }
}

/// Relationship block of a service: one newline-terminated line per association.
pub fn list(service: &Service) -> String {
    let mut result = String::new();
    for assoc in &service.associations {
        if let Some(line) = association_line(&service.service_name, assoc) {
            result.push_str(&line);
            result.push('\n');
        }
    }
    result
}

pub fn render_service(service: &Service) -> String {
    let mut block = format!("' {} : {}\n", service.service_name, to_upper_case(service));

    if let Some(line) = stereotype(service) {
        block.push_str(&line);
        block.push('\n');
    }
    if let Some(line) = inherits(service) {
        block.push_str(&line);
        block.push('\n');
    }
    block.push_str(&list(service));
    block
}

pub fn render(context: &ServiceContext) -> String {
    let mut document = String::from("@startuml\n");
    document.push_str(&format!("title {} ({})\n", context.name, context.framework));

    for service in &context.services {
        document.push('\n');
        document.push_str(&render_service(service));
    }

    document.push_str("@enduml\n");
    document
}
