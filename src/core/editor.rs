//! Interactive construction of the service model.
//!
//! [`Editor`] is the pure state machine: selections in, states out.
//! [`MenuSession`] drives it with a [`Prompter`] and persists every committed
//! change through a [`ModelStore`].

use crate::core::render;
use crate::core::store::ModelStore;
use crate::domain::model::{Association, AssociationType, MenuChoice, Service, ServiceContext};
use crate::domain::ports::{Prompter, Storage};
use crate::utils::error::Result;

const DEFAULT_SERVICE_NAME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    ListServices,
    AddService,
    ManageService,
    Terminal,
}

/// What the driving loop should do after one `show_current` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceAction {
    AddAssociation,
    SetStereotype,
    SetType,
    Back,
}

impl ServiceAction {
    const ALL: [ServiceAction; 4] = [
        ServiceAction::AddAssociation,
        ServiceAction::SetStereotype,
        ServiceAction::SetType,
        ServiceAction::Back,
    ];

    fn label(&self) -> &'static str {
        match self {
            ServiceAction::AddAssociation => "Add Association",
            ServiceAction::SetStereotype => "Set Stereotype",
            ServiceAction::SetType => "Set Type",
            ServiceAction::Back => "Back",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    context: ServiceContext,
    state: MenuState,
}

impl Editor {
    pub fn new(context: ServiceContext) -> Self {
        Self {
            context,
            state: MenuState::Main,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn context(&self) -> &ServiceContext {
        &self.context
    }

    pub fn into_context(self) -> ServiceContext {
        self.context
    }

    /// Applies a main-menu selection. `Help` leaves the state alone and the
    /// terminal state is absorbing.
    pub fn step(&mut self, choice: MenuChoice) -> MenuState {
        if self.state == MenuState::Terminal {
            return self.state;
        }

        self.state = match choice {
            MenuChoice::Help => self.state,
            MenuChoice::Exit => MenuState::Terminal,
            MenuChoice::ListServices => MenuState::ListServices,
            MenuChoice::AddService => MenuState::AddService,
            MenuChoice::ManageService => MenuState::ManageService,
        };
        self.state
    }

    pub fn return_to_main(&mut self) {
        if self.state != MenuState::Terminal {
            self.state = MenuState::Main;
        }
    }

    /// Adds a service by name and returns to `Main`. A name that is already
    /// taken leaves the model untouched.
    pub fn add_service(&mut self, service_name: &str) -> bool {
        let added = self.context.add_service(Service::new(service_name));
        if added {
            tracing::info!("Added service '{}'", service_name);
        } else {
            tracing::debug!("Service '{}' already exists, keeping it", service_name);
        }
        self.return_to_main();
        added
    }

    pub fn add_association(&mut self, service_name: &str, association: Association) -> bool {
        match self.context.find_service_mut(service_name) {
            Some(service) => {
                tracing::info!(
                    "Added {} association {} -> {}",
                    association.association_type,
                    service_name,
                    association.target
                );
                service.associations.push(association);
                true
            }
            None => false,
        }
    }

    pub fn set_stereotype(&mut self, service_name: &str, stereotype: Option<String>) -> bool {
        match self.context.find_service_mut(service_name) {
            Some(service) => {
                service.stereotype = stereotype;
                true
            }
            None => false,
        }
    }

    pub fn set_kind(&mut self, service_name: &str, kind: Option<String>) -> bool {
        match self.context.find_service_mut(service_name) {
            Some(service) => {
                service.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self.state {
            MenuState::Main => {
                "List Services shows the modeled services.\n\
                 Add Service creates a service (existing names are kept as they are).\n\
                 Manage Service edits associations, stereotype and type of a service.\n\
                 Exit ends editing and generates the diagram."
            }
            MenuState::ListServices => "Services are shown in the order they were added.",
            MenuState::AddService => "Enter a name that is not used by another service.",
            MenuState::ManageService => {
                "Associations: directed, contains, aggregation, implements, extends.\n\
                 Only directed and aggregation carry a label; aggregation also has multiplicities."
            }
            MenuState::Terminal => "Editing finished.",
        }
    }

    pub fn service_listing(&self) -> String {
        if self.context.services.is_empty() {
            return "No services defined yet.".to_string();
        }

        let mut listing = String::new();
        for service in &self.context.services {
            listing.push_str(&format!("- {}", service.service_name));
            if let Some(kind) = &service.kind {
                listing.push_str(&format!(" [{}]", kind));
            }
            if let Some(stereotype) = &service.stereotype {
                listing.push_str(&format!(" << {} >>", stereotype));
            }
            listing.push('\n');
            for line in render::list(service).lines() {
                listing.push_str(&format!("    {}\n", line));
            }
        }
        listing
    }
}

pub struct MenuSession<'a, P: Prompter, S: Storage> {
    editor: Editor,
    prompter: &'a mut P,
    store: &'a ModelStore<S>,
}

impl<'a, P: Prompter, S: Storage> MenuSession<'a, P, S> {
    pub fn new(context: ServiceContext, prompter: &'a mut P, store: &'a ModelStore<S>) -> Self {
        Self {
            editor: Editor::new(context),
            prompter,
            store,
        }
    }

    pub fn into_context(self) -> ServiceContext {
        self.editor.into_context()
    }

    /// Runs `show_current` until the user exits.
    pub async fn run(&mut self) -> Result<()> {
        while self.show_current().await? == Flow::Continue {}
        Ok(())
    }

    pub async fn show_current(&mut self) -> Result<Flow> {
        match self.editor.state() {
            MenuState::Main => self.menu().await,
            MenuState::Terminal => Ok(Flow::Exit),
            _ => {
                self.prompter.say(self.editor.help_text())?;
                self.editor.return_to_main();
                Ok(Flow::Continue)
            }
        }
    }

    async fn menu(&mut self) -> Result<Flow> {
        let labels: Vec<&str> = MenuChoice::ALL.iter().map(|choice| choice.label()).collect();
        let help_index = MenuChoice::ALL.len() - 1;
        let index = self
            .prompter
            .select("What would you like to do?", &labels, help_index)?;
        let choice = MenuChoice::ALL
            .get(index)
            .copied()
            .unwrap_or(MenuChoice::Help);
        tracing::debug!("Menu selection: {}", choice.label());

        match self.editor.step(choice) {
            MenuState::Terminal => return Ok(Flow::Exit),
            MenuState::Main => {
                self.prompter.say(self.editor.help_text())?;
            }
            MenuState::ListServices => {
                let listing = self.editor.service_listing();
                self.prompter.say(&listing)?;
                self.editor.return_to_main();
            }
            MenuState::AddService => self.add_service().await?,
            MenuState::ManageService => {
                self.manage_service().await?;
                self.editor.return_to_main();
            }
        }

        Ok(Flow::Continue)
    }

    async fn add_service(&mut self) -> Result<()> {
        let name = self
            .prompter
            .input("What is the name of your service?", DEFAULT_SERVICE_NAME)?;
        self.editor.add_service(&name);
        self.store.save(self.editor.context()).await
    }

    async fn manage_service(&mut self) -> Result<()> {
        let names: Vec<String> = self
            .editor
            .context()
            .service_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            self.prompter.say("No services defined yet.")?;
            return Ok(());
        }

        let mut choices: Vec<&str> = names.iter().map(String::as_str).collect();
        choices.push(ServiceAction::Back.label());
        let index = self
            .prompter
            .select("Which service do you want to manage?", &choices, 0)?;
        let Some(service_name) = names.get(index) else {
            return Ok(());
        };

        let actions: Vec<&str> = ServiceAction::ALL.iter().map(|a| a.label()).collect();
        loop {
            let index = self.prompter.select(
                &format!("What would you like to change on {}?", service_name),
                &actions,
                ServiceAction::ALL.len() - 1,
            )?;
            let action = ServiceAction::ALL
                .get(index)
                .copied()
                .unwrap_or(ServiceAction::Back);

            let changed = match action {
                ServiceAction::Back => break,
                ServiceAction::AddAssociation => self.add_association(service_name)?,
                ServiceAction::SetStereotype => {
                    let current = self.current_field(service_name, |s| s.stereotype.clone());
                    let stereotype =
                        self.prompter.input("Stereotype (empty to clear)", &current)?;
                    self.editor.set_stereotype(service_name, non_empty(stereotype))
                }
                ServiceAction::SetType => {
                    let current = self.current_field(service_name, |s| s.kind.clone());
                    let kind = self.prompter.input("Type (empty to clear)", &current)?;
                    self.editor.set_kind(service_name, non_empty(kind))
                }
            };

            if changed {
                self.store.save(self.editor.context()).await?;
            }
        }

        Ok(())
    }

    fn current_field(
        &self,
        service_name: &str,
        field: impl Fn(&Service) -> Option<String>,
    ) -> String {
        self.editor
            .context()
            .find_service(service_name)
            .and_then(field)
            .unwrap_or_default()
    }

    fn add_association(&mut self, service_name: &str) -> Result<bool> {
        let known = AssociationType::KNOWN;
        let kinds: Vec<&str> = known.iter().map(|k| k.as_str()).collect();
        let index = self.prompter.select("Association type", &kinds, 0)?;
        let Some(kind) = known.get(index).cloned() else {
            return Ok(false);
        };

        let target = self.prompter.input("Target type", "")?;
        if target.trim().is_empty() {
            self.prompter.say("An association needs a target type.")?;
            return Ok(false);
        }

        let mut association = Association::new(kind.clone(), target.trim());
        if kind.uses_text() {
            association.text = Some(self.prompter.input("Label", "")?);
        }
        if kind.uses_multiplicity() {
            let local = self.prompter.input("Local multiplicity", "1")?;
            let remote = self.prompter.input("Remote multiplicity", "0..*")?;
            association = association.with_multiplicity(local, remote);
        }

        Ok(self.editor.add_association(service_name, association))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
