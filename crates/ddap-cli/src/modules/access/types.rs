/// What the caller wants access to: a role on a resource view, or a single
/// interface in the simplified mode.
#[derive(Debug, Clone)]
pub(crate) enum AccessTarget {
    ResourceView {
        resource: String,
        view: String,
        role: String,
    },
    Interface {
        interface_id: String,
    },
}

impl AccessTarget {
    /// The resource path embedded in authorize/callback/status URLs. For a
    /// view target the path is scoped to the owning DAM instance.
    pub(crate) fn resource_path(&self, dam_id: &str) -> String {
        match self {
            AccessTarget::ResourceView {
                resource,
                view,
                role,
            } => format!("{dam_id};{resource}/views/{view}/roles/{role}"),
            AccessTarget::Interface { interface_id } => interface_id.clone(),
        }
    }

    pub(crate) fn description(&self) -> String {
        match self {
            AccessTarget::ResourceView {
                resource,
                view,
                role,
            } => format!("{resource}/{view}/{role}"),
            AccessTarget::Interface { interface_id } => interface_id.clone(),
        }
    }
}
