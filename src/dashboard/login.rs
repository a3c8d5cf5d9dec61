//! Landing page: role selection.

use tracing::info;

use crate::core::{
    persisted::Persisted,
    role::{Role, Route, USER_ROLE_KEY, parse_stored_role},
    storage::KeyValueStore,
};

/// Role-selection screen bound to the stored `userRole` value.
#[derive(Debug)]
pub struct LoginPage<S> {
    role: Persisted<String, S>,
}

impl<S: KeyValueStore> LoginPage<S> {
    /// Loads the stored role, if any.
    pub async fn load(store: S) -> Self {
        Self {
            role: Persisted::load(store, USER_ROLE_KEY, String::new()).await,
        }
    }

    /// Role currently stored, if it is a known one.
    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        parse_stored_role(self.role.get())
    }

    /// Screen the stored role leads to.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::for_role(self.current_role())
    }

    /// Stores `role` and returns the dashboard it leads to.
    pub async fn select_role(&mut self, role: Role) -> Route {
        self.role.set(role.as_str().to_string()).await;
        let route = Route::for_role(Some(role));
        info!("Role set to {role}, navigating to {}", route.path());
        route
    }

    /// Forgets the stored role.
    pub async fn logout(&mut self) {
        self.role.set(String::new()).await;
    }

    /// Text of the landing screen.
    #[must_use]
    pub fn render(&self) -> String {
        let current = self
            .current_role()
            .map_or_else(|| "ninguno".to_string(), |r| r.to_string());
        format!(
            "Integración GHL + Mercado Pago\n\
             Selecciona tu rol para continuar:\n\
             \x20 client - Panel de Cliente\n\
             \x20 admin  - Panel de Administración\n\
             Rol actual: {current}"
        )
    }
}
