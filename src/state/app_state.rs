use crate::app::MenuItem;
use clutch_api::{HealthCheck, Player, PlayerProfile, SearchPlayersResponse};

pub const FIELDS_REQUIRED: &str = "Por favor completa todos los campos";
pub const PASSWORDS_DIFFER: &str = "Las contraseñas no coinciden";
pub const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";
pub const INVALID_EMAIL: &str = "Por favor ingresa un email válido";
pub const MIN_PASSWORD_LEN: usize = 6;

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub secret: bool,
}

impl FormField {
    fn new(label: &'static str, secret: bool) -> Self {
        Self { label, value: String::new(), secret }
    }

    /// What the field shows on screen; secrets are masked.
    pub fn display(&self) -> String {
        if self.secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// A fixed list of text fields with one focused at a time.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl Form {
    pub fn login() -> Self {
        Self {
            fields: vec![FormField::new("Email", false), FormField::new("Contraseña", true)],
            focused: 0,
        }
    }

    pub fn register() -> Self {
        Self {
            fields: vec![
                FormField::new("Nombre", false),
                FormField::new("Email", false),
                FormField::new("Contraseña", true),
                FormField::new("Confirmar contraseña", true),
            ],
            focused: 0,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or_default()
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focused = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn validate_login(form: &Form) -> Result<LoginInput, &'static str> {
    let email = form.value(0).trim();
    let password = form.value(1);
    if email.is_empty() || password.is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    Ok(LoginInput { email: email.to_owned(), password: password.to_owned() })
}

/// Checks run in a fixed order and the first failure wins.
pub fn validate_register(form: &Form) -> Result<RegisterInput, &'static str> {
    let name = form.value(0).trim();
    let email = form.value(1).trim();
    let password = form.value(2);
    let confirm = form.value(3);

    if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    if password != confirm {
        return Err(PASSWORDS_DIFFER);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    if !is_valid_email(email) {
        return Err(INVALID_EMAIL);
    }
    Ok(RegisterInput {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain with text on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len(),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

/// Query box plus a cursor into the search results.
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub editing: bool,
    pub selected: usize,
    /// The player the per-player operations were last run for.
    pub active_player: Option<String>,
}

impl SearchState {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Charts keep their own results; they do not share the search slot.
#[derive(Debug, Default)]
pub struct ChartsState {
    pub query: String,
    pub editing: bool,
    pub selected: usize,
    pub results: Option<SearchPlayersResponse>,
    pub selected_player: Option<Player>,
    pub profile: Option<PlayerProfile>,
    pub loading_profile: bool,
    pub searching: bool,
}

impl ChartsState {
    pub fn players(&self) -> &[Player] {
        self.results.as_ref().map(|r| r.players.as_slice()).unwrap_or_default()
    }

    pub fn select_next(&mut self) {
        let len = self.players().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Default)]
pub struct ConnectionState {
    /// `None` until the first health check settles.
    pub connected: Option<bool>,
    pub checking: bool,
    pub health: Option<HealthCheck>,
    /// Result of the explicit reachability probe on the settings screen.
    pub reachable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self { title: "Error".to_owned(), message: message.into() }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub login: Form,
    pub register: Form,
    /// An auth request is in flight; further submits are ignored.
    pub submitting: bool,
    /// Cursor into the dashboard's high-potential list.
    pub dashboard_selected: usize,
    pub search: SearchState,
    pub charts: ChartsState,
    pub connection: ConnectionState,
    pub alert: Option<Alert>,
    pub confirm_logout: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: MenuItem::Login,
            previous_tab: MenuItem::Login,
            show_logs: false,
            login: Form::login(),
            register: Form::register(),
            submitting: false,
            dashboard_selected: 0,
            search: SearchState::default(),
            charts: ChartsState::default(),
            connection: ConnectionState::default(),
            alert: None,
            confirm_logout: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a text box currently swallows printable keys.
    pub fn is_typing(&self) -> bool {
        match self.active_tab {
            MenuItem::Login | MenuItem::Register => true,
            MenuItem::Search => self.search.editing,
            MenuItem::Charts => self.charts.editing,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(mut form: Form, values: &[&str]) -> Form {
        for (field, value) in form.fields.iter_mut().zip(values) {
            field.value = (*value).to_owned();
        }
        form
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(validate_login(&filled(Form::login(), &["", "x"])), Err(FIELDS_REQUIRED));
        assert_eq!(validate_login(&filled(Form::login(), &["a@b.co", ""])), Err(FIELDS_REQUIRED));
        assert_eq!(
            validate_login(&filled(Form::login(), &["  a@b.co ", "pw"])),
            Ok(LoginInput { email: "a@b.co".into(), password: "pw".into() })
        );
    }

    #[test]
    fn register_checks_run_in_order() {
        let form = |v: &[&str]| filled(Form::register(), v);

        assert_eq!(validate_register(&form(&["Ana", "", "abc", "abc"])), Err(FIELDS_REQUIRED));
        // Mismatch is reported before length and email.
        assert_eq!(validate_register(&form(&["Ana", "bad", "abc", "abd"])), Err(PASSWORDS_DIFFER));
        assert_eq!(validate_register(&form(&["Ana", "bad", "abc", "abc"])), Err(PASSWORD_TOO_SHORT));
        assert_eq!(
            validate_register(&form(&["Ana", "bad", "secret", "secret"])),
            Err(INVALID_EMAIL)
        );
        assert_eq!(
            validate_register(&form(&["Ana", "ana@clutch.app", "secret", "secret"])),
            Ok(RegisterInput {
                name: "Ana".into(),
                email: "ana@clutch.app".into(),
                password: "secret".into(),
            })
        );
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@clutch.app"));
        assert!(is_valid_email("a.b@c.d.e"));
        assert!(!is_valid_email("ana@clutch"));
        assert!(!is_valid_email("ana@.app"));
        assert!(!is_valid_email("ana@clutch."));
        assert!(!is_valid_email("@clutch.app"));
        assert!(!is_valid_email("ana @clutch.app"));
        assert!(!is_valid_email("a@b@c.d"));
    }

    #[test]
    fn form_focus_wraps() {
        let mut form = Form::register();
        form.focus_prev();
        assert_eq!(form.focused, 3);
        form.focus_next();
        assert_eq!(form.focused, 0);
        form.push_char('x');
        form.push_char('y');
        form.pop_char();
        assert_eq!(form.value(0), "x");
        form.reset();
        assert_eq!(form.value(0), "");
    }

    #[test]
    fn secrets_are_masked() {
        let form = filled(Form::login(), &["a@b.co", "hunter2"]);
        assert_eq!(form.fields[0].display(), "a@b.co");
        assert_eq!(form.fields[1].display(), "•••••••");
    }
}
