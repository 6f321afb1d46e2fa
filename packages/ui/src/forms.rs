//! Form state for every create/edit dialog.
//!
//! Fields hold the raw text of their inputs. `validate()` checks required
//! fields and formats and produces the typed request the client sends, or the
//! per-field messages to show under the inputs.

use std::collections::BTreeMap;

use api::models::{
    CredentialRequest, IncidentPriority, IncidentRequest, LoginRequest, PaymentMethod,
    PaymentRequest, Product, ProductRequest, Stand, StandRequest, User, UserRequest,
};
use api::Role;
use chrono::NaiveDate;

const REQUIRED: &str = "Campo obligatorio";

pub const DEFAULT_VALID_DAYS: u32 = 30;
pub const MAX_VALID_DAYS: u32 = 365;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn require(&mut self, field: &'static str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, REQUIRED);
        }
        value.to_string()
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Parse a money amount typed with either `.` or `,` as decimal separator.
///
/// When both appear the last one is the decimal separator, so `S/ 1,250.50`
/// (as printed by `format_soles`) and `1.250,50` both read back. A separator
/// repeated on its own only groups thousands.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let text = raw.trim().trim_start_matches("S/").trim();
    let decimal = match (text.rfind(','), text.rfind('.')) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(_), None) if text.matches(',').count() == 1 => Some(','),
        (None, Some(_)) if text.matches('.').count() == 1 => Some('.'),
        _ => None,
    };
    let split_at = decimal.and_then(|sep| text.rfind(sep));
    let (whole, fraction) = match split_at {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };
    let mut cleaned: String = whole.chars().filter(|c| *c != ',' && *c != '.').collect();
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// `YYYY-MM` billing period.
pub fn is_valid_period(raw: &str) -> bool {
    let Some((year, month)) = raw.trim().split_once('-') else {
        return false;
    };
    year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && month.len() == 2
        && month.parse::<u32>().is_ok_and(|m| (1..=12).contains(&m))
}

fn parse_id(errors: &mut FormErrors, field: &'static str, raw: &str, required: bool) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        if required {
            errors.add(field, REQUIRED);
        }
        return None;
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Selección no válida");
            None
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let email = errors.require("email", &self.email);
        if !email.is_empty() && !is_valid_email(&email) {
            errors.add("email", "Correo no válido");
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.finish(|| LoginRequest {
            email: email.to_lowercase(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StandForm {
    pub block: String,
    pub number: String,
    pub business_name: String,
    pub category: String,
    pub description: String,
    pub phone: String,
}

impl StandForm {
    pub fn from_stand(stand: &Stand) -> Self {
        Self {
            block: stand.block.clone(),
            number: stand.number.clone(),
            business_name: stand.business_name.clone().unwrap_or_default(),
            category: stand.category.clone().unwrap_or_default(),
            description: stand.description.clone().unwrap_or_default(),
            phone: stand.phone.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<StandRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let block = errors.require("block", &self.block).to_uppercase();
        let number = errors.require("number", &self.number);
        if !number.is_empty() && !number.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.add("number", "Solo letras y números");
        }
        if !self.phone.trim().is_empty() && !is_phone(&self.phone) {
            errors.add("phone", "Teléfono no válido");
        }
        errors.finish(|| StandRequest {
            block,
            number,
            business_name: optional(&self.business_name),
            category: optional(&self.category),
            description: optional(&self.description),
            phone: optional(&self.phone),
        })
    }
}

fn is_phone(raw: &str) -> bool {
    let digits: String = raw.chars().filter(|c| !matches!(c, ' ' | '-' | '+')).collect();
    (6..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserForm {
    pub first_names: String,
    pub last_names: String,
    pub email: String,
    pub dni: String,
    pub phone: String,
    pub role: Role,
    pub password: String,
    /// Editing an existing user: an empty password keeps the current one.
    pub editing: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            first_names: String::new(),
            last_names: String::new(),
            email: String::new(),
            dni: String::new(),
            phone: String::new(),
            role: Role::Propietario,
            password: String::new(),
            editing: false,
        }
    }
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_names: user.first_names.clone(),
            last_names: user.last_names.clone().unwrap_or_default(),
            email: user.email.clone(),
            dni: user.dni.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            role: user.role,
            password: String::new(),
            editing: true,
        }
    }

    pub fn validate(&self) -> Result<UserRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let first_names = errors.require("first_names", &self.first_names);
        let last_names = errors.require("last_names", &self.last_names);
        let email = errors.require("email", &self.email);
        if !email.is_empty() && !is_valid_email(&email) {
            errors.add("email", "Correo no válido");
        }
        let dni = self.dni.trim();
        if !dni.is_empty() && (dni.len() != 8 || !dni.chars().all(|c| c.is_ascii_digit())) {
            errors.add("dni", "El DNI tiene 8 dígitos");
        }
        if !self.phone.trim().is_empty() && !is_phone(&self.phone) {
            errors.add("phone", "Teléfono no válido");
        }
        let password = if self.password.is_empty() {
            if !self.editing {
                errors.add("password", REQUIRED);
            }
            None
        } else {
            if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.add(
                    "password",
                    format!("Mínimo {MIN_PASSWORD_LEN} caracteres"),
                );
            }
            Some(self.password.clone())
        };
        errors.finish(|| UserRequest {
            first_names,
            last_names,
            email: email.to_lowercase(),
            dni: optional(&self.dni),
            phone: optional(&self.phone),
            role: self.role,
            password,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaymentForm {
    pub stand_id: String,
    pub amount: String,
    /// `YYYY-MM`
    pub period: String,
    pub method: PaymentMethod,
    /// `YYYY-MM-DD`, empty for "today on the server".
    pub paid_on: String,
    pub notes: String,
}

impl PaymentForm {
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            stand_id: String::new(),
            amount: String::new(),
            period: period.into(),
            method: PaymentMethod::Efectivo,
            paid_on: String::new(),
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> Result<PaymentRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let stand_id = parse_id(&mut errors, "stand_id", &self.stand_id, true);
        let amount = if self.amount.trim().is_empty() {
            errors.add("amount", REQUIRED);
            None
        } else {
            let parsed = parse_amount(&self.amount);
            if parsed.is_none() {
                errors.add("amount", "Monto no válido");
            }
            parsed
        };
        let period = errors.require("period", &self.period);
        if !period.is_empty() && !is_valid_period(&period) {
            errors.add("period", "Formato AAAA-MM");
        }
        let paid_on = match self.paid_on.trim() {
            "" => None,
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("paid_on", "Fecha no válida");
                    None
                }
            },
        };
        match (stand_id, amount) {
            (Some(stand_id), Some(amount)) => errors.finish(|| PaymentRequest {
                stand_id,
                amount,
                period,
                method: self.method,
                paid_on,
                notes: optional(&self.notes),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IncidentForm {
    pub title: String,
    pub description: String,
    pub priority: IncidentPriority,
    pub stand_id: String,
}

impl Default for IncidentForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: IncidentPriority::Media,
            stand_id: String::new(),
        }
    }
}

impl IncidentForm {
    pub fn validate(&self) -> Result<IncidentRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let title = errors.require("title", &self.title);
        let description = errors.require("description", &self.description);
        let stand_id = parse_id(&mut errors, "stand_id", &self.stand_id, false);
        errors.finish(|| IncidentRequest {
            title,
            description,
            priority: self.priority,
            stand_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CredentialForm {
    pub user_id: String,
    pub stand_id: String,
    pub valid_days: String,
}

impl Default for CredentialForm {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            stand_id: String::new(),
            valid_days: DEFAULT_VALID_DAYS.to_string(),
        }
    }
}

impl CredentialForm {
    pub fn validate(&self) -> Result<CredentialRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let user_id = parse_id(&mut errors, "user_id", &self.user_id, true);
        let stand_id = parse_id(&mut errors, "stand_id", &self.stand_id, false);
        let valid_days = match self.valid_days.trim().parse::<u32>() {
            Ok(days) if (1..=MAX_VALID_DAYS).contains(&days) => days,
            _ => {
                errors.add("valid_days", format!("Entre 1 y {MAX_VALID_DAYS} días"));
                DEFAULT_VALID_DAYS
            }
        };
        match user_id {
            Some(user_id) => errors.finish(|| CredentialRequest {
                user_id,
                stand_id,
                valid_days,
            }),
            None => Err(errors),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub unit: String,
    pub category: String,
    pub image_url: String,
    pub available: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            unit: "kg".to_string(),
            category: String::new(),
            image_url: String::new(),
            available: true,
        }
    }
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: format!("{:.2}", product.price),
            unit: product.unit.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
            available: product.available,
        }
    }

    pub fn validate(&self) -> Result<ProductRequest, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.require("name", &self.name);
        let price = if self.price.trim().is_empty() {
            errors.add("price", REQUIRED);
            0.0
        } else {
            parse_amount(&self.price).unwrap_or_else(|| {
                errors.add("price", "Precio no válido");
                0.0
            })
        };
        let image_url = optional(&self.image_url);
        if let Some(url) = &image_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.add("image_url", "Debe empezar con http:// o https://");
            }
        }
        errors.finish(|| ProductRequest {
            name,
            description: optional(&self.description),
            price,
            unit: optional(&self.unit),
            category: optional(&self.category),
            image_url,
            available: self.available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ana@mercado.pe", true)]
    #[case(" ana@mercado.pe ", true)]
    #[case("ana@mercado", false)]
    #[case("@mercado.pe", false)]
    #[case("ana mercado@x.pe", false)]
    #[case("ana@@x.pe", false)]
    #[case("", false)]
    fn test_email_format(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[rstest]
    #[case("350", Some(350.0))]
    #[case("350,50", Some(350.5))]
    #[case("S/ 12.5", Some(12.5))]
    #[case("S/ 1,250.50", Some(1250.5))]
    #[case("1.250,50", Some(1250.5))]
    #[case("1,234,567", Some(1_234_567.0))]
    #[case("1.2.3,4", Some(123.4))]
    #[case("1,25a", None)]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("abc", None)]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_amount(raw), expected);
    }

    #[test]
    fn test_parse_amount_reads_displayed_soles() {
        let shown = api::models::format_soles(1_250.5);
        assert_eq!(parse_amount(&shown), Some(1_250.5));
    }

    #[rstest]
    #[case("2024-05", true)]
    #[case("2024-12", true)]
    #[case("2024-13", false)]
    #[case("2024-5", false)]
    #[case("24-05", false)]
    fn test_period_format(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(is_valid_period(raw), expected);
    }

    #[test]
    fn test_login_form_requires_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert!(errors.has("email"));
        assert!(errors.has("password"));

        let request = LoginForm {
            email: " Admin@Mercado.pe ".into(),
            password: "secreto".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(request.email, "admin@mercado.pe");
    }

    #[test]
    fn test_stand_form_builds_request() {
        let form = StandForm {
            block: "a".into(),
            number: "12".into(),
            business_name: "  Rosita ".into(),
            ..Default::default()
        };
        let request = form.validate().unwrap();
        assert_eq!(request.block, "A");
        assert_eq!(request.business_name.as_deref(), Some("Rosita"));
        assert!(request.category.is_none());

        let errors = StandForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("block").as_deref(), Some(REQUIRED));
    }

    #[test]
    fn test_user_form_password_rules() {
        let form = UserForm {
            first_names: "Luis".into(),
            last_names: "Mamani".into(),
            email: "luis@mercado.pe".into(),
            dni: "4567".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("password"));
        assert!(errors.has("dni"));

        let editing = UserForm {
            dni: "45678912".into(),
            editing: true,
            ..form.clone()
        };
        let request = editing.validate().unwrap();
        assert!(request.password.is_none());
        assert_eq!(request.role, Role::Propietario);

        let short = UserForm {
            password: "abc".into(),
            ..editing
        };
        assert!(short.validate().unwrap_err().has("password"));
    }

    #[test]
    fn test_payment_form() {
        let mut form = PaymentForm::new("2024-05");
        form.stand_id = "4".into();
        form.amount = "350,00".into();
        form.paid_on = "2024-05-10".into();
        let request = form.validate().unwrap();
        assert_eq!(request.stand_id, 4);
        assert_eq!(request.amount, 350.0);
        assert_eq!(request.paid_on, NaiveDate::from_ymd_opt(2024, 5, 10));

        form.period = "mayo".into();
        form.paid_on = "10/05/2024".into();
        form.stand_id = String::new();
        let errors = form.validate().unwrap_err();
        assert!(errors.has("period"));
        assert!(errors.has("paid_on"));
        assert!(errors.has("stand_id"));
    }

    #[test]
    fn test_incident_form_optional_stand() {
        let form = IncidentForm {
            title: "Fuga".into(),
            description: "Agua en el pasillo".into(),
            ..Default::default()
        };
        let request = form.validate().unwrap();
        assert!(request.stand_id.is_none());
        assert_eq!(request.priority, IncidentPriority::Media);

        let bad = IncidentForm {
            stand_id: "x".into(),
            ..form
        };
        assert!(bad.validate().unwrap_err().has("stand_id"));
    }

    #[rstest]
    #[case("30", true)]
    #[case("365", true)]
    #[case("0", false)]
    #[case("366", false)]
    #[case("", false)]
    fn test_credential_validity_range(#[case] days: &str, #[case] ok: bool) {
        let form = CredentialForm {
            user_id: "7".into(),
            stand_id: String::new(),
            valid_days: days.into(),
        };
        assert_eq!(form.validate().is_ok(), ok);
    }

    #[test]
    fn test_credential_form_defaults() {
        let form = CredentialForm::default();
        assert_eq!(form.valid_days, "30");
        assert!(form.validate().unwrap_err().has("user_id"));
    }

    #[test]
    fn test_product_form() {
        let form = ProductForm {
            name: "Papa".into(),
            price: "4,50".into(),
            image_url: "ftp://x".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("image_url"));
        assert!(!errors.has("price"));

        let ok = ProductForm {
            image_url: "https://img.pe/papa.png".into(),
            ..form
        };
        let request = ok.validate().unwrap();
        assert_eq!(request.price, 4.5);
        assert_eq!(request.unit.as_deref(), Some("kg"));
    }
}
