//! Client-side filtering and sorting of lists already fetched from the backend.
//!
//! Text matching folds case and Spanish accents, splits the query on
//! whitespace and requires every term to appear somewhere in the record.
//! An empty query matches everything.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use api::models::{
    Incident, IncidentPriority, IncidentStatus, Payment, PaymentStatus, Product, QrCredential,
    Stand, StandMapItem, StandStatus, User,
};
use api::Role;

use crate::stand_grid::natural_cmp;

/// Lowercase and strip the accents used in Spanish text.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// A record that can be matched against a free-text query.
pub trait Searchable {
    /// Text fields the query is matched against.
    fn haystack(&self) -> Vec<String>;
}

pub fn matches_query<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    let query = normalize(query);
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return true;
    }
    let haystack = normalize(&item.haystack().join(" "));
    terms.iter().all(|term| haystack.contains(term))
}

pub fn filter_by_text<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_query(*item, query))
        .cloned()
        .collect()
}

fn opt(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

impl Searchable for Stand {
    fn haystack(&self) -> Vec<String> {
        vec![
            self.code(),
            opt(&self.business_name),
            opt(&self.category),
            opt(&self.owner_name),
        ]
    }
}

impl Searchable for StandMapItem {
    fn haystack(&self) -> Vec<String> {
        vec![self.code(), opt(&self.business_name), opt(&self.category)]
    }
}

impl Searchable for User {
    fn haystack(&self) -> Vec<String> {
        vec![
            self.full_name(),
            self.email.clone(),
            opt(&self.dni),
            opt(&self.phone),
        ]
    }
}

impl Searchable for Incident {
    fn haystack(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            opt(&self.description),
            opt(&self.stand_code),
            opt(&self.assignee_name),
            opt(&self.reported_by),
        ]
    }
}

impl Searchable for Payment {
    fn haystack(&self) -> Vec<String> {
        vec![opt(&self.stand_code), self.period.clone(), opt(&self.notes)]
    }
}

impl Searchable for QrCredential {
    fn haystack(&self) -> Vec<String> {
        vec![self.code.clone(), opt(&self.user_name), opt(&self.stand_code)]
    }
}

impl Searchable for Product {
    fn haystack(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            opt(&self.description),
            opt(&self.category),
            opt(&self.stand_name),
            opt(&self.stand_code),
        ]
    }
}

pub fn filter_stands(stands: &[Stand], query: &str, status: Option<StandStatus>) -> Vec<Stand> {
    stands
        .iter()
        .filter(|s| status.map_or(true, |st| s.status == st))
        .filter(|s| matches_query(*s, query))
        .cloned()
        .collect()
}

/// Map filter: text plus an optional category (`rubro`), compared accent-insensitively.
pub fn filter_map_items(
    items: &[StandMapItem],
    query: &str,
    category: Option<&str>,
) -> Vec<StandMapItem> {
    let category = category.map(normalize).filter(|c| !c.is_empty());
    items
        .iter()
        .filter(|item| match &category {
            Some(wanted) => item
                .category
                .as_deref()
                .is_some_and(|c| normalize(c.trim()) == *wanted),
            None => true,
        })
        .filter(|item| matches_query(*item, query))
        .cloned()
        .collect()
}

pub fn filter_users(users: &[User], query: &str, role: Option<Role>) -> Vec<User> {
    users
        .iter()
        .filter(|u| role.map_or(true, |r| u.role == r))
        .filter(|u| matches_query(*u, query))
        .cloned()
        .collect()
}

pub fn filter_incidents(
    incidents: &[Incident],
    query: &str,
    status: Option<IncidentStatus>,
    priority: Option<IncidentPriority>,
) -> Vec<Incident> {
    incidents
        .iter()
        .filter(|i| status.map_or(true, |s| i.status == s))
        .filter(|i| priority.map_or(true, |p| i.priority == p))
        .filter(|i| matches_query(*i, query))
        .cloned()
        .collect()
}

pub fn filter_payments(
    payments: &[Payment],
    query: &str,
    status: Option<PaymentStatus>,
) -> Vec<Payment> {
    payments
        .iter()
        .filter(|p| status.map_or(true, |s| p.status == s))
        .filter(|p| matches_query(*p, query))
        .cloned()
        .collect()
}

pub fn filter_credentials(
    credentials: &[QrCredential],
    query: &str,
    active_only: bool,
) -> Vec<QrCredential> {
    credentials
        .iter()
        .filter(|c| !active_only || c.active)
        .filter(|c| matches_query(*c, query))
        .cloned()
        .collect()
}

pub fn filter_products(
    products: &[Product],
    query: &str,
    category: Option<&str>,
    available_only: bool,
) -> Vec<Product> {
    let category = category.map(normalize).filter(|c| !c.is_empty());
    products
        .iter()
        .filter(|p| !available_only || p.available)
        .filter(|p| match &category {
            Some(wanted) => p
                .category
                .as_deref()
                .is_some_and(|c| normalize(c.trim()) == *wanted),
            None => true,
        })
        .filter(|p| matches_query(*p, query))
        .cloned()
        .collect()
}

/// Distinct non-empty categories, sorted, first spelling wins.
pub fn categories_of<'a>(categories: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for category in categories.into_iter().flatten() {
        let category = category.trim();
        if !category.is_empty() && seen.insert(normalize(category)) {
            out.push(category.to_string());
        }
    }
    out.sort_by_key(|c| normalize(c));
    out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StandSort {
    #[default]
    Code,
    Name,
    Status,
}

pub fn sort_stands(stands: &mut [Stand], sort: StandSort) {
    stands.sort_by(|a, b| match sort {
        StandSort::Code => by_code(a, b),
        StandSort::Name => normalize(&a.title())
            .cmp(&normalize(&b.title()))
            .then_with(|| by_code(a, b)),
        StandSort::Status => a
            .status
            .as_str()
            .cmp(b.status.as_str())
            .then_with(|| by_code(a, b)),
    });
}

fn by_code(a: &Stand, b: &Stand) -> Ordering {
    natural_cmp(&a.block, &b.block).then_with(|| natural_cmp(&a.number, &b.number))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
}

pub fn sort_products(products: &mut [Product], sort: ProductSort) {
    products.sort_by(|a, b| match sort {
        ProductSort::Name => normalize(&a.name).cmp(&normalize(&b.name)),
        ProductSort::PriceAsc => a.price.total_cmp(&b.price),
        ProductSort::PriceDesc => b.price.total_cmp(&a.price),
    });
}

/// Most urgent first, then newest.
pub fn sort_incidents(incidents: &mut [Incident]) {
    fn rank(p: IncidentPriority) -> u8 {
        match p {
            IncidentPriority::Critica => 0,
            IncidentPriority::Alta => 1,
            IncidentPriority::Media => 2,
            IncidentPriority::Baja => 3,
        }
    }
    incidents.sort_by(|a, b| {
        b.status
            .is_open()
            .cmp(&a.status.is_open())
            .then_with(|| rank(a.priority).cmp(&rank(b.priority)))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Records with a backend id.
pub trait HasId {
    fn id(&self) -> i64;
}

macro_rules! has_id {
    ($($ty:ty),+) => {
        $(impl HasId for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })+
    };
}

has_id!(Stand, User, Incident, Payment, QrCredential, Product);

/// Replace the record with the same id, or prepend it when missing.
pub fn replace_item<T: HasId>(items: &mut Vec<T>, item: T) {
    match items.iter().position(|existing| existing.id() == item.id()) {
        Some(i) => items[i] = item,
        None => items.insert(0, item),
    }
}

pub fn remove_item<T: HasId>(items: &mut Vec<T>, id: i64) {
    items.retain(|existing| existing.id() != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stand(id: i64, block: &str, number: &str, name: &str, status: StandStatus) -> Stand {
        Stand {
            id,
            block: block.into(),
            number: number.into(),
            business_name: Some(name.into()),
            category: Some("Frutas".into()),
            status,
            owner_id: None,
            owner_name: Some("José Peña".into()),
            description: None,
            phone: None,
        }
    }

    fn user(id: i64, name: &str, role: Role) -> User {
        User {
            id,
            first_names: name.into(),
            last_names: None,
            email: format!("{}@mercado.pe", name.to_lowercase()),
            dni: None,
            phone: None,
            role,
            active: true,
        }
    }

    fn product(id: i64, name: &str, price: f64, category: &str) -> Product {
        Product {
            id,
            name: name.into(),
            description: None,
            price,
            unit: None,
            category: Some(category.into()),
            image_url: None,
            available: true,
            stand_id: None,
            stand_code: None,
            stand_name: None,
        }
    }

    #[rstest]
    #[case("Jose", true)]
    #[case("PEÑA", true)]
    #[case("pena a-1", true)]
    #[case("frutas rosita", true)]
    #[case("verduras", false)]
    #[case("", true)]
    #[case("   ", true)]
    fn test_stand_text_match(#[case] query: &str, #[case] expected: bool) {
        let s = stand(1, "A", "1", "Frutería Rosita", StandStatus::Activo);
        assert_eq!(matches_query(&s, query), expected);
    }

    #[test]
    fn test_normalize_folds_accents_and_case() {
        assert_eq!(normalize("Crítica ÑANDÚ"), "critica nandu");
    }

    #[test]
    fn test_filter_stands_combines_status_and_text() {
        let stands = vec![
            stand(1, "A", "1", "Rosita", StandStatus::Activo),
            stand(2, "A", "2", "Rosita II", StandStatus::Clausurado),
            stand(3, "B", "1", "Don Pepe", StandStatus::Activo),
        ];
        let found = filter_stands(&stands, "rosita", Some(StandStatus::Activo));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
        assert_eq!(filter_stands(&stands, "", None).len(), 3);
    }

    #[test]
    fn test_filter_users_by_role() {
        let users = vec![
            user(1, "Ana", Role::Admin),
            user(2, "Luis", Role::Propietario),
            user(3, "Lucia", Role::Propietario),
        ];
        let owners = filter_users(&users, "", Some(Role::Propietario));
        assert_eq!(owners.len(), 2);
        let found = filter_users(&users, "luc", Some(Role::Propietario));
        assert_eq!(found[0].id, 3);
        assert!(filter_users(&users, "ana", Some(Role::Cliente)).is_empty());
    }

    #[test]
    fn test_filter_products_by_category_and_availability() {
        let mut products = vec![
            product(1, "Plátano", 3.0, "Frutas"),
            product(2, "Papa", 2.0, "Tubérculos"),
            product(3, "Mango", 5.0, "frutas"),
        ];
        products[2].available = false;
        assert_eq!(filter_products(&products, "", Some("FRUTAS"), false).len(), 2);
        assert_eq!(filter_products(&products, "", Some("frutas"), true).len(), 1);
        assert_eq!(filter_products(&products, "platano", None, false)[0].id, 1);
        assert_eq!(filter_products(&products, "", Some(""), false).len(), 3);
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        let cats = categories_of([Some("Verduras"), Some("frutas"), None, Some("Frutas"), Some(" ")]);
        assert_eq!(cats, vec!["frutas".to_string(), "Verduras".to_string()]);
    }

    #[test]
    fn test_sort_stands_by_code_is_natural() {
        let mut stands = vec![
            stand(1, "B", "1", "x", StandStatus::Activo),
            stand(2, "A", "10", "y", StandStatus::Activo),
            stand(3, "A", "2", "z", StandStatus::Activo),
        ];
        sort_stands(&mut stands, StandSort::Code);
        let ids: Vec<i64> = stands.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_products_by_price() {
        let mut products = vec![
            product(1, "a", 3.0, "x"),
            product(2, "b", 1.5, "x"),
            product(3, "c", 9.0, "x"),
        ];
        sort_products(&mut products, ProductSort::PriceDesc);
        assert_eq!(products[0].id, 3);
        sort_products(&mut products, ProductSort::PriceAsc);
        assert_eq!(products[0].id, 2);
    }

    #[test]
    fn test_replace_and_remove_item() {
        let mut users = vec![user(1, "Ana", Role::Admin), user(2, "Luis", Role::Cliente)];
        let mut updated = user(2, "Luis", Role::Propietario);
        updated.active = false;
        replace_item(&mut users, updated);
        assert_eq!(users[1].role, Role::Propietario);
        replace_item(&mut users, user(9, "Nuevo", Role::Cliente));
        assert_eq!(users[0].id, 9);
        remove_item(&mut users, 1);
        assert_eq!(users.len(), 2);
    }
}
