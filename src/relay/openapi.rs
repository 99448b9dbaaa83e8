use super::handlers::{health, login, register};
use utoipa::openapi::{Contact, InfoBuilder, License, OpenApiBuilder, Tag};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Router that also drives the `OpenAPI` document.
///
/// Endpoints registered with `.routes(routes!(...))` are both served and
/// documented; `/`, `/openapi.json` and `OPTIONS /health` are added in `app`.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(register::register))
        .routes(routes!(login::login));

    let mut lipa_tag = Tag::new("lipa");
    lipa_tag.description = Some("Service metadata".to_string());

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Registration and login relayed to the auth gateway".to_string());

    router.get_openapi_mut().tags = Some(vec![lipa_tag, auth_tag]);

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact(env!("CARGO_PKG_AUTHORS"));

    let mut license = License::new(env!("CARGO_PKG_LICENSE"));
    license.identifier = Some(env!("CARGO_PKG_LICENSE").to_string());
    info.license = Some(license);

    OpenApiBuilder::new().info(info).build()
}

// Cargo joins authors with `:`; the first one is the contact, "Name <email>".
fn cargo_contact(authors: &str) -> Option<Contact> {
    let primary = authors.split(':').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let mut contact = Contact::new();
    match primary.split_once('<') {
        Some((name, email)) => {
            contact.name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
            contact.email = Some(email.trim_end_matches('>').trim().to_string());
        }
        None => contact.name = Some(primary.to_string()),
    }
    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, "lipa");
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));

        let contact = spec.info.contact.expect("contact");
        assert_eq!(contact.name.as_deref(), Some("Team LIPA"));
        assert_eq!(contact.email.as_deref(), Some("team@lipa.app"));

        let license = spec.info.license.expect("license");
        assert_eq!(license.name, "BSD-3-Clause");
    }

    #[test]
    fn openapi_documents_relay_routes() {
        let spec = openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(spec.paths.paths.contains_key("/api/auth/register"));
        assert!(spec.paths.paths.contains_key("/api/auth/login"));
        assert!(spec.paths.paths.contains_key("/health"));
    }

    #[test]
    fn contact_without_email() {
        let contact = cargo_contact("Jane Doe").expect("contact");
        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(contact.email, None);
        assert!(cargo_contact("").is_none());
    }
}
