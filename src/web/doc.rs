use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::web::middlewares::AUTH_TOKEN;

pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                AUTH_TOKEN,
                "Session token of the signed in user",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::account::registration_page_handler,
        crate::web::routes::account::registration_handler,
        crate::web::routes::account::login_page_handler,
        crate::web::routes::account::login_handler,
        crate::web::routes::account::logout_handler,
        crate::web::routes::account::account_verify_handler,
        crate::web::routes::courses::course_list_handler,
        crate::web::routes::courses::course_detail_handler,
        crate::web::routes::courses::course_enroll_handler,
        crate::web::routes::exam::exam_submit_handler,
        crate::web::routes::exam::exam_result_handler,
    ),
    modifiers(&CookieAuthModifier),
    tags(
        (name = "account", description = "Registration and sessions"),
        (name = "courses", description = "Catalog and enrollment"),
        (name = "exam", description = "Exam submission and grading"),
    )
)]
pub struct ApiDoc;
